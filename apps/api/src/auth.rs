//! Bearer-token authentication. The auth backend issues HS256 access tokens
//! whose `sub` is the user id; every data route resolves a `UserContext` from
//! them before touching the store.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Audience the auth backend stamps on signed-in users' tokens.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token has no subject")]
    MissingSubject,
}

/// The authenticated caller, passed explicitly into every store call.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
    /// Verified claims, forwarded to the database so row-level policies can
    /// see who is asking.
    pub claims: Value,
}

impl UserContext {
    #[cfg(test)]
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            claims: serde_json::json!({ "sub": user_id, "role": "authenticated" }),
        }
    }
}

#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<UserContext, AuthError> {
        let data = decode::<Value>(token, &self.key, &self.validation)?;
        let user_id = data
            .claims
            .get("sub")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSubject)?
            .to_string();
        Ok(UserContext {
            user_id,
            claims: data.claims,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for UserContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AppError::Unauthorized)?;

        state.auth.verify(token).map_err(|e| {
            warn!("Rejected access token: {e}");
            AppError::Unauthorized
        })
    }
}

/// Signs a token the way the auth backend does. Test-only.
#[cfg(test)]
pub fn issue_test_token(secret: &str, sub: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let exp = chrono::Utc::now().timestamp() + 3600;
    let claims = serde_json::json!({
        "sub": sub,
        "aud": AUTHENTICATED_AUDIENCE,
        "role": "authenticated",
        "exp": exp,
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
