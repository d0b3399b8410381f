//! AI request pipeline: typed input, validation, one prompt-template call to
//! the model, validated typed output.

pub mod handlers;
pub mod prompts;
pub mod simple_prompt;
pub mod tailor_cv;
pub mod upload;
pub mod visualization;

use thiserror::Error;

use crate::applications::validation::ValidationErrors;
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid input: {0}")]
    InvalidInput(ValidationErrors),

    #[error("model call failed: {0}")]
    Model(LlmError),

    #[error("AI did not return expected result: {0}")]
    UnexpectedShape(String),
}

impl From<ValidationErrors> for AiError {
    fn from(errors: ValidationErrors) -> Self {
        AiError::InvalidInput(errors)
    }
}

impl From<LlmError> for AiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => AiError::UnexpectedShape(e.to_string()),
            LlmError::EmptyContent => AiError::UnexpectedShape("empty model response".to_string()),
            other => AiError::Model(other),
        }
    }
}
