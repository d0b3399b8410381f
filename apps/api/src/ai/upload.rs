//! Plain-text CV uploads that feed the tailoring flow.

use serde::Serialize;

use crate::ai::AiError;
use crate::applications::validation::ValidationErrors;

const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["text/plain", "text/markdown"];
const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedCv {
    pub file_name: String,
    pub text: String,
}

/// Accepts `.txt` and `.md` files, judged by content type. Clients that send
/// no type or `application/octet-stream` are judged by the file extension.
pub fn upload_cv_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<UploadedCv, AiError> {
    let file_name = file_name.unwrap_or("cv.txt");
    if !is_accepted(file_name, content_type) {
        return Err(invalid("Please upload a .txt or .md file.").into());
    }

    let text = String::from_utf8(bytes.to_vec())
        .map_err(|_| AiError::from(invalid("The uploaded file is not valid UTF-8 text.")))?;
    let text = text.trim_start_matches('\u{feff}').to_string();

    Ok(UploadedCv {
        file_name: file_name.to_string(),
        text,
    })
}

fn is_accepted(file_name: &str, content_type: Option<&str>) -> bool {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match essence.as_deref() {
        Some(ct) if ACCEPTED_CONTENT_TYPES.contains(&ct) => true,
        None | Some("") | Some("application/octet-stream") => file_name
            .rsplit_once('.')
            .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false),
        Some(_) => false,
    }
}

fn invalid(message: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.push("file", message);
    errors
}
