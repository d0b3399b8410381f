use axum::body::Bytes;
use axum::extract::Multipart;

use crate::errors::AppError;

/// Form field that carries uploaded files.
pub const FILE_FIELD: &str = "file";

pub struct FilePart {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Reads the first `file` field of a multipart body. Other fields are skipped.
pub async fn read_file_field(mut multipart: Multipart) -> Result<FilePart, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(FilePart {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
