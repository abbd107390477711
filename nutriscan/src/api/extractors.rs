use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::NutriError;

/// `axum::Json` whose rejections render through the standard error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(NutriError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for NutriError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> NutriError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                NutriError::Validation(format!("Missing required field: {field}"))
            } else {
                NutriError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            NutriError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            NutriError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) => {
            NutriError::Validation(format!("Failed to read request body: {}", err.body_text()))
        }
        _ => NutriError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_field() {
        assert_eq!(
            extract_missing_field("Failed to deserialize: items[0]: missing field `name` at line 1"),
            Some("name")
        );
        assert_eq!(extract_missing_field("invalid type: string"), None);
    }
}
