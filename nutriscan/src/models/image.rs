use crate::error::{NutriError, Result};

/// An uploaded photo, checked to be a non-empty image within the size limit.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    /// Sniffed from the content, never taken from the client.
    pub mime_type: String,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, file_name: Option<String>, max_size: usize) -> Result<Self> {
        if bytes.is_empty() {
            return Err(NutriError::Validation("Uploaded file is empty".to_string()));
        }

        if bytes.len() > max_size {
            return Err(NutriError::Validation(format!(
                "Uploaded file is {} bytes, the limit is {max_size} bytes",
                bytes.len()
            )));
        }

        let kind = infer::get(&bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .ok_or_else(|| {
                NutriError::Validation("Uploaded file is not a supported image".to_string())
            })?;

        let file_name = file_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("upload.{}", kind.extension()));

        Ok(Self {
            bytes,
            file_name,
            mime_type: kind.mime_type().to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
