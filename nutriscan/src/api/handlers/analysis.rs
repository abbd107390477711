use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use crate::api::response::{ApiResponse, ErrorBody};
use crate::api::state::AppState;
use crate::error::{NutriError, Result};
use crate::models::{AnalysisResult, RecognitionOutput, UploadedImage};

/// `POST /analyze`
///
/// Accepts a multipart form with a `file` field holding the photo. Runs
/// recognition, then per-item nutrition enrichment, and returns the foods
/// with their totals.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    operation_id = "analysis.analyze",
    request_body(content_type = "multipart/form-data", content = String, description = "Food photo in the `file` field"),
    responses(
        (status = 200, description = "Recognized foods with nutrition", body = AnalysisResult),
        (status = 400, description = "Missing, empty, oversized or non-image upload", body = ErrorBody),
        (status = 502, description = "Recognition backend failed", body = ErrorBody),
        (status = 503, description = "Recognition backend not configured", body = ErrorBody),
    )
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResponse<AnalysisResult> {
    let image = match read_upload(multipart, state.config.server.max_upload_size).await {
        Ok(image) => image,
        Err(e) => return e.into(),
    };

    match state.analysis.analyze(&image).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => e.into(),
    }
}

/// `POST /analyze/recognition-only`
///
/// Returns the raw recognition output without parsing or nutrition lookup.
#[utoipa::path(
    post,
    path = "/analyze/recognition-only",
    tag = "analysis",
    operation_id = "analysis.recognitionOnly",
    request_body(content_type = "multipart/form-data", content = String, description = "Food photo in the `file` field"),
    responses(
        (status = 200, description = "Raw recognition output", body = RecognitionOutput),
        (status = 400, description = "Missing, empty, oversized or non-image upload", body = ErrorBody),
        (status = 502, description = "Recognition backend failed", body = ErrorBody),
        (status = 503, description = "Recognition backend not configured", body = ErrorBody),
    )
)]
pub async fn recognition_only(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResponse<RecognitionOutput> {
    let image = match read_upload(multipart, state.config.server.max_upload_size).await {
        Ok(image) => image,
        Err(e) => return e.into(),
    };

    match state.analysis.recognize_only(&image).await {
        Ok(output) => ApiResponse::success(output),
        Err(e) => e.into(),
    }
}

/// Pulls the `file` field out of the form and validates it as an image.
async fn read_upload(
    multipart: std::result::Result<Multipart, MultipartRejection>,
    max_upload_size: usize,
) -> Result<UploadedImage> {
    let mut multipart = multipart
        .map_err(|e| NutriError::Validation(format!("Expected a multipart form: {}", e.body_text())))?;

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(NutriError::Validation(format!(
                    "Failed to read upload: {}",
                    e.body_text()
                )))
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| NutriError::Validation(format!("Failed to read file: {}", e.body_text())))?;
        file_bytes = Some(bytes.to_vec());
    }

    let bytes = file_bytes
        .ok_or_else(|| NutriError::Validation("Missing `file` field".to_string()))?;

    let image = UploadedImage::new(bytes, file_name, max_upload_size)?;
    tracing::debug!(
        file_name = %image.file_name,
        mime_type = %image.mime_type,
        size = image.len(),
        "Accepted upload"
    );
    Ok(image)
}
