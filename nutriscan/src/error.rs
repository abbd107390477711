use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::ApiResponse;

#[derive(Error, Debug)]
pub enum NutriError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Recognition unavailable: {0}")]
    RecognitionUnavailable(String),

    #[error("Nutrient lookup error: {0}")]
    NutrientLookup(String),
}

impl IntoResponse for NutriError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, NutriError>;
