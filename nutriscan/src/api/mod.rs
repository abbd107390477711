mod extractors;
pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod response;
mod routes;
mod state;

pub use response::{ApiError, ApiResponse, ErrorCode};
pub use routes::create_router;
pub use state::AppState;
