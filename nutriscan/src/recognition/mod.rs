//! Food recognition
//!
//! Sends a photo to a vision-language model and turns its reply into
//! [`FoodItem`](crate::models::FoodItem)s.
//!
//! The backend is selected from `RecognitionConfig::model` as
//! `<provider>/<model>`:
//! - `service/...` (default): a self-hosted model server speaking
//!   `POST /analyze` with a multipart `file` field
//! - `openai/...`: an OpenAI-compatible chat completions endpoint
//!
//! # Usage
//!
//! ```rust,ignore
//! let recognizer = RecognitionProvider::new(&config.recognition);
//! let raw = recognizer.recognize(&image).await?;
//! let items = recognition::parse(&raw);
//! ```

mod api;
mod parser;
pub mod prompts;
mod provider;

pub use api::{OpenAiVisionClient, VlmServiceClient};
pub use parser::parse;
pub use provider::RecognitionProvider;
