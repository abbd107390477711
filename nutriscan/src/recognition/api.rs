use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{multipart, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompts::food_analysis_prompt;
use crate::{
    config::{RecognitionConfig, DEFAULT_RECOGNITION_SERVICE_URL},
    error::{NutriError, Result},
    models::UploadedImage,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| NutriError::Recognition(format!("Failed to create HTTP client: {e}")))
}

fn map_send_error(e: reqwest::Error) -> NutriError {
    if e.is_timeout() {
        NutriError::Recognition("Request timeout".to_string())
    } else {
        NutriError::Recognition(format!("Request failed: {e}"))
    }
}

fn map_http_error(status: StatusCode, error_body: &str) -> NutriError {
    match status {
        StatusCode::UNAUTHORIZED => NutriError::Recognition(format!(
            "Authentication failed (401): Invalid API key. Error: {error_body}"
        )),
        StatusCode::TOO_MANY_REQUESTS => NutriError::Recognition(format!(
            "Rate limit exceeded (429): Too many requests. Error: {error_body}"
        )),
        _ => NutriError::Recognition(format!(
            "Recognition service error ({status}): {error_body}"
        )),
    }
}

async fn error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error response".to_string())
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    result: Option<String>,
}

/// Client for a self-hosted vision model server.
///
/// The server accepts the photo as multipart field `file` on `POST /analyze`
/// and answers `{"result": "<model output>"}`.
#[derive(Debug, Clone)]
pub struct VlmServiceClient {
    client: Client,
    base_url: String,
}

impl VlmServiceClient {
    pub fn new(config: &RecognitionConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_RECOGNITION_SERVICE_URL.to_string());

        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn recognize(&self, image: &UploadedImage) -> Result<String> {
        let file_part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| NutriError::Recognition(format!("Invalid MIME type: {e}")))?;
        let form = multipart::Form::new().part("file", file_part);

        let url = format!("{}/analyze", self.base_url);
        debug!(url = %url, bytes = image.len(), "Sending image to recognition service");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_http_error(status, &error_body(response).await));
        }

        let body: ServiceResponse = response.json().await.map_err(|e| {
            NutriError::Recognition(format!("Failed to parse recognition response: {e}"))
        })?;

        body.result
            .ok_or_else(|| NutriError::Recognition("Response has no 'result' field".to_string()))
    }

    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Recognition service health check failed: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint with image input.
#[derive(Debug, Clone)]
pub struct OpenAiVisionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiVisionClient {
    pub fn new(config: &RecognitionConfig, model: &str) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            NutriError::Recognition("API key required for OpenAI vision recognition".to_string())
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string());

        Ok(Self {
            client: build_client(config.timeout_secs)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub async fn recognize(&self, image: &UploadedImage) -> Result<String> {
        let data_url = format!(
            "data:{};base64,{}",
            image.mime_type,
            STANDARD.encode(&image.bytes)
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: food_analysis_prompt(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: 1024,
            temperature: 0.1,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, "Sending image to vision model");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_http_error(status, &error_body(response).await));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| NutriError::Recognition(format!("Failed to parse response: {e}")))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NutriError::Recognition("No response from API".to_string()))
    }

    pub async fn health(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Vision API health check failed: {}", e);
                false
            }
        }
    }
}
