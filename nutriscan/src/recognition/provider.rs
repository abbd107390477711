use std::time::Duration;

use tracing::{info, warn};

use crate::config::{parse_recognition_provider_model, RecognitionConfig};
use crate::error::{NutriError, Result};
use crate::models::UploadedImage;

use super::api::{OpenAiVisionClient, VlmServiceClient};

#[derive(Clone)]
enum RecognitionBackend {
    Service(VlmServiceClient),
    OpenAi(OpenAiVisionClient),
    Unavailable { reason: String },
}

/// The configured vision model, behind a single `recognize` call.
///
/// Misconfiguration does not stop the server: the provider reports itself
/// unavailable and every call fails with `RecognitionUnavailable`, while the
/// nutrition lookup endpoint keeps working.
#[derive(Clone)]
pub struct RecognitionProvider {
    backend: RecognitionBackend,
    config: RecognitionConfig,
}

impl RecognitionProvider {
    pub fn new(config: &RecognitionConfig) -> Self {
        let (provider, model) = parse_recognition_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => match OpenAiVisionClient::new(config, model) {
                Ok(client) => {
                    info!(model = %model, "OpenAI vision recognition backend initialized");
                    RecognitionBackend::OpenAi(client)
                }
                Err(e) => {
                    let reason = format!("OpenAI vision backend unavailable: {e}");
                    warn!("{}", reason);
                    RecognitionBackend::Unavailable { reason }
                }
            },
            _ => match VlmServiceClient::new(config) {
                Ok(client) => {
                    info!(
                        model = %model,
                        base_url = %client.base_url(),
                        "Recognition service backend initialized"
                    );
                    RecognitionBackend::Service(client)
                }
                Err(e) => {
                    let reason = format!("Recognition service backend unavailable: {e}");
                    warn!("{}", reason);
                    RecognitionBackend::Unavailable { reason }
                }
            },
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    /// Provider that rejects every call, e.g. for nutrition-only deployments.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: RecognitionBackend::Unavailable {
                reason: reason.into(),
            },
            config: RecognitionConfig::default(),
        }
    }

    /// Full `<provider>/<model>` name as configured.
    pub fn model_name(&self) -> &str {
        &self.config.model
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, RecognitionBackend::Unavailable { .. })
    }

    pub async fn recognize(&self, image: &UploadedImage) -> Result<String> {
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);

        match tokio::time::timeout(timeout_duration, self.recognize_internal(image)).await {
            Ok(inner_result) => inner_result,
            Err(_) => Err(NutriError::Recognition(format!(
                "Recognition timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }

    async fn recognize_internal(&self, image: &UploadedImage) -> Result<String> {
        match &self.backend {
            RecognitionBackend::Service(client) => client.recognize(image).await,
            RecognitionBackend::OpenAi(client) => client.recognize(image).await,
            RecognitionBackend::Unavailable { reason } => {
                Err(NutriError::RecognitionUnavailable(reason.clone()))
            }
        }
    }

    /// Whether the backend answers right now.
    pub async fn probe(&self) -> bool {
        match &self.backend {
            RecognitionBackend::Service(client) => client.health().await,
            RecognitionBackend::OpenAi(client) => client.health().await,
            RecognitionBackend::Unavailable { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn make_config(model: &str, base_url: Option<&str>, api_key: Option<&str>) -> RecognitionConfig {
        RecognitionConfig {
            model: model.to_string(),
            base_url: base_url.map(String::from),
            api_key: api_key.map(String::from),
            timeout_secs: 1,
        }
    }

    fn image() -> UploadedImage {
        UploadedImage::new(PNG_HEADER.to_vec(), None, 1024).unwrap()
    }

    #[test]
    fn test_default_model_routes_to_service() {
        let provider = RecognitionProvider::new(&RecognitionConfig::default());
        assert!(provider.is_available());
        assert_eq!(provider.model_name(), "service/internvl3-2b");
    }

    #[test]
    fn test_openai_model_without_api_key_is_unavailable() {
        let provider = RecognitionProvider::new(&make_config("openai/gpt-4o-mini", None, None));
        assert!(!provider.is_available());
    }

    #[test]
    fn test_openai_model_with_api_key() {
        let provider =
            RecognitionProvider::new(&make_config("openai/gpt-4o-mini", None, Some("sk-test")));
        assert!(provider.is_available());
    }

    #[tokio::test]
    async fn test_unavailable_returns_error() {
        let provider = RecognitionProvider::unavailable("Test unavailable");
        let result = provider.recognize(&image()).await;
        assert!(matches!(result, Err(NutriError::RecognitionUnavailable(_))));
        assert!(!provider.probe().await);
    }

    #[tokio::test]
    async fn test_recognize_through_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Food: rice"})))
            .mount(&server)
            .await;

        let provider = RecognitionProvider::new(&make_config(
            "service/internvl3-2b",
            Some(&server.uri()),
            None,
        ));
        assert_eq!(provider.recognize(&image()).await.unwrap(), "Food: rice");
    }

    #[tokio::test]
    async fn test_recognize_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": "late"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let provider = RecognitionProvider::new(&make_config(
            "service/internvl3-2b",
            Some(&server.uri()),
            None,
        ));
        let err = provider.recognize(&image()).await.unwrap_err();
        assert!(matches!(err, NutriError::Recognition(_)));
    }

    #[test]
    fn test_clone_keeps_availability() {
        let provider = RecognitionProvider::new(&make_config("openai/gpt-4o", None, None));
        let cloned = provider.clone();
        assert_eq!(provider.is_available(), cloned.is_available());
    }
}
