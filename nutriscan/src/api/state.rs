use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::nutrition::NutritionEnricher;
use crate::recognition::RecognitionProvider;
use crate::services::AnalysisService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: AnalysisService,
}

impl AppState {
    /// Wires the collaborators described by `config`.
    ///
    /// Fails only when the nutrition client cannot be built; a misconfigured
    /// recognition backend degrades to unavailable instead.
    pub fn new(config: Config) -> Result<Self> {
        let recognizer = RecognitionProvider::new(&config.recognition);
        let enricher = NutritionEnricher::from_config(&config.nutrition)?;
        Ok(Self::with_service(
            config,
            AnalysisService::new(recognizer, enricher),
        ))
    }

    pub fn with_service(config: Config, analysis: AnalysisService) -> Self {
        Self {
            config: Arc::new(config),
            analysis,
        }
    }
}
