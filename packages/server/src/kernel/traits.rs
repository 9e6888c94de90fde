// Trait definitions for dependency injection
//
// Naming convention: Base* for trait names (e.g., BasePiiMasker)

use anyhow::Result;
use async_trait::async_trait;
use pii::{EntityType, OperatorConfig, RecognizerResult, DEFAULT_LANGUAGE};

// =============================================================================
// PII Masking Trait (Infrastructure)
// =============================================================================

/// Per-request knobs for analysis and anonymization
#[derive(Debug, Clone)]
pub struct MaskOptions {
    pub language: String,
    /// Restrict detection to these entities (`None` means all)
    pub entities: Option<Vec<EntityType>>,
    pub score_threshold: f64,
    pub operators: OperatorConfig,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            entities: None,
            score_threshold: 0.0,
            operators: OperatorConfig::default(),
        }
    }
}

/// Result of PII detection and masking
#[derive(Debug, Clone)]
pub struct MaskResult {
    pub masked: String,
    pub findings: Vec<RecognizerResult>,
    pub pii_detected: bool,
}

#[async_trait]
pub trait BasePiiMasker: Send + Sync {
    /// Locate PII spans without changing the text
    async fn analyze(&self, text: &str, options: &MaskOptions) -> Result<Vec<RecognizerResult>>;

    /// Detect and mask PII in one call
    async fn mask(&self, text: &str, options: &MaskOptions) -> Result<MaskResult>;

    /// Entity types detectable in `language`
    fn supported_entities(&self, language: &str) -> Result<Vec<EntityType>>;
}
