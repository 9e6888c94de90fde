// PII Masking Service Implementations

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

use ::pii::{AnalyzeRequest, AnalyzerEngine, AnonymizerEngine, EntityType, RecognizerResult};

use crate::kernel::traits::{BasePiiMasker, MaskOptions, MaskResult};

// =============================================================================
// Engine-backed Masker (analyzer + anonymizer)
// =============================================================================

/// Masker backed by the pattern analyzer and the anonymizer.
/// Both engines are immutable once built, so one instance serves every request.
#[derive(Debug, Clone, Default)]
pub struct EngineMasker {
    analyzer: AnalyzerEngine,
    anonymizer: AnonymizerEngine,
}

impl EngineMasker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analyzer(analyzer: AnalyzerEngine) -> Self {
        Self {
            analyzer,
            anonymizer: AnonymizerEngine::new(),
        }
    }

    fn run_analysis(&self, text: &str, options: &MaskOptions) -> Result<Vec<RecognizerResult>> {
        let mut request =
            AnalyzeRequest::new(text, &options.language).score_threshold(options.score_threshold);
        if let Some(entities) = options.entities.as_deref() {
            request = request.entities(entities);
        }

        Ok(self.analyzer.analyze(&request)?)
    }
}

#[async_trait]
impl BasePiiMasker for EngineMasker {
    async fn analyze(&self, text: &str, options: &MaskOptions) -> Result<Vec<RecognizerResult>> {
        self.run_analysis(text, options)
    }

    async fn mask(&self, text: &str, options: &MaskOptions) -> Result<MaskResult> {
        let findings = self.run_analysis(text, options)?;

        // Types only: the values themselves must never reach the logs
        let entity_types: BTreeSet<EntityType> = findings.iter().map(|f| f.entity_type).collect();
        tracing::info!(
            findings = findings.len(),
            entity_types = ?entity_types,
            "PII analysis complete"
        );

        let anonymized = self
            .anonymizer
            .anonymize(text, &findings, &options.operators)?;

        Ok(MaskResult {
            masked: anonymized.text,
            pii_detected: !findings.is_empty(),
            findings,
        })
    }

    fn supported_entities(&self, language: &str) -> Result<Vec<EntityType>> {
        Ok(self.analyzer.supported_entities(language)?)
    }
}

// =============================================================================
// No-op Masker (when masking is disabled)
// =============================================================================

/// No-op masker that never detects PII
/// Used when masking is disabled via config
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMasker;

impl NoopMasker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BasePiiMasker for NoopMasker {
    async fn analyze(&self, _text: &str, _options: &MaskOptions) -> Result<Vec<RecognizerResult>> {
        Ok(Vec::new())
    }

    async fn mask(&self, text: &str, _options: &MaskOptions) -> Result<MaskResult> {
        Ok(MaskResult {
            masked: text.to_string(),
            findings: Vec::new(),
            pii_detected: false,
        })
    }

    fn supported_entities(&self, _language: &str) -> Result<Vec<EntityType>> {
        Ok(Vec::new())
    }
}

// =============================================================================
// Factory function
// =============================================================================

/// Create PII masker based on configuration
pub fn create_pii_masker(enabled: bool) -> Arc<dyn BasePiiMasker> {
    if enabled {
        tracing::info!("PII masking enabled with pattern analyzer");
        Arc::new(EngineMasker::new())
    } else {
        tracing::info!("PII masking disabled, text is passed through unchanged");
        Arc::new(NoopMasker::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::pii::{Operator, OperatorConfig, Pattern, PatternRecognizer, PiiError};

    #[tokio::test]
    async fn test_engine_masker() {
        let masker = EngineMasker::new();

        let result = masker
            .mask("Email me at john@example.com", &MaskOptions::default())
            .await
            .unwrap();

        assert!(result.pii_detected);
        assert_eq!(result.masked, "Email me at <EMAIL_ADDRESS>");
        assert_eq!(result.findings[0].entity_type, EntityType::EmailAddress);
    }

    #[tokio::test]
    async fn test_engine_masker_respects_options() {
        let masker = EngineMasker::new();
        let options = MaskOptions {
            entities: Some(vec![EntityType::PhoneNumber]),
            operators: OperatorConfig::new(Operator::Redact),
            ..MaskOptions::default()
        };

        let result = masker
            .mask("Call 555-867-5309 or mail sam@example.net", &options)
            .await
            .unwrap();

        assert_eq!(result.masked, "Call  or mail sam@example.net");
    }

    #[tokio::test]
    async fn test_engine_masker_unsupported_language() {
        let masker = EngineMasker::new();
        let options = MaskOptions {
            language: "xx".to_string(),
            ..MaskOptions::default()
        };

        let err = masker.mask("anything", &options).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PiiError>(),
            Some(PiiError::UnsupportedLanguage(_))
        ));
    }

    #[tokio::test]
    async fn test_engine_masker_with_custom_recognizer() {
        let pattern = Pattern::new("de_landline", r"\b0\d{2,4} \d{5,8}\b", 0.6).unwrap();
        let mut analyzer = AnalyzerEngine::new();
        analyzer.add_recognizer(
            PatternRecognizer::new("GermanPhoneRecognizer", EntityType::PhoneNumber, vec![pattern])
                .with_language("de"),
        );
        assert_eq!(analyzer.registry().for_language("de").count(), 1);

        let masker = EngineMasker::with_analyzer(analyzer);
        let options = MaskOptions {
            language: "de".to_string(),
            ..MaskOptions::default()
        };

        let result = masker.mask("Telefon: 030 1234567", &options).await.unwrap();
        assert_eq!(result.masked, "Telefon: <PHONE_NUMBER>");
        assert_eq!(
            masker.supported_entities("de").unwrap(),
            vec![EntityType::PhoneNumber]
        );
    }

    #[tokio::test]
    async fn test_noop_masker() {
        let masker = NoopMasker::new();

        let result = masker
            .mask("Email me at john@example.com", &MaskOptions::default())
            .await
            .unwrap();

        assert!(!result.pii_detected);
        assert_eq!(result.masked, "Email me at john@example.com");
    }

    #[tokio::test]
    async fn test_factory() {
        let enabled = create_pii_masker(true);
        let disabled = create_pii_masker(false);

        assert!(!enabled.supported_entities("en").unwrap().is_empty());
        assert!(disabled.supported_entities("en").unwrap().is_empty());
    }
}
