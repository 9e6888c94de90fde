//! Pattern-based PII analysis and anonymization.
//!
//! The crate is split the same way the work is:
//!
//! - [`analyzer`] locates PII spans (emails, phone numbers, card numbers,
//!   names introduced by a title, ...) and scores them.
//! - [`anonymizer`] rewrites text given those spans, one operator per entity
//!   type (replace, redact, mask, hash, keep).
//!
//! # Examples
//!
//! ```rust
//! use pii::{AnalyzeRequest, AnalyzerEngine, AnonymizerEngine, OperatorConfig};
//!
//! let text = "Contact me at john@example.com or (555) 123-4567";
//!
//! let analyzer = AnalyzerEngine::new();
//! let results = analyzer.analyze(&AnalyzeRequest::new(text, "en")).unwrap();
//!
//! let anonymized = AnonymizerEngine::new()
//!     .anonymize(text, &results, &OperatorConfig::default())
//!     .unwrap();
//! assert_eq!(anonymized.text, "Contact me at <EMAIL_ADDRESS> or <PHONE_NUMBER>");
//! ```

pub mod analyzer;
pub mod anonymizer;
pub mod error;
pub mod types;

pub use analyzer::{
    AnalyzeRequest, AnalyzerEngine, Pattern, PatternRecognizer, Recognizer, RecognizerRegistry,
    DEFAULT_LANGUAGE,
};
pub use anonymizer::{
    AnonymizerEngine, EngineResult, HashAlgorithm, Operator, OperatorConfig, OperatorResult,
};
pub use error::{PiiError, Result};
pub use types::{EntityType, RecognizerResult};

/// Analyze English text and replace every finding with its entity placeholder.
pub fn mask_text(text: &str) -> Result<String> {
    let results = AnalyzerEngine::new().analyze(&AnalyzeRequest::new(text, DEFAULT_LANGUAGE))?;
    let anonymized = AnonymizerEngine::new().anonymize(text, &results, &OperatorConfig::default())?;
    Ok(anonymized.text)
}
