//! The analyzer: locates PII spans in text.
//!
//! Every registered recognizer for the request language runs over the text,
//! context words nudge scores up, and the combined results are filtered and
//! de-duplicated before being returned in text order.

pub mod predefined;
pub mod recognizer;
pub mod registry;
pub mod validators;

use std::collections::BTreeSet;

use crate::error::{PiiError, Result};
use crate::types::{EntityType, RecognizerResult};

pub use recognizer::{enhance_with_context, Pattern, PatternRecognizer, Recognizer, Validator};
pub use registry::RecognizerRegistry;

/// Language used when a caller does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Parameters for a single analysis call
#[derive(Debug, Clone)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
    pub language: &'a str,
    /// Restrict detection to these entities (`None` means all)
    pub entities: Option<&'a [EntityType]>,
    /// Results scoring below this are dropped (`None` uses the engine default)
    pub score_threshold: Option<f64>,
}

impl<'a> AnalyzeRequest<'a> {
    pub fn new(text: &'a str, language: &'a str) -> Self {
        Self {
            text,
            language,
            entities: None,
            score_threshold: None,
        }
    }

    pub fn entities(mut self, entities: &'a [EntityType]) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = Some(threshold);
        self
    }
}

/// Runs recognizers over text and merges their findings.
#[derive(Debug, Clone)]
pub struct AnalyzerEngine {
    registry: RecognizerRegistry,
    default_score_threshold: f64,
}

impl Default for AnalyzerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerEngine {
    /// Engine with every built-in recognizer registered
    pub fn new() -> Self {
        Self::with_registry(RecognizerRegistry::with_predefined())
    }

    pub fn with_registry(registry: RecognizerRegistry) -> Self {
        Self {
            registry,
            default_score_threshold: 0.0,
        }
    }

    pub fn with_default_score_threshold(mut self, threshold: f64) -> Self {
        self.default_score_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn add_recognizer<R: Recognizer + 'static>(&mut self, recognizer: R) {
        self.registry.add(recognizer);
    }

    pub fn registry(&self) -> &RecognizerRegistry {
        &self.registry
    }

    pub fn supported_languages(&self) -> BTreeSet<String> {
        self.registry.supported_languages()
    }

    /// Entities the given language can detect, sorted and without repeats
    pub fn supported_entities(&self, language: &str) -> Result<Vec<EntityType>> {
        let entities: BTreeSet<EntityType> = self
            .registry
            .for_language(language)
            .flat_map(|r| r.supported_entities().iter().copied())
            .collect();

        if entities.is_empty() {
            return Err(PiiError::UnsupportedLanguage(language.to_string()));
        }
        Ok(entities.into_iter().collect())
    }

    /// Locate PII in `request.text`.
    pub fn analyze(&self, request: &AnalyzeRequest<'_>) -> Result<Vec<RecognizerResult>> {
        let mut recognizers = self.registry.for_language(request.language).peekable();
        if recognizers.peek().is_none() {
            return Err(PiiError::UnsupportedLanguage(request.language.to_string()));
        }

        if request.text.is_empty() {
            return Ok(Vec::new());
        }

        let wanted = request.entities.unwrap_or(&[]);
        let threshold = request
            .score_threshold
            .unwrap_or(self.default_score_threshold);

        let mut results = Vec::new();
        for recognizer in recognizers {
            if !wanted.is_empty()
                && !recognizer
                    .supported_entities()
                    .iter()
                    .any(|e| wanted.contains(e))
            {
                continue;
            }

            let mut found = recognizer.analyze(request.text, wanted);
            enhance_with_context(request.text, &mut found, recognizer.context());
            if !found.is_empty() {
                tracing::trace!(
                    recognizer = recognizer.name(),
                    count = found.len(),
                    "recognizer produced results"
                );
            }
            results.extend(found);
        }

        results.retain(|r| r.score > 0.0 && r.score >= threshold);
        let mut results = remove_duplicates(results);
        results.sort_by(|a, b| {
            (a.start, a.end, a.entity_type).cmp(&(b.start, b.end, b.entity_type))
        });

        tracing::debug!(
            language = request.language,
            text_len = request.text.len(),
            results = results.len(),
            "analysis complete"
        );
        Ok(results)
    }
}

/// Drop results swallowed by a result of the same entity type: a smaller span
/// inside a larger one, or an identical span with a lower (or tied, later)
/// score.
fn remove_duplicates(results: Vec<RecognizerResult>) -> Vec<RecognizerResult> {
    results
        .iter()
        .enumerate()
        .filter(|(i, result)| {
            !results.iter().enumerate().any(|(j, other)| {
                *i != j
                    && other.entity_type == result.entity_type
                    && other.contains(result)
                    && (!other.same_span(result)
                        || other.score > result.score
                        || (other.score == result.score && j < *i))
            })
        })
        .map(|(_, result)| result.clone())
        .collect()
}
