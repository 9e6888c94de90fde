//! The anonymizer: rewrites text given the spans an analyzer located.

pub mod conflicts;
pub mod operators;

use serde::Serialize;

use crate::error::{PiiError, Result};
use crate::types::{EntityType, RecognizerResult};

pub use conflicts::resolve_conflicts;
pub use operators::{HashAlgorithm, Operator, OperatorConfig, DEFAULT_OPERATOR_KEY};

/// One transformed span, with offsets into the anonymized text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorResult {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub operator: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineResult {
    pub text: String,
    pub items: Vec<OperatorResult>,
}

/// Applies operators to analyzer results.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymizerEngine;

impl AnonymizerEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite every span in `results` with the operator configured for its
    /// entity type. Overlapping results are resolved first.
    pub fn anonymize(
        &self,
        text: &str,
        results: &[RecognizerResult],
        operators: &OperatorConfig,
    ) -> Result<EngineResult> {
        for result in results {
            validate_span(text, result)?;
        }

        if results.is_empty() {
            return Ok(EngineResult {
                text: text.to_string(),
                items: Vec::new(),
            });
        }

        let resolved = resolve_conflicts(text, results);

        let mut output = String::with_capacity(text.len());
        let mut items = Vec::with_capacity(resolved.len());
        let mut cursor = 0;

        for result in &resolved {
            output.push_str(&text[cursor..result.start]);

            let operator = operators.operator_for(result.entity_type);
            let replaced = operator.operate(&text[result.start..result.end], result.entity_type);

            let start = output.len();
            output.push_str(&replaced);
            items.push(OperatorResult {
                entity_type: result.entity_type,
                start,
                end: output.len(),
                operator: operator.name().to_string(),
                text: replaced,
            });

            cursor = result.end;
        }
        output.push_str(&text[cursor..]);

        tracing::debug!(
            spans = items.len(),
            input_len = text.len(),
            output_len = output.len(),
            "anonymization complete"
        );

        Ok(EngineResult {
            text: output,
            items,
        })
    }
}

fn validate_span(text: &str, result: &RecognizerResult) -> Result<()> {
    let valid = result.start < result.end
        && result.end <= text.len()
        && text.is_char_boundary(result.start)
        && text.is_char_boundary(result.end);

    if valid {
        Ok(())
    } else {
        Err(PiiError::InvalidSpan {
            start: result.start,
            end: result.end,
            len: text.len(),
        })
    }
}
