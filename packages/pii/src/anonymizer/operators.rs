use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{PiiError, Result};
use crate::types::EntityType;

/// Key that selects the fallback operator in a JSON operator map
pub const DEFAULT_OPERATOR_KEY: &str = "DEFAULT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

/// How a detected span is transformed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operator {
    /// Replace with `new_value`, or `<ENTITY_TYPE>` when unset
    Replace {
        #[serde(default)]
        new_value: Option<String>,
    },
    /// Remove the span entirely
    Redact,
    /// Overwrite `chars_to_mask` characters with `masking_char`
    Mask {
        #[serde(default = "default_masking_char")]
        masking_char: char,
        #[serde(default = "mask_everything")]
        chars_to_mask: usize,
        #[serde(default)]
        from_end: bool,
    },
    /// Replace with the hex digest of the original value
    Hash {
        #[serde(default)]
        algorithm: HashAlgorithm,
    },
    /// Leave the span as it is
    Keep,
}

fn default_masking_char() -> char {
    '*'
}

fn mask_everything() -> usize {
    usize::MAX
}

impl Default for Operator {
    fn default() -> Self {
        Operator::Replace { new_value: None }
    }
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Replace { .. } => "replace",
            Operator::Redact => "redact",
            Operator::Mask { .. } => "mask",
            Operator::Hash { .. } => "hash",
            Operator::Keep => "keep",
        }
    }

    /// Transform the original `value` of a span detected as `entity`.
    pub fn operate(&self, value: &str, entity: EntityType) -> String {
        match self {
            Operator::Replace { new_value } => new_value
                .clone()
                .unwrap_or_else(|| format!("<{}>", entity)),
            Operator::Redact => String::new(),
            Operator::Mask {
                masking_char,
                chars_to_mask,
                from_end,
            } => mask(value, *masking_char, *chars_to_mask, *from_end),
            Operator::Hash { algorithm } => match algorithm {
                HashAlgorithm::Sha256 => hex::encode(Sha256::digest(value.as_bytes())),
                HashAlgorithm::Sha512 => hex::encode(Sha512::digest(value.as_bytes())),
            },
            Operator::Keep => value.to_string(),
        }
    }
}

/// Mask counts characters, not bytes, so multi-byte text masks cleanly.
fn mask(value: &str, masking_char: char, chars_to_mask: usize, from_end: bool) -> String {
    let total = value.chars().count();
    let masked = chars_to_mask.min(total);

    value
        .chars()
        .enumerate()
        .map(|(idx, c)| {
            let hidden = if from_end {
                idx >= total - masked
            } else {
                idx < masked
            };
            if hidden {
                masking_char
            } else {
                c
            }
        })
        .collect()
}

/// Which operator applies to which entity, with a fallback for the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorConfig {
    default: Operator,
    per_entity: HashMap<EntityType, Operator>,
}

impl OperatorConfig {
    pub fn new(default: Operator) -> Self {
        Self {
            default,
            per_entity: HashMap::new(),
        }
    }

    pub fn with(mut self, entity: EntityType, operator: Operator) -> Self {
        self.per_entity.insert(entity, operator);
        self
    }

    pub fn operator_for(&self, entity: EntityType) -> &Operator {
        self.per_entity.get(&entity).unwrap_or(&self.default)
    }

    /// Parse a JSON map such as
    /// `{"DEFAULT": {"type": "redact"}, "EMAIL_ADDRESS": {"type": "mask", "chars_to_mask": 4}}`.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| PiiError::InvalidOperator {
            reason: "operators must be a JSON object keyed by entity type".to_string(),
        })?;

        let mut config = OperatorConfig::default();
        for (key, raw) in map {
            let operator: Operator =
                serde_json::from_value(raw.clone()).map_err(|e| PiiError::InvalidOperator {
                    reason: format!("{}: {}", key, e),
                })?;

            if key.eq_ignore_ascii_case(DEFAULT_OPERATOR_KEY) {
                config.default = operator;
            } else {
                config.per_entity.insert(key.parse()?, operator);
            }
        }
        Ok(config)
    }
}
