use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PiiError;

/// Kind of PII an analyzer result refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntityType {
    Person,
    EmailAddress,
    PhoneNumber,
    CreditCard,
    UsSsn,
    IpAddress,
    Url,
    IbanCode,
    DateTime,
    CryptoWallet,
    MacAddress,
}

impl EntityType {
    pub const ALL: [EntityType; 11] = [
        EntityType::Person,
        EntityType::EmailAddress,
        EntityType::PhoneNumber,
        EntityType::CreditCard,
        EntityType::UsSsn,
        EntityType::IpAddress,
        EntityType::Url,
        EntityType::IbanCode,
        EntityType::DateTime,
        EntityType::CryptoWallet,
        EntityType::MacAddress,
    ];

    /// Canonical wire name, also used for `<ENTITY>` placeholders
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::EmailAddress => "EMAIL_ADDRESS",
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::CreditCard => "CREDIT_CARD",
            EntityType::UsSsn => "US_SSN",
            EntityType::IpAddress => "IP_ADDRESS",
            EntityType::Url => "URL",
            EntityType::IbanCode => "IBAN_CODE",
            EntityType::DateTime => "DATE_TIME",
            EntityType::CryptoWallet => "CRYPTO",
            EntityType::MacAddress => "MAC_ADDRESS",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EntityType::ALL
            .iter()
            .copied()
            .find(|entity| entity.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PiiError::UnknownEntity(s.to_string()))
    }
}

impl TryFrom<String> for EntityType {
    type Error = PiiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityType> for String {
    fn from(entity: EntityType) -> Self {
        entity.as_str().to_string()
    }
}

/// A located piece of PII.
///
/// `start`/`end` are byte offsets into the analyzed text and always fall on
/// char boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerResult {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub score: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recognizer: String,
}

impl RecognizerResult {
    pub fn new(entity_type: EntityType, start: usize, end: usize, score: f64) -> Self {
        Self {
            entity_type,
            start,
            end,
            score,
            recognizer: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn intersects(&self, other: &RecognizerResult) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &RecognizerResult) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn same_span(&self, other: &RecognizerResult) -> bool {
        self.start == other.start && self.end == other.end
    }
}
