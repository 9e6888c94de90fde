use regex::Regex;

use crate::error::{PiiError, Result};
use crate::types::{EntityType, RecognizerResult};

/// Score added to a result when one of its context words precedes it
pub const CONTEXT_SIMILARITY_FACTOR: f64 = 0.35;
/// Floor for a context-boosted score
pub const MIN_SCORE_WITH_CONTEXT: f64 = 0.4;
/// How many words before a result are searched for context
pub const CONTEXT_PREFIX_COUNT: usize = 5;

/// Capture group name that narrows a match down to the PII itself
const PII_GROUP: &str = "pii";

/// Locates one or more kinds of PII in text.
pub trait Recognizer: Send + Sync {
    fn name(&self) -> &str;

    fn supported_entities(&self) -> &[EntityType];

    fn supported_language(&self) -> &str {
        "en"
    }

    /// Words that, found shortly before a result, raise its score
    fn context(&self) -> &[String] {
        &[]
    }

    fn analyze(&self, text: &str, entities: &[EntityType]) -> Vec<RecognizerResult>;
}

/// A named regex with the score its matches start out with
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: String,
    pub regex: Regex,
    pub score: f64,
}

impl Pattern {
    /// Compile a user supplied pattern.
    pub fn new(name: impl Into<String>, regex: &str, score: f64) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(regex).map_err(|source| PiiError::InvalidPattern {
            name: name.clone(),
            source,
        })?;
        Ok(Self::from_regex(name, regex, score))
    }

    pub fn from_regex(name: impl Into<String>, regex: Regex, score: f64) -> Self {
        Self {
            name: name.into(),
            regex,
            score: score.clamp(0.0, 1.0),
        }
    }
}

/// Drops candidates that match a pattern but fail a structural check
pub type Validator = fn(&str) -> bool;

/// Regex-driven recognizer for a single entity type.
///
/// When a pattern defines a `pii` capture group only that group is reported,
/// which lets patterns anchor on surrounding text (an honorific, a separator)
/// without masking it.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    name: String,
    entities: [EntityType; 1],
    language: String,
    patterns: Vec<Pattern>,
    context: Vec<String>,
    deny_context: Vec<String>,
    validator: Option<Validator>,
    whitespace_backoff: bool,
}

impl PatternRecognizer {
    pub fn new(name: impl Into<String>, entity: EntityType, patterns: Vec<Pattern>) -> Self {
        Self {
            name: name.into(),
            entities: [entity],
            language: "en".to_string(),
            patterns,
            context: Vec::new(),
            deny_context: Vec::new(),
            validator: None,
            whitespace_backoff: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_context(mut self, words: &[&str]) -> Self {
        self.context = words.iter().map(|w| w.to_lowercase()).collect();
        self
    }

    /// Words that, found shortly before a match, discard it
    pub fn with_deny_context(mut self, words: &[&str]) -> Self {
        self.deny_context = words.iter().map(|w| w.to_lowercase()).collect();
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// When a match fails validation, retry it with trailing
    /// whitespace-separated words dropped one at a time.
    pub fn with_whitespace_backoff(mut self) -> Self {
        self.whitespace_backoff = true;
        self
    }

    pub fn entity(&self) -> EntityType {
        self.entities[0]
    }

    /// End of the longest validated span starting at `start`, if any.
    fn validated_end(&self, text: &str, start: usize, end: usize) -> Option<usize> {
        let Some(validate) = self.validator else {
            return Some(end);
        };

        let mut end = end;
        loop {
            let candidate = &text[start..end];
            if validate(candidate) {
                return Some(end);
            }
            if !self.whitespace_backoff {
                return None;
            }
            let cut = candidate.rfind(char::is_whitespace)?;
            end = start + candidate[..cut].trim_end().len();
            if end == start {
                return None;
            }
        }
    }
}

impl Recognizer for PatternRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_entities(&self) -> &[EntityType] {
        &self.entities
    }

    fn supported_language(&self) -> &str {
        &self.language
    }

    fn context(&self) -> &[String] {
        &self.context
    }

    fn analyze(&self, text: &str, entities: &[EntityType]) -> Vec<RecognizerResult> {
        let entity = self.entity();
        if !entities.is_empty() && !entities.contains(&entity) {
            return Vec::new();
        }

        let mut results = Vec::new();
        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(m) = caps.name(PII_GROUP).or_else(|| caps.get(0)) else {
                    continue;
                };
                if m.as_str().is_empty() {
                    continue;
                }

                let Some(end) = self.validated_end(text, m.start(), m.end()) else {
                    continue;
                };

                if !self.deny_context.is_empty()
                    && has_context_word(text, m.start(), &self.deny_context)
                {
                    tracing::trace!(
                        recognizer = %self.name,
                        pattern = %pattern.name,
                        "candidate discarded by deny context"
                    );
                    continue;
                }

                results.push(RecognizerResult {
                    entity_type: entity,
                    start: m.start(),
                    end,
                    score: pattern.score,
                    recognizer: self.name.clone(),
                });
            }
        }

        // Several patterns may find the same span; keep its best score.
        results.sort_by(|a, b| {
            (a.start, a.end)
                .cmp(&(b.start, b.end))
                .then(b.score.total_cmp(&a.score))
        });
        results.dedup_by(|later, earlier| later.same_span(earlier));
        results
    }
}

/// Raise the score of results preceded by one of `context` words.
pub fn enhance_with_context(text: &str, results: &mut [RecognizerResult], context: &[String]) {
    if context.is_empty() {
        return;
    }

    for result in results.iter_mut() {
        if has_context_word(text, result.start, context) {
            let boosted = (result.score + CONTEXT_SIMILARITY_FACTOR).max(MIN_SCORE_WITH_CONTEXT);
            result.score = boosted.min(1.0);
        }
    }
}

/// Check the words right before `position` against a lowercase word list.
fn has_context_word(text: &str, position: usize, words: &[String]) -> bool {
    let Some(prefix) = text.get(..position) else {
        return false;
    };

    prefix
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .rev()
        .take(CONTEXT_PREFIX_COUNT)
        .any(|w| {
            let w = w.to_lowercase();
            words.iter().any(|ctx| *ctx == w)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_recognizer() -> PatternRecognizer {
        let pattern = Pattern::new("order", r"\bORD-\d{4}\b", 0.3).unwrap();
        PatternRecognizer::new("OrderRecognizer", EntityType::Person, vec![pattern])
            .with_context(&["order"])
    }

    #[test]
    fn test_pattern_matches_are_reported() {
        let recognizer = order_recognizer();
        let results = recognizer.analyze("ref ORD-1234 and ORD-9999", &[]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].start, 4);
        assert_eq!(results[0].end, 12);
        assert_eq!(results[0].recognizer, "OrderRecognizer");
    }

    #[test]
    fn test_entity_filter_skips_recognizer() {
        let recognizer = order_recognizer();
        let results = recognizer.analyze("ref ORD-1234", &[EntityType::EmailAddress]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_pii_group_narrows_span() {
        let pattern = Pattern::new("after-colon", r"id:\s*(?P<pii>\d+)", 0.5).unwrap();
        let recognizer = PatternRecognizer::new("Ids", EntityType::UsSsn, vec![pattern]);

        let results = recognizer.analyze("user id: 42", &[]);
        assert_eq!(results.len(), 1);
        assert_eq!(&"user id: 42"[results[0].start..results[0].end], "42");
    }

    #[test]
    fn test_validator_drops_candidates() {
        let pattern = Pattern::new("digits", r"\d+", 0.5).unwrap();
        let recognizer = PatternRecognizer::new("Even", EntityType::UsSsn, vec![pattern])
            .with_validator(|s| s.len() % 2 == 0);

        let results = recognizer.analyze("1 22 333 4444", &[]);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_deny_context_drops_candidates() {
        let pattern = Pattern::new("digits", r"\b\d{3}\b", 0.5).unwrap();
        let recognizer = PatternRecognizer::new("Codes", EntityType::UsSsn, vec![pattern])
            .with_deny_context(&["room"]);

        let results = recognizer.analyze("room 101 and then later on we got code 202", &[]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].start, 39);
    }

    #[test]
    fn test_context_boosts_score() {
        let recognizer = order_recognizer();
        let text = "Your order number is ORD-1234";
        let mut results = recognizer.analyze(text, &[]);
        enhance_with_context(text, &mut results, recognizer.context());

        assert!((results[0].score - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_context_outside_window_is_ignored() {
        let recognizer = order_recognizer();
        let text = "order one two three four five six ORD-1234";
        let mut results = recognizer.analyze(text, &[]);
        enhance_with_context(text, &mut results, recognizer.context());

        assert!((results[0].score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_context_boost_has_a_floor() {
        let text = "order ref-7";
        let mut results = vec![RecognizerResult::new(EntityType::Person, 6, 11, 0.01)];
        enhance_with_context(text, &mut results, &["order".to_string()]);
        assert!((results[0].score - MIN_SCORE_WITH_CONTEXT).abs() < 1e-9);
    }

    #[test]
    fn test_whitespace_backoff_drops_trailing_words() {
        let pattern = Pattern::new("words", r"\b[A-Z]+(?: [A-Z]+)*\b", 0.5).unwrap();
        let recognizer = PatternRecognizer::new("Pairs", EntityType::Person, vec![pattern])
            .with_validator(|s| s.split(' ').count() == 2);

        assert!(recognizer.analyze("AB CD EF", &[]).is_empty());

        let recognizer = recognizer.with_whitespace_backoff();
        let results = recognizer.analyze("AB CD EF", &[]);
        assert_eq!(results.len(), 1);
        assert_eq!((results[0].start, results[0].end), (0, 5));
    }

    #[test]
    fn test_context_boost_is_capped() {
        let text = "email a";
        let mut results = vec![RecognizerResult::new(EntityType::EmailAddress, 6, 7, 0.9)];
        enhance_with_context(text, &mut results, &["email".to_string()]);
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = Pattern::new("broken", r"(unclosed", 0.5).unwrap_err();
        assert!(matches!(err, PiiError::InvalidPattern { name, .. } if name == "broken"));
    }
}
