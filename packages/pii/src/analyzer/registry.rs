use std::collections::BTreeSet;
use std::sync::Arc;

use super::predefined::default_recognizers;
use super::recognizer::Recognizer;

/// The set of recognizers an analyzer runs, across all languages.
#[derive(Clone, Default)]
pub struct RecognizerRegistry {
    recognizers: Vec<Arc<dyn Recognizer>>,
}

impl RecognizerRegistry {
    /// An empty registry; nothing is detected until recognizers are added
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in recognizer
    pub fn with_predefined() -> Self {
        Self {
            recognizers: default_recognizers(),
        }
    }

    pub fn add<R: Recognizer + 'static>(&mut self, recognizer: R) {
        self.recognizers.push(Arc::new(recognizer));
    }

    /// Remove every recognizer with the given name, returning how many went
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.recognizers.len();
        self.recognizers.retain(|r| r.name() != name);
        before - self.recognizers.len()
    }

    pub fn for_language<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a Arc<dyn Recognizer>> {
        self.recognizers
            .iter()
            .filter(move |r| r.supported_language().eq_ignore_ascii_case(language))
    }

    pub fn supported_languages(&self) -> BTreeSet<String> {
        self.recognizers
            .iter()
            .map(|r| r.supported_language().to_lowercase())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

impl std::fmt::Debug for RecognizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.recognizers.iter().map(|r| r.name()))
            .finish()
    }
}
