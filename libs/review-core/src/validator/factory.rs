//! Validator factory.
//!
//! Builds the right validator for a (content kind, options) pair and caches
//! instances, since hosts resolve a validator on every answer. The cache is
//! explicitly clearable for test isolation.

use super::{
    kana::KanaValidator, kanji::KanjiValidator, sentence::SentenceValidator,
    vocabulary::VocabularyValidator, AnswerValidator, ExactValidator, FuzzyValidator,
};
use crate::config::{ValidationOptions, ValidationStrategy};
use crate::types::ContentKind;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Default)]
pub struct ValidatorFactory {
    cache: Mutex<HashMap<String, Arc<dyn AnswerValidator>>>,
}

impl ValidatorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a validator for a content kind and options, reusing a cached
    /// instance when one exists.
    pub fn get(&self, kind: ContentKind, options: &ValidationOptions) -> Arc<dyn AnswerValidator> {
        let key = cache_key(kind, options);

        let mut cache = self.cache.lock().expect("validator cache lock");
        if let Some(validator) = cache.get(&key) {
            return Arc::clone(validator);
        }

        debug!(kind = %kind, strategy = ?options.strategy, "building validator");
        let validator = build(kind, options.clone());
        cache.insert(key, Arc::clone(&validator));
        validator
    }

    /// Drop all cached instances.
    pub fn clear(&self) {
        self.cache.lock().expect("validator cache lock").clear();
    }

    #[cfg(test)]
    fn cached_count(&self) -> usize {
        self.cache.lock().expect("validator cache lock").len()
    }
}

fn build(kind: ContentKind, options: ValidationOptions) -> Arc<dyn AnswerValidator> {
    match options.strategy {
        ValidationStrategy::Exact => Arc::new(ExactValidator { options }),
        ValidationStrategy::Fuzzy => Arc::new(FuzzyValidator { options }),
        ValidationStrategy::Custom => match kind {
            ContentKind::Kana => Arc::new(KanaValidator { options }),
            ContentKind::Kanji => Arc::new(KanjiValidator { options }),
            ContentKind::Vocabulary => Arc::new(VocabularyValidator { options }),
            ContentKind::Sentence => Arc::new(SentenceValidator { options }),
            // No custom rules exist for freeform cards.
            ContentKind::Custom => Arc::new(FuzzyValidator { options }),
        },
    }
}

fn cache_key(kind: ContentKind, options: &ValidationOptions) -> String {
    // Options are plain data; their JSON form is a stable fingerprint.
    let fingerprint = serde_json::to_string(options).unwrap_or_default();
    format!("{kind}:{fingerprint}")
}
