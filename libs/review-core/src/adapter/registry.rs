//! Adapter registry.
//!
//! Built once at startup from a (possibly partial) configuration map and
//! read-only afterwards, so it is safe to share behind an `Arc` across
//! sessions. Unknown content-type tags resolve to the custom adapter
//! instead of failing.

use super::{
    custom::CustomAdapter, kana::KanaAdapter, kanji::KanjiAdapter, sentence::SentenceAdapter,
    vocabulary::VocabularyAdapter, ContentAdapter,
};
use crate::config::{merge_with_defaults, ContentTypeConfig};
use crate::error::{ReviewError, Result};
use crate::types::ContentKind;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn ContentAdapter>>,
    configs: HashMap<ContentKind, ContentTypeConfig>,
    fallback: Arc<dyn ContentAdapter>,
}

impl AdapterRegistry {
    /// Build a registry from a partial config map merged over built-in
    /// defaults, with one adapter per core content kind.
    pub fn new(overrides: HashMap<ContentKind, ContentTypeConfig>) -> Self {
        let configs = merge_with_defaults(overrides);

        let mut adapters: HashMap<String, Arc<dyn ContentAdapter>> = HashMap::new();
        adapters.insert(
            ContentKind::Kana.as_str().to_string(),
            Arc::new(KanaAdapter),
        );
        adapters.insert(
            ContentKind::Kanji.as_str().to_string(),
            Arc::new(KanjiAdapter),
        );
        adapters.insert(
            ContentKind::Vocabulary.as_str().to_string(),
            Arc::new(VocabularyAdapter),
        );
        adapters.insert(
            ContentKind::Sentence.as_str().to_string(),
            Arc::new(SentenceAdapter),
        );
        adapters.insert(
            ContentKind::Custom.as_str().to_string(),
            Arc::new(CustomAdapter),
        );

        debug!(kinds = adapters.len(), "adapter registry initialized");

        Self {
            adapters,
            configs,
            fallback: Arc::new(CustomAdapter),
        }
    }

    /// Registry with all defaults.
    pub fn with_defaults() -> Self {
        Self::new(HashMap::new())
    }

    /// Look up the adapter for a content-type tag. Unknown tags fall back
    /// to the custom adapter.
    pub fn get(&self, content_type: &str) -> Arc<dyn ContentAdapter> {
        match self.adapters.get(content_type) {
            Some(adapter) => Arc::clone(adapter),
            None => {
                debug!(content_type, "unknown content type, using fallback adapter");
                Arc::clone(&self.fallback)
            }
        }
    }

    /// Adapter for a core content kind.
    pub fn get_for_kind(&self, kind: ContentKind) -> Arc<dyn ContentAdapter> {
        self.get(kind.as_str())
    }

    /// Configuration for a core content kind. Always present after
    /// initialization.
    pub fn config(&self, kind: ContentKind) -> &ContentTypeConfig {
        self.configs
            .get(&kind)
            .expect("core kind config present after merge")
    }

    /// Register an adapter under a new content-type tag.
    pub fn register(&mut self, tag: impl Into<String>, adapter: Arc<dyn ContentAdapter>) {
        let tag = tag.into();
        debug!(tag = %tag, "registering content adapter");
        self.adapters.insert(tag, adapter);
    }

    /// Remove an extension adapter. Core content types cannot be removed.
    pub fn unregister(&mut self, tag: &str) -> Result<()> {
        if tag.parse::<ContentKind>().is_ok() {
            return Err(ReviewError::Configuration(format!(
                "cannot unregister core content type '{tag}'"
            )));
        }
        self.adapters.remove(tag);
        Ok(())
    }

    pub fn registered_tags(&self) -> Vec<&str> {
        self.adapters.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_kinds_resolve_to_their_adapters() {
        let registry = AdapterRegistry::with_defaults();
        for kind in ContentKind::CORE {
            assert_eq!(registry.get_for_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_custom() {
        let registry = AdapterRegistry::with_defaults();
        let adapter = registry.get("medical-terminology");
        assert_eq!(adapter.kind(), ContentKind::Custom);
    }

    #[test]
    fn unregistering_core_kind_is_rejected() {
        let mut registry = AdapterRegistry::with_defaults();
        let err = registry.unregister("kana").unwrap_err();
        assert!(err.to_string().contains("core content type"));
        // Still resolvable afterwards.
        assert_eq!(registry.get("kana").kind(), ContentKind::Kana);
    }

    #[test]
    fn extension_tags_can_come_and_go() {
        let mut registry = AdapterRegistry::with_defaults();
        registry.register("idioms", Arc::new(CustomAdapter));
        assert!(registry.registered_tags().contains(&"idioms"));
        registry.unregister("idioms").unwrap();
        assert!(!registry.registered_tags().contains(&"idioms"));
    }

    #[test]
    fn config_available_for_every_core_kind() {
        let registry = AdapterRegistry::with_defaults();
        for kind in ContentKind::CORE {
            assert_eq!(registry.config(kind).kind, kind);
        }
    }
}
