//! Per-content-type configuration.
//!
//! A host supplies a (possibly partial) map of [`ContentTypeConfig`] at
//! startup; [`merge_with_defaults`] fills in built-in defaults for the five
//! core content kinds. Configs are loaded once at registry initialization
//! and never mutated afterwards.

use crate::text::NormalizeOptions;
use crate::types::{ContentKind, ReviewMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Validation strategy selector, resolved per content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    Exact,
    Fuzzy,
    Custom,
}

/// Options for the validator of one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOptions {
    pub strategy: ValidationStrategy,
    /// Similarity at or above this is a full match under the fuzzy strategy.
    pub similarity_threshold: f64,
    /// Similarity at or above this (but below the threshold) earns partial
    /// credit equal to the similarity.
    pub partial_credit_floor: f64,
    /// Normalization applied to both sides before comparison.
    pub normalize: NormalizeOptions,
    /// Accept input in a converted script (romaji for kana and vice versa).
    pub allow_script_conversion: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strategy: ValidationStrategy::Fuzzy,
            similarity_threshold: 0.85,
            partial_credit_floor: 0.6,
            normalize: NormalizeOptions::default(),
            allow_script_conversion: false,
        }
    }
}

/// How answers are entered in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    MultipleChoice,
    Typed,
}

/// Display/input/hint/audio rules for one review mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    pub mode: ReviewMode,
    pub input: InputKind,
    pub hints_enabled: bool,
    pub audio_enabled: bool,
}

/// Feature flags affecting presentation only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    pub show_stroke_order: bool,
    pub show_grammar_notes: bool,
    pub show_furigana: bool,
}

/// Full configuration for one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeConfig {
    pub kind: ContentKind,
    pub modes: Vec<ModeConfig>,
    pub default_mode: ReviewMode,
    pub validation: ValidationOptions,
    #[serde(default)]
    pub display: DisplayPreferences,
}

impl ContentTypeConfig {
    /// Built-in default for a content kind.
    pub fn default_for(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Kana => Self {
                kind,
                modes: vec![
                    mode(ReviewMode::Recognition, InputKind::MultipleChoice),
                    mode(ReviewMode::Recall, InputKind::Typed),
                    mode(ReviewMode::Listening, InputKind::Typed),
                ],
                default_mode: ReviewMode::Recognition,
                validation: ValidationOptions {
                    strategy: ValidationStrategy::Custom,
                    similarity_threshold: 1.0,
                    partial_credit_floor: 1.0,
                    normalize: NormalizeOptions::japanese(),
                    allow_script_conversion: true,
                },
                display: DisplayPreferences::default(),
            },
            ContentKind::Kanji => Self {
                kind,
                modes: vec![
                    mode(ReviewMode::Recognition, InputKind::Typed),
                    mode(ReviewMode::Recall, InputKind::MultipleChoice),
                ],
                default_mode: ReviewMode::Recognition,
                validation: ValidationOptions {
                    strategy: ValidationStrategy::Custom,
                    similarity_threshold: 0.85,
                    partial_credit_floor: 0.7,
                    normalize: NormalizeOptions::japanese(),
                    allow_script_conversion: true,
                },
                display: DisplayPreferences {
                    show_stroke_order: true,
                    ..DisplayPreferences::default()
                },
            },
            ContentKind::Vocabulary => Self {
                kind,
                modes: vec![
                    mode(ReviewMode::Recognition, InputKind::Typed),
                    mode(ReviewMode::Recall, InputKind::Typed),
                    mode(ReviewMode::Listening, InputKind::Typed),
                ],
                default_mode: ReviewMode::Recognition,
                validation: ValidationOptions {
                    strategy: ValidationStrategy::Custom,
                    similarity_threshold: 0.85,
                    partial_credit_floor: 0.7,
                    normalize: NormalizeOptions::default(),
                    allow_script_conversion: true,
                },
                display: DisplayPreferences {
                    show_furigana: true,
                    ..DisplayPreferences::default()
                },
            },
            ContentKind::Sentence => Self {
                kind,
                modes: vec![
                    mode(ReviewMode::Recognition, InputKind::Typed),
                    mode(ReviewMode::Listening, InputKind::Typed),
                ],
                default_mode: ReviewMode::Recognition,
                validation: ValidationOptions {
                    strategy: ValidationStrategy::Custom,
                    similarity_threshold: 0.8,
                    partial_credit_floor: 0.5,
                    normalize: NormalizeOptions {
                        strip_punctuation: true,
                        ..NormalizeOptions::default()
                    },
                    allow_script_conversion: false,
                },
                display: DisplayPreferences {
                    show_grammar_notes: true,
                    show_furigana: true,
                    ..DisplayPreferences::default()
                },
            },
            ContentKind::Custom => Self {
                kind,
                modes: vec![
                    mode(ReviewMode::Recognition, InputKind::Typed),
                    mode(ReviewMode::Recall, InputKind::Typed),
                ],
                default_mode: ReviewMode::Recognition,
                validation: ValidationOptions::default(),
                display: DisplayPreferences::default(),
            },
        }
    }
}

fn mode(mode: ReviewMode, input: InputKind) -> ModeConfig {
    ModeConfig {
        mode,
        input,
        hints_enabled: true,
        audio_enabled: matches!(mode, ReviewMode::Listening),
    }
}

/// Merge a partial config map over the built-in defaults. Every core kind is
/// guaranteed a config in the result; supplied entries win over defaults,
/// including entries for non-core kinds a host may add.
pub fn merge_with_defaults(
    overrides: HashMap<ContentKind, ContentTypeConfig>,
) -> HashMap<ContentKind, ContentTypeConfig> {
    let mut merged: HashMap<ContentKind, ContentTypeConfig> = ContentKind::CORE
        .iter()
        .map(|kind| (*kind, ContentTypeConfig::default_for(*kind)))
        .collect();
    merged.extend(overrides);
    merged
}
