//! Core content types for the review engine.

use serde::{Deserialize, Serialize};

/// Content family tag. Every adapter and validator is keyed by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Kana,
    Kanji,
    Vocabulary,
    Sentence,
    Custom,
}

impl ContentKind {
    /// The five built-in kinds, in registry initialization order.
    pub const CORE: [ContentKind; 5] = [
        Self::Kana,
        Self::Kanji,
        Self::Vocabulary,
        Self::Sentence,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kana => "kana",
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
            Self::Sentence => "sentence",
            Self::Custom => "custom",
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = crate::error::ReviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "kana" => Ok(Self::Kana),
            "kanji" => Ok(Self::Kanji),
            "vocabulary" => Ok(Self::Vocabulary),
            "sentence" => Ok(Self::Sentence),
            "custom" => Ok(Self::Custom),
            _ => Err(crate::error::ReviewError::Configuration(format!(
                "unknown content kind: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an item is presented and answered during review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    /// Show the source form, ask for meaning/reading.
    Recognition,
    /// Show the meaning, ask for the source form.
    Recall,
    /// Hide visual fields, play audio, ask for the answer.
    Listening,
}

impl Default for ReviewMode {
    fn default() -> Self {
        Self::Recognition
    }
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recognition => "recognition",
            Self::Recall => "recall",
            Self::Listening => "listening",
        }
    }
}

/// Optional media attached to a reviewable item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaRefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Kana script variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanaScript {
    Hiragana,
    Katakana,
}

impl KanaScript {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hiragana => "hiragana",
            Self::Katakana => "katakana",
        }
    }
}

/// Raw phonetic character entry (e.g. か / "ka").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanaEntry {
    pub id: String,
    pub character: String,
    pub romaji: String,
    pub script: KanaScript,
    /// Gojuon row tag, e.g. "k" for か..こ.
    pub row: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Raw ideograph entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub id: String,
    pub character: String,
    pub meanings: Vec<String>,
    #[serde(default)]
    pub onyomi: Vec<String>,
    #[serde(default)]
    pub kunyomi: Vec<String>,
    pub stroke_count: u32,
    /// JLPT level, 5 (easiest) down to 1.
    pub jlpt_level: u8,
    /// Graphical components, used for distractor selection.
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Raw vocabulary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,
    pub reading: String,
    pub meanings: Vec<String>,
    pub part_of_speech: String,
    pub jlpt_level: u8,
    #[serde(default)]
    pub irregular: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Raw sentence entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceEntry {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    pub translation: String,
    #[serde(default)]
    pub grammar_points: Vec<String>,
    pub jlpt_level: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Raw user-authored card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEntry {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Domain content before adapter transformation, tagged by family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawContent {
    Kana(KanaEntry),
    Kanji(KanjiEntry),
    Vocabulary(VocabularyEntry),
    Sentence(SentenceEntry),
    Custom(CustomEntry),
}

impl RawContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Kana(_) => ContentKind::Kana,
            Self::Kanji(_) => ContentKind::Kanji,
            Self::Vocabulary(_) => ContentKind::Vocabulary,
            Self::Sentence(_) => ContentKind::Sentence,
            Self::Custom(_) => ContentKind::Custom,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Kana(e) => &e.id,
            Self::Kanji(e) => &e.id,
            Self::Vocabulary(e) => &e.id,
            Self::Sentence(e) => &e.id,
            Self::Custom(e) => &e.id,
        }
    }
}

/// Content-specific extra fields, one closed variant per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentMetadata {
    Kana {
        script: KanaScript,
        row: String,
    },
    Kanji {
        stroke_count: u32,
        jlpt_level: u8,
        components: Vec<String>,
    },
    Vocabulary {
        part_of_speech: String,
        jlpt_level: u8,
        irregular: bool,
    },
    Sentence {
        grammar_points: Vec<String>,
        word_count: usize,
        jlpt_level: u8,
    },
    Custom {
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
}

/// The uniform reviewable shape every adapter produces.
///
/// Invariants: `difficulty` is in [0, 1]; `supported_modes` is non-empty;
/// `primary_answer` may be empty but never absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewableContent {
    pub id: String,
    pub kind: ContentKind,
    /// Main display field, e.g. the character itself.
    pub primary_display: String,
    /// Secondary field, e.g. the meaning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_display: Option<String>,
    /// Tertiary field, e.g. the reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tertiary_display: Option<String>,
    pub primary_answer: String,
    #[serde(default)]
    pub alternative_answers: Vec<String>,
    #[serde(default)]
    pub media: MediaRefs,
    pub difficulty: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub supported_modes: Vec<ReviewMode>,
    pub preferred_mode: ReviewMode,
    pub metadata: ContentMetadata,
}

impl ReviewableContent {
    /// All accepted answers: primary first, then alternatives.
    pub fn all_answers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_answer.as_str())
            .chain(self.alternative_answers.iter().map(|s| s.as_str()))
    }

    pub fn supports_mode(&self, mode: ReviewMode) -> bool {
        self.supported_modes.contains(&mode)
    }
}
