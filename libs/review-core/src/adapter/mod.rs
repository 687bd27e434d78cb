//! Content adapters.
//!
//! One adapter per content family normalizes raw domain content into
//! [`ReviewableContent`], synthesizes distractor options and hints, and
//! reshapes items per review mode. Adapters are stateless and safe to share
//! across sessions.

pub mod custom;
pub mod kana;
pub mod kanji;
pub mod registry;
pub mod sentence;
pub mod vocabulary;

use crate::error::{ReviewError, Result};
use crate::types::{ContentKind, RawContent, ReviewMode, ReviewableContent};
use rand::seq::SliceRandom;

pub use registry::AdapterRegistry;

/// Placeholder shown in place of visual fields in listening mode.
pub const LISTENING_PLACEHOLDER: &str = "🔊";

/// Uniform contract implemented by every content family.
pub trait ContentAdapter: Send + Sync {
    /// The content kind this adapter handles.
    fn kind(&self) -> ContentKind;

    /// Normalize raw domain content into the uniform reviewable shape.
    ///
    /// Deterministic and total for this adapter's kind: required fields are
    /// always populated and missing optional data degrades gracefully.
    /// Passing raw content of another kind is a configuration mistake and
    /// returns an adapter error.
    fn transform(&self, raw: &RawContent) -> Result<ReviewableContent>;

    /// Select up to `count - 1` distractors from `pool`, best candidates
    /// first. Never includes the correct item; never pads with duplicates.
    fn generate_options(
        &self,
        content: &ReviewableContent,
        pool: &[ReviewableContent],
        count: usize,
    ) -> Vec<ReviewableContent>;

    /// Review modes this adapter can prepare content for.
    fn supported_modes(&self) -> Vec<ReviewMode>;

    /// Reshape display/answer fields for a mode. Unsupported modes return
    /// the content unchanged.
    fn prepare_for_mode(&self, content: &ReviewableContent, mode: ReviewMode) -> ReviewableContent;

    /// Difficulty estimate in [0, 1] from content-specific signals.
    fn calculate_difficulty(&self, raw: &RawContent) -> f64;

    /// Ordered hints, least to most revealing.
    fn generate_hints(&self, content: &ReviewableContent) -> Vec<String>;
}

/// Error for raw content handed to the wrong adapter.
pub(crate) fn wrong_kind(expected: ContentKind, raw: &RawContent) -> ReviewError {
    ReviewError::adapter(
        expected.as_str(),
        format!("expected {} content, got {}", expected, raw.kind()),
    )
}

/// Shared distractor selection. Candidates are scored by the adapter's
/// layered priority function (lower score wins), with difficulty proximity
/// breaking ties and a pre-shuffle randomizing order within a tier. The
/// correct item and duplicate ids are always excluded.
pub(crate) fn select_distractors<F>(
    content: &ReviewableContent,
    pool: &[ReviewableContent],
    count: usize,
    priority: F,
) -> Vec<ReviewableContent>
where
    F: Fn(&ReviewableContent) -> u32,
{
    if pool.is_empty() || count <= 1 {
        return Vec::new();
    }

    let mut candidates: Vec<&ReviewableContent> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for item in pool {
        if item.id == content.id || !seen.insert(item.id.as_str()) {
            continue;
        }
        candidates.push(item);
    }

    // Random fill within equal-priority tiers.
    candidates.shuffle(&mut rand::thread_rng());
    candidates.sort_by(|a, b| {
        priority(a).cmp(&priority(b)).then_with(|| {
            let da = (a.difficulty - content.difficulty).abs();
            let db = (b.difficulty - content.difficulty).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    candidates
        .into_iter()
        .take(count.saturating_sub(1))
        .cloned()
        .collect()
}

/// Clamp a weighted difficulty sum into [0, 1].
pub(crate) fn clamp_difficulty(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Mask every visual field for listening mode, keeping answers and audio.
pub(crate) fn mask_for_listening(content: &ReviewableContent) -> ReviewableContent {
    let mut masked = content.clone();
    masked.primary_display = LISTENING_PLACEHOLDER.to_string();
    masked.secondary_display = None;
    masked.tertiary_display = None;
    masked
}

/// Shared JLPT difficulty signal: N5 (easiest) maps to 0.0, N1 to 1.0.
pub(crate) fn jlpt_weight(jlpt_level: u8) -> f64 {
    let level = jlpt_level.clamp(1, 5) as f64;
    (5.0 - level) / 4.0
}
