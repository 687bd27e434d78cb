//! Adapter for user-authored cards; also the registry fallback for unknown
//! content types.

use super::{clamp_difficulty, select_distractors, wrong_kind, ContentAdapter};
use crate::error::Result;
use crate::types::{
    ContentKind, ContentMetadata, MediaRefs, RawContent, ReviewMode, ReviewableContent,
};

#[derive(Debug, Default)]
pub struct CustomAdapter;

impl ContentAdapter for CustomAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Custom
    }

    fn transform(&self, raw: &RawContent) -> Result<ReviewableContent> {
        let entry = match raw {
            RawContent::Custom(entry) => entry,
            other => return Err(wrong_kind(self.kind(), other)),
        };

        Ok(ReviewableContent {
            id: entry.id.clone(),
            kind: self.kind(),
            primary_display: entry.front.clone(),
            secondary_display: None,
            tertiary_display: None,
            primary_answer: entry.back.clone(),
            alternative_answers: entry.alternatives.clone(),
            media: MediaRefs::default(),
            difficulty: self.calculate_difficulty(raw),
            tags: entry.tags.clone(),
            supported_modes: self.supported_modes(),
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Custom {
                notes: entry.notes.clone(),
            },
        })
    }

    fn generate_options(
        &self,
        content: &ReviewableContent,
        pool: &[ReviewableContent],
        count: usize,
    ) -> Vec<ReviewableContent> {
        let tags = content.tags.clone();
        let answer_len = content.primary_answer.chars().count();

        // Only tags and answer length are known for freeform cards.
        select_distractors(content, pool, count, move |candidate| {
            if !tags.is_empty() && candidate.tags.iter().any(|t| tags.contains(t)) {
                0
            } else if candidate
                .primary_answer
                .chars()
                .count()
                .abs_diff(answer_len)
                <= 3
            {
                1
            } else {
                2
            }
        })
    }

    fn supported_modes(&self) -> Vec<ReviewMode> {
        vec![ReviewMode::Recognition, ReviewMode::Recall]
    }

    fn prepare_for_mode(&self, content: &ReviewableContent, mode: ReviewMode) -> ReviewableContent {
        match mode {
            ReviewMode::Recognition => content.clone(),
            ReviewMode::Recall => {
                let mut prepared = content.clone();
                prepared.primary_display = content.primary_answer.clone();
                prepared.primary_answer = content.primary_display.clone();
                prepared.alternative_answers = Vec::new();
                prepared
            }
            ReviewMode::Listening => content.clone(),
        }
    }

    fn calculate_difficulty(&self, raw: &RawContent) -> f64 {
        let entry = match raw {
            RawContent::Custom(entry) => entry,
            _ => return 0.5,
        };

        // Freeform cards only expose length signals.
        let answer = (entry.back.chars().count() as f64 / 20.0).min(1.0) * 0.5;
        let prompt = (entry.front.chars().count() as f64 / 40.0).min(1.0) * 0.2;

        clamp_difficulty(0.2 + answer + prompt)
    }

    fn generate_hints(&self, content: &ReviewableContent) -> Vec<String> {
        let category = content
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| "your own cards".to_string());
        let first = content.primary_answer.chars().next().unwrap_or('?');

        vec![
            format!("From: {category}"),
            format!("The answer starts with '{first}'"),
            format!(
                "The answer has {} characters",
                content.primary_answer.chars().count()
            ),
        ]
    }
}
