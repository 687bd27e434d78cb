//! Adapter for example sentences.

use super::{
    clamp_difficulty, jlpt_weight, mask_for_listening, select_distractors, wrong_kind,
    ContentAdapter,
};
use crate::error::Result;
use crate::types::{
    ContentKind, ContentMetadata, MediaRefs, RawContent, ReviewMode, ReviewableContent,
};

/// Coarse length measure: words when the text has spaces, characters
/// otherwise (Japanese text is typically unspaced).
fn unit_count(text: &str) -> usize {
    if text.contains(' ') {
        text.split_whitespace().count()
    } else {
        text.chars().count()
    }
}

#[derive(Debug, Default)]
pub struct SentenceAdapter;

impl ContentAdapter for SentenceAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Sentence
    }

    fn transform(&self, raw: &RawContent) -> Result<ReviewableContent> {
        let entry = match raw {
            RawContent::Sentence(entry) => entry,
            other => return Err(wrong_kind(self.kind(), other)),
        };

        Ok(ReviewableContent {
            id: entry.id.clone(),
            kind: self.kind(),
            primary_display: entry.text.clone(),
            secondary_display: Some(entry.translation.clone()),
            tertiary_display: entry.reading.clone(),
            primary_answer: entry.translation.clone(),
            alternative_answers: vec![],
            media: MediaRefs {
                audio_url: entry.audio_url.clone(),
                image_url: None,
            },
            difficulty: self.calculate_difficulty(raw),
            tags: entry.tags.clone(),
            supported_modes: self.supported_modes(),
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Sentence {
                grammar_points: entry.grammar_points.clone(),
                word_count: unit_count(&entry.text),
                jlpt_level: entry.jlpt_level,
            },
        })
    }

    fn generate_options(
        &self,
        content: &ReviewableContent,
        pool: &[ReviewableContent],
        count: usize,
    ) -> Vec<ReviewableContent> {
        let (grammar, jlpt, words) = match &content.metadata {
            ContentMetadata::Sentence {
                grammar_points,
                jlpt_level,
                word_count,
            } => (grammar_points.clone(), *jlpt_level, *word_count),
            _ => (Vec::new(), 5, 0),
        };

        // Sentences exercising the same grammar point are the most
        // confusable, then the same JLPT level, then similar length.
        select_distractors(content, pool, count, move |candidate| {
            match &candidate.metadata {
                ContentMetadata::Sentence {
                    grammar_points: g,
                    jlpt_level: j,
                    word_count: w,
                } => {
                    if !grammar.is_empty() && g.iter().any(|x| grammar.contains(x)) {
                        0
                    } else if *j == jlpt {
                        1
                    } else if w.abs_diff(words) <= 2 {
                        2
                    } else {
                        3
                    }
                }
                _ => 4,
            }
        })
    }

    fn supported_modes(&self) -> Vec<ReviewMode> {
        vec![ReviewMode::Recognition, ReviewMode::Listening]
    }

    fn prepare_for_mode(&self, content: &ReviewableContent, mode: ReviewMode) -> ReviewableContent {
        match mode {
            ReviewMode::Recognition => content.clone(),
            ReviewMode::Listening => mask_for_listening(content),
            // Recall (translation to source text) is not offered.
            ReviewMode::Recall => content.clone(),
        }
    }

    fn calculate_difficulty(&self, raw: &RawContent) -> f64 {
        let entry = match raw {
            RawContent::Sentence(entry) => entry,
            _ => return 0.5,
        };

        let level = jlpt_weight(entry.jlpt_level) * 0.4;
        let length = (unit_count(&entry.text) as f64 / 20.0).min(1.0) * 0.3;
        let grammar = (entry.grammar_points.len() as f64 / 4.0).min(1.0) * 0.3;

        clamp_difficulty(level + length + grammar)
    }

    fn generate_hints(&self, content: &ReviewableContent) -> Vec<String> {
        let grammar = match &content.metadata {
            ContentMetadata::Sentence { grammar_points, .. } => grammar_points
                .first()
                .cloned()
                .unwrap_or_else(|| "basic structure".to_string()),
            _ => "basic structure".to_string(),
        };
        let first_word = content
            .primary_answer
            .split_whitespace()
            .next()
            .unwrap_or("?");

        vec![
            format!("Uses the grammar point: {grammar}"),
            format!("The translation begins with \"{first_word}\""),
            format!(
                "The translation has {} words",
                content.primary_answer.split_whitespace().count()
            ),
        ]
    }
}
