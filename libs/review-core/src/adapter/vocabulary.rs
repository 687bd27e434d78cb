//! Adapter for vocabulary entries.

use super::{
    clamp_difficulty, jlpt_weight, mask_for_listening, select_distractors, wrong_kind,
    ContentAdapter,
};
use crate::error::Result;
use crate::types::{
    ContentKind, ContentMetadata, MediaRefs, RawContent, ReviewMode, ReviewableContent,
};

#[derive(Debug, Default)]
pub struct VocabularyAdapter;

impl ContentAdapter for VocabularyAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Vocabulary
    }

    fn transform(&self, raw: &RawContent) -> Result<ReviewableContent> {
        let entry = match raw {
            RawContent::Vocabulary(entry) => entry,
            other => return Err(wrong_kind(self.kind(), other)),
        };

        let primary_answer = entry.meanings.first().cloned().unwrap_or_default();
        let alternatives: Vec<String> = entry.meanings.iter().skip(1).cloned().collect();

        Ok(ReviewableContent {
            id: entry.id.clone(),
            kind: self.kind(),
            primary_display: entry.word.clone(),
            secondary_display: Some(entry.meanings.join(", ")),
            tertiary_display: if entry.reading.is_empty() {
                None
            } else {
                Some(entry.reading.clone())
            },
            primary_answer,
            alternative_answers: alternatives,
            media: MediaRefs {
                audio_url: entry.audio_url.clone(),
                image_url: None,
            },
            difficulty: self.calculate_difficulty(raw),
            tags: entry.tags.clone(),
            supported_modes: self.supported_modes(),
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Vocabulary {
                part_of_speech: entry.part_of_speech.clone(),
                jlpt_level: entry.jlpt_level,
                irregular: entry.irregular,
            },
        })
    }

    fn generate_options(
        &self,
        content: &ReviewableContent,
        pool: &[ReviewableContent],
        count: usize,
    ) -> Vec<ReviewableContent> {
        let (pos, jlpt) = match &content.metadata {
            ContentMetadata::Vocabulary {
                part_of_speech,
                jlpt_level,
                ..
            } => (part_of_speech.clone(), *jlpt_level),
            _ => (String::new(), 5),
        };
        let word_len = content.primary_display.chars().count();

        // Same part of speech reads most plausibly, then same JLPT level,
        // then words of similar length.
        select_distractors(content, pool, count, move |candidate| {
            match &candidate.metadata {
                ContentMetadata::Vocabulary {
                    part_of_speech: p,
                    jlpt_level: j,
                    ..
                } => {
                    if *p == pos {
                        0
                    } else if *j == jlpt {
                        1
                    } else if candidate.primary_display.chars().count().abs_diff(word_len) <= 1 {
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
        vec![
            ReviewMode::Recognition,
            ReviewMode::Recall,
            ReviewMode::Listening,
        ]
    }

    fn prepare_for_mode(&self, content: &ReviewableContent, mode: ReviewMode) -> ReviewableContent {
        match mode {
            ReviewMode::Recognition => content.clone(),
            ReviewMode::Recall => {
                // Show the meaning, expect the word (reading also accepted).
                let mut prepared = content.clone();
                prepared.primary_display = content
                    .secondary_display
                    .clone()
                    .unwrap_or_else(|| content.primary_answer.clone());
                prepared.secondary_display = None;
                prepared.primary_answer = content.primary_display.clone();
                prepared.alternative_answers = content
                    .tertiary_display
                    .clone()
                    .into_iter()
                    .collect();
                prepared.tertiary_display = None;
                prepared
            }
            ReviewMode::Listening => mask_for_listening(content),
        }
    }

    fn calculate_difficulty(&self, raw: &RawContent) -> f64 {
        let entry = match raw {
            RawContent::Vocabulary(entry) => entry,
            _ => return 0.5,
        };

        let level = jlpt_weight(entry.jlpt_level) * 0.4;
        let length = (entry.word.chars().count() as f64 / 8.0).min(1.0) * 0.2;
        let multiplicity = ((entry.meanings.len() as f64 - 1.0).max(0.0) / 4.0).min(1.0) * 0.2;
        let irregular = if entry.irregular { 0.2 } else { 0.0 };

        clamp_difficulty(level + length + multiplicity + irregular)
    }

    fn generate_hints(&self, content: &ReviewableContent) -> Vec<String> {
        let pos = match &content.metadata {
            ContentMetadata::Vocabulary { part_of_speech, .. } => part_of_speech.clone(),
            _ => "word".to_string(),
        };
        let first = content.primary_answer.chars().next().unwrap_or('?');

        vec![
            format!("It's a {pos}"),
            format!("The meaning starts with '{first}'"),
            format!(
                "The meaning has {} letters",
                content.primary_answer.chars().count()
            ),
        ]
    }
}
