//! Adapter for ideographic characters.

use super::{clamp_difficulty, jlpt_weight, select_distractors, wrong_kind, ContentAdapter};
use crate::error::Result;
use crate::types::{
    ContentKind, ContentMetadata, MediaRefs, RawContent, ReviewMode, ReviewableContent,
};

#[derive(Debug, Default)]
pub struct KanjiAdapter;

impl ContentAdapter for KanjiAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Kanji
    }

    fn transform(&self, raw: &RawContent) -> Result<ReviewableContent> {
        let entry = match raw {
            RawContent::Kanji(entry) => entry,
            other => return Err(wrong_kind(self.kind(), other)),
        };

        let primary_answer = entry.meanings.first().cloned().unwrap_or_default();
        let mut alternatives: Vec<String> = entry.meanings.iter().skip(1).cloned().collect();
        alternatives.extend(entry.kunyomi.iter().cloned());
        alternatives.extend(entry.onyomi.iter().cloned());

        let readings: Vec<&str> = entry
            .kunyomi
            .iter()
            .chain(entry.onyomi.iter())
            .map(|s| s.as_str())
            .collect();

        Ok(ReviewableContent {
            id: entry.id.clone(),
            kind: self.kind(),
            primary_display: entry.character.clone(),
            secondary_display: Some(entry.meanings.join(", ")),
            tertiary_display: if readings.is_empty() {
                None
            } else {
                Some(readings.join("、"))
            },
            primary_answer,
            alternative_answers: alternatives,
            media: MediaRefs::default(),
            difficulty: self.calculate_difficulty(raw),
            tags: entry.tags.clone(),
            supported_modes: self.supported_modes(),
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Kanji {
                stroke_count: entry.stroke_count,
                jlpt_level: entry.jlpt_level,
                components: entry.components.clone(),
            },
        })
    }

    fn generate_options(
        &self,
        content: &ReviewableContent,
        pool: &[ReviewableContent],
        count: usize,
    ) -> Vec<ReviewableContent> {
        let (components, jlpt, strokes) = match &content.metadata {
            ContentMetadata::Kanji {
                components,
                jlpt_level,
                stroke_count,
            } => (components.clone(), *jlpt_level, *stroke_count),
            _ => (Vec::new(), 5, 0),
        };

        // Shared graphical components first (visually confusable), then the
        // same JLPT level, then similar stroke counts.
        select_distractors(content, pool, count, move |candidate| {
            match &candidate.metadata {
                ContentMetadata::Kanji {
                    components: c,
                    jlpt_level: j,
                    stroke_count: s,
                } => {
                    if !components.is_empty() && c.iter().any(|x| components.contains(x)) {
                        0
                    } else if *j == jlpt {
                        1
                    } else if s.abs_diff(strokes) <= 2 {
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
        vec![ReviewMode::Recognition, ReviewMode::Recall]
    }

    fn prepare_for_mode(&self, content: &ReviewableContent, mode: ReviewMode) -> ReviewableContent {
        match mode {
            ReviewMode::Recognition => content.clone(),
            ReviewMode::Recall => {
                // Show the meaning, expect the character back.
                let mut prepared = content.clone();
                prepared.primary_display = content
                    .secondary_display
                    .clone()
                    .unwrap_or_else(|| content.primary_answer.clone());
                prepared.secondary_display = None;
                prepared.tertiary_display = None;
                prepared.primary_answer = content.primary_display.clone();
                prepared.alternative_answers = Vec::new();
                prepared
            }
            // No audio for bare ideographs.
            ReviewMode::Listening => content.clone(),
        }
    }

    fn calculate_difficulty(&self, raw: &RawContent) -> f64 {
        let entry = match raw {
            RawContent::Kanji(entry) => entry,
            _ => return 0.5,
        };

        let level = jlpt_weight(entry.jlpt_level) * 0.5;
        let strokes = (entry.stroke_count as f64 / 25.0).min(1.0) * 0.3;
        let readings = entry.onyomi.len() + entry.kunyomi.len();
        let multiplicity = ((entry.meanings.len() + readings) as f64 / 8.0).min(1.0) * 0.2;

        clamp_difficulty(level + strokes + multiplicity)
    }

    fn generate_hints(&self, content: &ReviewableContent) -> Vec<String> {
        let (strokes, jlpt) = match &content.metadata {
            ContentMetadata::Kanji {
                stroke_count,
                jlpt_level,
                ..
            } => (*stroke_count, *jlpt_level),
            _ => (0, 5),
        };
        let first = content.primary_answer.chars().next().unwrap_or('?');

        vec![
            format!("JLPT level N{jlpt}"),
            format!("The meaning starts with '{first}'"),
            format!("Written with {strokes} strokes"),
        ]
    }
}
