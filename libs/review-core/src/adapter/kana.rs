//! Adapter for phonetic characters (hiragana/katakana).

use super::{
    clamp_difficulty, mask_for_listening, select_distractors, wrong_kind, ContentAdapter,
};
use crate::error::Result;
use crate::types::{
    ContentKind, ContentMetadata, KanaScript, MediaRefs, RawContent, ReviewMode, ReviewableContent,
};

/// Rows carrying dakuten/handakuten marks, harder for beginners.
const VOICED_ROWS: &[&str] = &["g", "z", "d", "b", "p"];

#[derive(Debug, Default)]
pub struct KanaAdapter;

impl ContentAdapter for KanaAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Kana
    }

    fn transform(&self, raw: &RawContent) -> Result<ReviewableContent> {
        let entry = match raw {
            RawContent::Kana(entry) => entry,
            other => return Err(wrong_kind(self.kind(), other)),
        };

        Ok(ReviewableContent {
            id: entry.id.clone(),
            kind: self.kind(),
            primary_display: entry.character.clone(),
            secondary_display: None,
            tertiary_display: None,
            primary_answer: entry.romaji.clone(),
            // The character itself is accepted so kana input passes too.
            alternative_answers: vec![entry.character.clone()],
            media: MediaRefs {
                audio_url: entry.audio_url.clone(),
                image_url: None,
            },
            difficulty: self.calculate_difficulty(raw),
            tags: entry.tags.clone(),
            supported_modes: self.supported_modes(),
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Kana {
                script: entry.script,
                row: entry.row.clone(),
            },
        })
    }

    fn generate_options(
        &self,
        content: &ReviewableContent,
        pool: &[ReviewableContent],
        count: usize,
    ) -> Vec<ReviewableContent> {
        let (script, row) = match &content.metadata {
            ContentMetadata::Kana { script, row } => (*script, row.clone()),
            _ => (KanaScript::Hiragana, String::new()),
        };

        // Same gojuon row first, then same script, then anything.
        select_distractors(content, pool, count, move |candidate| {
            match &candidate.metadata {
                ContentMetadata::Kana {
                    script: s, row: r, ..
                } => {
                    if *r == row {
                        0
                    } else if *s == script {
                        1
                    } else {
                        2
                    }
                }
                _ => 3,
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
            // Both directions show the character; recall just asks for a
            // typed romaji reading instead of a choice.
            ReviewMode::Recognition | ReviewMode::Recall => content.clone(),
            ReviewMode::Listening => mask_for_listening(content),
        }
    }

    fn calculate_difficulty(&self, raw: &RawContent) -> f64 {
        let entry = match raw {
            RawContent::Kana(entry) => entry,
            _ => return 0.5,
        };

        let script_weight = match entry.script {
            KanaScript::Hiragana => 0.2,
            KanaScript::Katakana => 0.35,
        };
        let digraph_weight = if entry.character.chars().count() > 1 {
            0.25
        } else {
            0.0
        };
        let voiced_weight = if VOICED_ROWS.contains(&entry.row.as_str()) {
            0.15
        } else {
            0.0
        };

        clamp_difficulty(script_weight + digraph_weight + voiced_weight)
    }

    fn generate_hints(&self, content: &ReviewableContent) -> Vec<String> {
        let script = match &content.metadata {
            ContentMetadata::Kana {
                script: KanaScript::Katakana,
                ..
            } => "katakana",
            _ => "hiragana",
        };
        let romaji = &content.primary_answer;
        let first = romaji.chars().next().unwrap_or('?');

        vec![
            format!("This is a {script} character"),
            format!("The romaji starts with '{first}'"),
            format!("The romaji has {} letters", romaji.chars().count()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KanaEntry;

    fn entry(id: &str, character: &str, romaji: &str, script: KanaScript, row: &str) -> RawContent {
        RawContent::Kana(KanaEntry {
            id: id.to_string(),
            character: character.to_string(),
            romaji: romaji.to_string(),
            script,
            row: row.to_string(),
            tags: vec![],
            audio_url: None,
        })
    }

    #[test]
    fn transform_populates_required_fields() {
        let adapter = KanaAdapter;
        let raw = entry("kana-ka", "か", "ka", KanaScript::Hiragana, "k");
        let content = adapter.transform(&raw).unwrap();

        assert_eq!(content.primary_display, "か");
        assert_eq!(content.primary_answer, "ka");
        assert!(content.alternative_answers.contains(&"か".to_string()));
        assert!((0.0..=1.0).contains(&content.difficulty));
        assert!(!content.supported_modes.is_empty());
    }

    #[test]
    fn transform_rejects_other_kinds() {
        let adapter = KanaAdapter;
        let raw = RawContent::Custom(crate::types::CustomEntry {
            id: "x".to_string(),
            front: "f".to_string(),
            back: "b".to_string(),
            alternatives: vec![],
            notes: None,
            tags: vec![],
        });
        assert!(adapter.transform(&raw).is_err());
    }

    #[test]
    fn katakana_and_digraphs_are_harder() {
        let adapter = KanaAdapter;
        let plain = adapter.calculate_difficulty(&entry("1", "か", "ka", KanaScript::Hiragana, "k"));
        let kata = adapter.calculate_difficulty(&entry("2", "カ", "ka", KanaScript::Katakana, "k"));
        let digraph =
            adapter.calculate_difficulty(&entry("3", "きゃ", "kya", KanaScript::Hiragana, "k"));
        assert!(kata > plain);
        assert!(digraph > plain);
    }

    #[test]
    fn options_prefer_same_row() {
        let adapter = KanaAdapter;
        let target = adapter
            .transform(&entry("ka", "か", "ka", KanaScript::Hiragana, "k"))
            .unwrap();
        let pool = vec![
            adapter
                .transform(&entry("sa", "さ", "sa", KanaScript::Hiragana, "s"))
                .unwrap(),
            adapter
                .transform(&entry("ki", "き", "ki", KanaScript::Hiragana, "k"))
                .unwrap(),
        ];
        let options = adapter.generate_options(&target, &pool, 2);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, "ki");
    }

    #[test]
    fn listening_masks_visual_fields() {
        let adapter = KanaAdapter;
        let content = adapter
            .transform(&entry("ka", "か", "ka", KanaScript::Hiragana, "k"))
            .unwrap();
        let prepared = adapter.prepare_for_mode(&content, ReviewMode::Listening);
        assert_eq!(prepared.primary_display, super::super::LISTENING_PLACEHOLDER);
        assert_eq!(prepared.primary_answer, "ka");
    }

    #[test]
    fn hints_grow_more_revealing() {
        let adapter = KanaAdapter;
        let content = adapter
            .transform(&entry("ka", "か", "ka", KanaScript::Hiragana, "k"))
            .unwrap();
        let hints = adapter.generate_hints(&content);
        assert_eq!(hints.len(), 3);
        assert!(hints[0].contains("hiragana"));
        assert!(hints[1].contains('k'));
        assert!(hints[2].contains('2'));
    }
}
