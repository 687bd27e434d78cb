//! Validator for phonetic characters.
//!
//! Kana answers are short, so there is no fuzzy band: the answer is right
//! or wrong. Input is accepted in either script; romaji input is converted
//! to kana (and kana to romaji) before comparison.

use super::{AnswerValidator, ValidationResult};
use crate::config::ValidationOptions;
use crate::text::kana::{hiragana_to_romaji, romaji_to_hiragana};
use crate::text::normalize;
use crate::types::ReviewableContent;

#[derive(Debug, Clone)]
pub struct KanaValidator {
    pub options: ValidationOptions,
}

impl KanaValidator {
    /// All comparable forms of a string: as given, converted to hiragana,
    /// and converted to romaji.
    fn forms(&self, s: &str) -> [String; 3] {
        let base = normalize(s, &self.options.normalize);
        let as_kana = romaji_to_hiragana(&base);
        let as_romaji = hiragana_to_romaji(&base);
        [base, as_kana, as_romaji]
    }
}

impl AnswerValidator for KanaValidator {
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult {
        let user_forms = self.forms(answer);

        for expected in content.all_answers() {
            if expected.is_empty() {
                continue;
            }
            let expected_forms = self.forms(expected);
            if user_forms.iter().any(|u| expected_forms.contains(u)) {
                return ValidationResult::correct(1.0, "Correct!");
            }
        }

        ValidationResult::incorrect(format!(
            "Incorrect. \"{}\" is read \"{}\".",
            content.primary_display, content.primary_answer
        ))
    }
}
