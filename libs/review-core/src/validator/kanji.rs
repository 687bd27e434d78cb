//! Validator for ideographs.
//!
//! Accepts either a reading or a meaning. Readings may be typed in romaji
//! or kana and are matched okurigana-insensitively (dictionary forms like
//! "た.べる" match both "たべる" and the stem "た"). Meanings go through
//! the fuzzy pipeline with a contains-key-concept fallback.

use super::{best_similarity, feedback_for_similarity, AnswerValidator, ValidationResult};
use crate::config::ValidationOptions;
use crate::text::kana::{contains_kana, romaji_to_hiragana};
use crate::text::{normalize, NormalizeOptions};
use crate::types::ReviewableContent;

#[derive(Debug, Clone)]
pub struct KanjiValidator {
    pub options: ValidationOptions,
}

impl KanjiValidator {
    fn reading_matches(&self, user: &str, expected: &str) -> bool {
        let japanese = NormalizeOptions::japanese();

        // Okurigana-insensitive: the dot marks where okurigana starts.
        // Split before normalizing, which strips the dot as punctuation.
        let full = normalize(&expected.replace('.', ""), &japanese);
        let stem = normalize(expected.split('.').next().unwrap_or(expected), &japanese);

        if !contains_kana(&full) {
            return false;
        }

        let user = normalize(user, &japanese);
        let user_kana = if self.options.allow_script_conversion {
            romaji_to_hiragana(&user)
        } else {
            user.clone()
        };

        user_kana == full || user_kana == stem || user == full
    }
}

impl AnswerValidator for KanjiValidator {
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult {
        // Reading path first: kana or convertible romaji input.
        for expected in content.all_answers() {
            if self.reading_matches(answer, expected) {
                return ValidationResult::correct(1.0, "Correct!");
            }
        }

        // Meaning path: exact, then fuzzy, then key-concept containment.
        let user = normalize(answer, &self.options.normalize);
        for expected in content.all_answers() {
            if !expected.is_empty() && normalize(expected, &self.options.normalize) == user {
                return ValidationResult::correct(1.0, "Correct!");
            }
        }

        let (similarity, expected) = best_similarity(answer, content, &self.options);
        if similarity >= self.options.similarity_threshold {
            return ValidationResult::correct(
                similarity,
                feedback_for_similarity(similarity, &expected),
            );
        }

        // A multi-word answer containing the expected meaning still shows
        // the concept was recalled.
        if !user.is_empty() {
            for expected in content.all_answers() {
                let normalized = normalize(expected, &self.options.normalize);
                if normalized.is_empty() || contains_kana(&normalized) {
                    continue;
                }
                let contains = user.split_whitespace().any(|w| w == normalized)
                    || normalized.split_whitespace().any(|w| w == user)
                    || (normalized.contains(' ') && user.contains(&normalized));
                if contains {
                    return ValidationResult::correct(
                        0.8,
                        "Correct! The key concept is there.",
                    )
                    .with_partial_credit(0.8);
                }
            }
        }

        if similarity >= self.options.partial_credit_floor {
            ValidationResult::incorrect(feedback_for_similarity(similarity, &expected))
                .with_partial_credit(similarity)
        } else {
            ValidationResult::incorrect(format!(
                "Incorrect. \"{}\" means \"{}\".",
                content.primary_display, content.primary_answer
            ))
        }
    }
}
