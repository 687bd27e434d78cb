//! Validator for vocabulary entries.
//!
//! Meaning answers accept any listed synonym, near-misses above a generous
//! similarity floor (scored with partial-credit confidence), and answers
//! containing the key concept word. Japanese-side answers (recall mode)
//! accept romaji input via script conversion.

use super::{best_similarity, feedback_for_similarity, AnswerValidator, ValidationResult};
use crate::config::ValidationOptions;
use crate::text::kana::{contains_kana, contains_kanji, romaji_to_hiragana};
use crate::text::{normalize, NormalizeOptions};
use crate::types::ReviewableContent;

#[derive(Debug, Clone)]
pub struct VocabularyValidator {
    pub options: ValidationOptions,
}

impl VocabularyValidator {
    fn japanese_matches(&self, user: &str, expected: &str) -> bool {
        if !contains_kana(expected) && !contains_kanji(expected) {
            return false;
        }
        let japanese = NormalizeOptions::japanese();
        let user = normalize(user, &japanese);
        let expected = normalize(expected, &japanese);

        if user == expected {
            return true;
        }
        self.options.allow_script_conversion && romaji_to_hiragana(&user) == expected
    }
}

impl AnswerValidator for VocabularyValidator {
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult {
        // Japanese-side answers (the word or its reading).
        for expected in content.all_answers() {
            if self.japanese_matches(answer, expected) {
                return ValidationResult::correct(1.0, "Correct!");
            }
        }

        // Listed meanings and synonyms.
        let user = normalize(answer, &self.options.normalize);
        for expected in content.all_answers() {
            if !expected.is_empty() && normalize(expected, &self.options.normalize) == user {
                return ValidationResult::correct(1.0, "Correct!");
            }
        }

        let (similarity, expected) = best_similarity(answer, content, &self.options);
        let feedback = feedback_for_similarity(similarity, &expected);

        if similarity >= self.options.similarity_threshold {
            return ValidationResult::correct(similarity, feedback);
        }

        // Close spelling still shows the word was known; score it with
        // partial-credit confidence equal to the similarity.
        if similarity >= self.options.partial_credit_floor {
            return ValidationResult::correct(similarity, feedback)
                .with_partial_credit(similarity);
        }

        // Key concept containment, e.g. "a small cat" for "cat".
        if !user.is_empty() {
            for expected in content.all_answers() {
                let normalized = normalize(expected, &self.options.normalize);
                if normalized.is_empty() || contains_kana(&normalized) {
                    continue;
                }
                let contains = user.split_whitespace().any(|w| w == normalized)
                    || (normalized.contains(' ') && user.contains(&normalized));
                if contains {
                    return ValidationResult::correct(0.8, "Correct! The key concept is there.")
                        .with_partial_credit(0.8);
                }
            }
        }

        if similarity >= 0.5 {
            ValidationResult::incorrect(feedback).with_partial_credit(similarity)
        } else {
            ValidationResult::incorrect(format!(
                "Incorrect. \"{}\" means \"{}\".",
                content.primary_display, content.primary_answer
            ))
        }
    }
}
