//! Validator for sentence translations.
//!
//! Translations rarely match verbatim, so scoring blends word-set overlap
//! (Jaccard) with positional word-order overlap, weighted 0.6/0.4. This is
//! a bounded heuristic, not grammar analysis.

use super::{AnswerValidator, ValidationResult};
use crate::config::ValidationOptions;
use crate::text::{normalize, token_order_overlap, token_set_overlap};
use crate::types::ReviewableContent;

const SET_WEIGHT: f64 = 0.6;
const ORDER_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct SentenceValidator {
    pub options: ValidationOptions,
}

impl SentenceValidator {
    fn blended_score(&self, user: &str, expected: &str) -> f64 {
        SET_WEIGHT * token_set_overlap(user, expected)
            + ORDER_WEIGHT * token_order_overlap(user, expected)
    }

    /// Per-word guidance: words the answer is missing and words it added.
    fn corrections(user: &str, expected: &str) -> Vec<String> {
        let user_words: std::collections::HashSet<&str> = user.split_whitespace().collect();
        let expected_words: std::collections::HashSet<&str> =
            expected.split_whitespace().collect();

        let mut corrections = Vec::new();
        for word in expected.split_whitespace() {
            if !user_words.contains(word) {
                corrections.push(format!("missing \"{word}\""));
            }
        }
        for word in user.split_whitespace() {
            if !expected_words.contains(word) {
                corrections.push(format!("unexpected \"{word}\""));
            }
        }
        corrections
    }
}

impl AnswerValidator for SentenceValidator {
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult {
        let user = normalize(answer, &self.options.normalize);

        let mut best_score = 0.0_f64;
        let mut best_expected = normalize(&content.primary_answer, &self.options.normalize);
        for expected in content.all_answers() {
            let normalized = normalize(expected, &self.options.normalize);
            if normalized == user {
                return ValidationResult::correct(1.0, "Correct!");
            }
            let score = self.blended_score(&user, &normalized);
            if score > best_score {
                best_score = score;
                best_expected = normalized;
            }
        }

        if best_score >= self.options.similarity_threshold {
            ValidationResult::correct(best_score, "Correct! Close enough in wording.")
        } else if best_score >= self.options.partial_credit_floor {
            ValidationResult::incorrect("Partially right. Compare the wording.")
                .with_partial_credit(best_score)
                .with_corrections(Self::corrections(&user, &best_expected))
        } else {
            ValidationResult::incorrect(format!(
                "Incorrect. Expected: \"{}\".",
                content.primary_answer
            ))
            .with_corrections(Self::corrections(&user, &best_expected))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::content_with_answers;
    use super::*;

    fn validator() -> SentenceValidator {
        let config =
            crate::config::ContentTypeConfig::default_for(crate::types::ContentKind::Sentence);
        SentenceValidator {
            options: config.validation,
        }
    }

    #[test]
    fn verbatim_translation_is_correct() {
        let content = content_with_answers("I like cats", &[]);
        let result = validator().validate("I like cats", &content);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn punctuation_and_case_are_ignored() {
        let content = content_with_answers("I like cats", &[]);
        assert!(validator().validate("i like cats!", &content).is_correct);
    }

    #[test]
    fn reordered_words_score_below_identical() {
        let content = content_with_answers("the cat eats fish", &[]);
        let v = validator();
        let reordered = v.validate("fish eats the cat", &content);
        // Same word set (Jaccard 1.0) but order overlap is low.
        assert!(!reordered.is_correct);
        assert!(reordered.partial_credit.is_some());
    }

    #[test]
    fn partial_overlap_gets_corrections() {
        let content = content_with_answers("I like small cats", &[]);
        let result = validator().validate("I like dogs", &content);
        let corrections = result.corrections.expect("corrections present");
        assert!(corrections.iter().any(|c| c.contains("cats")));
        assert!(corrections.iter().any(|c| c.contains("dogs")));
    }

    #[test]
    fn unrelated_sentence_is_incorrect() {
        let content = content_with_answers("I like cats", &[]);
        let result = validator().validate("the weather is nice today", &content);
        assert!(!result.is_correct);
        assert!(result.partial_credit.is_none());
    }

    #[test]
    fn blend_weights_are_point_six_point_four() {
        let v = validator();
        // Same set, different order: 0.6 * 1.0 + 0.4 * order.
        let score = v.blended_score("b a", "a b");
        assert!((score - 0.6).abs() < 1e-9);
    }
}
