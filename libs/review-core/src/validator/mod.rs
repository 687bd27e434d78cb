//! Answer validators.
//!
//! One validator per content family, layered on the shared normalization
//! pipeline and similarity primitive. Validators are pure functions of
//! (input, expected, options): no mutation, identical output for identical
//! input. The [`factory::ValidatorFactory`] caches instances by
//! (kind, options).

pub mod factory;
pub mod kana;
pub mod kanji;
pub mod sentence;
pub mod vocabulary;

use crate::config::ValidationOptions;
use crate::text::{normalize, normalized_similarity};
use crate::types::ReviewableContent;
use serde::{Deserialize, Serialize};

pub use factory::ValidatorFactory;

/// Outcome of scoring one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_correct: bool,
    /// Confidence in the judgement, in [0, 1].
    pub confidence: f64,
    /// Partial-credit score when the answer was close but not a full match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_credit: Option<f64>,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrections: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

impl ValidationResult {
    pub fn correct(confidence: f64, feedback: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            confidence: confidence.clamp(0.0, 1.0),
            partial_credit: None,
            feedback: feedback.into(),
            corrections: None,
            hints: None,
        }
    }

    pub fn incorrect(feedback: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            confidence: 0.0,
            partial_credit: None,
            feedback: feedback.into(),
            corrections: None,
            hints: None,
        }
    }

    pub fn with_partial_credit(mut self, credit: f64) -> Self {
        self.partial_credit = Some(credit.clamp(0.0, 1.0));
        self
    }

    pub fn with_corrections(mut self, corrections: Vec<String>) -> Self {
        self.corrections = Some(corrections);
        self
    }
}

/// Contract shared by all answer validators.
pub trait AnswerValidator: Send + Sync {
    /// Score `answer` against the expected answers carried by `content`.
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult;
}

/// Feedback text tiered by similarity band.
pub(crate) fn feedback_for_similarity(similarity: f64, expected: &str) -> String {
    if similarity >= 0.95 {
        "Correct!".to_string()
    } else if similarity >= 0.7 {
        "Very close! Check your spelling.".to_string()
    } else if similarity >= 0.4 {
        "Not quite, but you're on the right track.".to_string()
    } else {
        format!("Incorrect. The answer is \"{expected}\".")
    }
}

/// Best similarity of `answer` against every accepted answer, after
/// normalization. Returns (similarity, matched expected answer).
pub(crate) fn best_similarity(
    answer: &str,
    content: &ReviewableContent,
    options: &ValidationOptions,
) -> (f64, String) {
    let user = normalize(answer, &options.normalize);
    let mut best = (0.0_f64, content.primary_answer.clone());

    for expected in content.all_answers() {
        let normalized = normalize(expected, &options.normalize);
        let similarity = normalized_similarity(&user, &normalized);
        if similarity > best.0 {
            best = (similarity, expected.to_string());
        }
    }

    best
}

/// Strict equality against any accepted answer.
#[derive(Debug, Clone)]
pub struct ExactValidator {
    pub options: ValidationOptions,
}

impl AnswerValidator for ExactValidator {
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult {
        let user = normalize(answer, &self.options.normalize);
        let matched = content
            .all_answers()
            .any(|expected| normalize(expected, &self.options.normalize) == user);

        if matched {
            ValidationResult::correct(1.0, "Correct!")
        } else {
            ValidationResult::incorrect(format!(
                "Incorrect. The answer is \"{}\".",
                content.primary_answer
            ))
        }
    }
}

/// Similarity threshold match with partial credit below the threshold.
#[derive(Debug, Clone)]
pub struct FuzzyValidator {
    pub options: ValidationOptions,
}

impl AnswerValidator for FuzzyValidator {
    fn validate(&self, answer: &str, content: &ReviewableContent) -> ValidationResult {
        let (similarity, expected) = best_similarity(answer, content, &self.options);
        let feedback = feedback_for_similarity(similarity, &expected);

        if similarity >= self.options.similarity_threshold {
            ValidationResult::correct(similarity, feedback)
        } else if similarity >= self.options.partial_credit_floor {
            ValidationResult::incorrect(feedback).with_partial_credit(similarity)
        } else {
            ValidationResult::incorrect(feedback)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{
        ContentKind, ContentMetadata, MediaRefs, ReviewMode, ReviewableContent,
    };

    /// Bare content carrying the given answers, for validator tests.
    pub fn content_with_answers(primary: &str, alternatives: &[&str]) -> ReviewableContent {
        ReviewableContent {
            id: "test".to_string(),
            kind: ContentKind::Custom,
            primary_display: "prompt".to_string(),
            secondary_display: None,
            tertiary_display: None,
            primary_answer: primary.to_string(),
            alternative_answers: alternatives.iter().map(|s| s.to_string()).collect(),
            media: MediaRefs::default(),
            difficulty: 0.5,
            tags: vec![],
            supported_modes: vec![ReviewMode::Recognition],
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Custom { notes: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::content_with_answers;
    use super::*;

    #[test]
    fn exact_identity_is_correct_with_full_confidence() {
        let validator = ExactValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("hello", &[]);
        let result = validator.validate("hello", &content);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn exact_accepts_alternatives() {
        let validator = ExactValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("happy", &["joyful"]);
        assert!(validator.validate("joyful", &content).is_correct);
        assert!(!validator.validate("sad", &content).is_correct);
    }

    #[test]
    fn exact_normalizes_case_and_whitespace() {
        let validator = ExactValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("hello world", &[]);
        assert!(validator.validate("  Hello   World  ", &content).is_correct);
    }

    #[test]
    fn fuzzy_passes_at_threshold() {
        let validator = FuzzyValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("hello", &[]);
        // One deletion in 5 chars: similarity 0.8, below the 0.85 threshold.
        let result = validator.validate("helo", &content);
        assert!(!result.is_correct);
        assert_eq!(result.partial_credit, Some(0.8));
    }

    #[test]
    fn fuzzy_full_match_has_full_confidence() {
        let validator = FuzzyValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("hello", &[]);
        let result = validator.validate("hello", &content);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn fuzzy_far_answer_gets_no_partial_credit() {
        let validator = FuzzyValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("hello", &[]);
        let result = validator.validate("xyz", &content);
        assert!(!result.is_correct);
        assert!(result.partial_credit.is_none());
        assert!(result.feedback.contains("hello"));
    }

    #[test]
    fn validators_are_deterministic() {
        let validator = FuzzyValidator {
            options: ValidationOptions::default(),
        };
        let content = content_with_answers("deterministic", &[]);
        let a = validator.validate("determinstic", &content);
        let b = validator.validate("determinstic", &content);
        assert_eq!(a.is_correct, b.is_correct);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.partial_credit, b.partial_credit);
        assert_eq!(a.feedback, b.feedback);
    }
}
