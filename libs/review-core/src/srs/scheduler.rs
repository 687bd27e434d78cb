//! Modified SM-2 scheduler.
//!
//! [`schedule`] is a pure function over (current state, review outcome):
//! callers own persistence and clocks. Intervals are day-denominated;
//! learning steps are fractional days.

use super::{SrsData, SrsStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tunable scheduling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Learning step intervals in days, first step first.
    pub learning_steps_days: Vec<f64>,
    /// Retry interval for a failed new item.
    pub new_retry_days: f64,
    /// Interval granted on graduating from learning.
    pub graduating_interval_days: f64,
    /// Interval after the second successful review.
    pub second_interval_days: f64,
    pub min_ease: f64,
    pub max_ease: f64,
    /// Mastery requires at least this interval...
    pub mastery_interval_days: f64,
    /// ...and at least this historical accuracy.
    pub mastery_accuracy: f64,
    pub max_interval_days: f64,
    /// Ease penalty for a lapse out of review.
    pub review_lapse_penalty: f64,
    /// Ease penalty for a lapse out of mastered.
    pub mastered_lapse_penalty: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            // 10 minutes, then 30 minutes.
            learning_steps_days: vec![10.0 / 1440.0, 30.0 / 1440.0],
            new_retry_days: 5.0 / 1440.0,
            graduating_interval_days: 1.0,
            second_interval_days: 6.0,
            min_ease: 1.3,
            max_ease: 2.5,
            mastery_interval_days: 21.0,
            mastery_accuracy: 0.9,
            max_interval_days: 365.0,
            review_lapse_penalty: 0.2,
            mastered_lapse_penalty: 0.3,
        }
    }
}

/// Everything the scheduler needs to know about one answered review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub correct: bool,
    /// User-reported confidence, 1..=5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    pub hints_used: u32,
    pub attempts: u32,
    /// Running average response time across the session, for the
    /// fast/slow interval nudge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_response_time_ms: Option<f64>,
}

impl ReviewOutcome {
    pub fn correct_simple() -> Self {
        Self {
            correct: true,
            confidence: None,
            response_time_ms: None,
            hints_used: 0,
            attempts: 1,
            average_response_time_ms: None,
        }
    }

    pub fn incorrect_simple() -> Self {
        Self {
            correct: false,
            ..Self::correct_simple()
        }
    }
}

/// Derive the SM-2 quality score (0..=5) from a review outcome.
///
/// Incorrect answers are always 0. Correct answers start from the reported
/// confidence, or from 3 adjusted by response speed when confidence is
/// absent, then lose up to 2 points for hints and up to 2 for extra
/// attempts, clamped to 1..=5.
pub fn derive_quality(outcome: &ReviewOutcome) -> u8 {
    if !outcome.correct {
        return 0;
    }

    let mut quality: i32 = match outcome.confidence {
        Some(confidence) => confidence.clamp(1, 5) as i32,
        None => {
            let mut q = 3;
            if let Some(ms) = outcome.response_time_ms {
                if ms < 2_000 {
                    q += 1;
                } else if ms > 10_000 {
                    q -= 1;
                }
            }
            q
        }
    };

    quality -= outcome.hints_used.min(2) as i32;
    quality -= outcome.attempts.saturating_sub(1).min(2) as i32;
    quality.clamp(1, 5) as u8
}

/// Classic SM-2 ease recalculation, clamped to the configured bounds.
fn update_ease(ease: f64, quality: u8, config: &SchedulerConfig) -> f64 {
    let q = quality as f64;
    let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    (ease + delta).clamp(config.min_ease, config.max_ease)
}

/// Compute the next scheduling state for one item.
pub fn schedule(
    current: &SrsData,
    outcome: &ReviewOutcome,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> SrsData {
    let quality = derive_quality(outcome);
    let first_step = config
        .learning_steps_days
        .first()
        .copied()
        .unwrap_or(10.0 / 1440.0);

    let mut next = current.clone();
    next.review_count += 1;
    if outcome.correct {
        next.correct_count += 1;
        next.streak += 1;
        next.best_streak = next.best_streak.max(next.streak);
    } else {
        next.streak = 0;
    }

    match (current.status, outcome.correct) {
        (SrsStatus::New, true) => {
            next.status = SrsStatus::Learning;
            next.interval_days = first_step;
            next.repetitions = 1;
        }
        (SrsStatus::New, false) => {
            next.interval_days = config.new_retry_days;
            next.repetitions = 0;
        }
        (SrsStatus::Learning, true) => {
            let steps_done = current.repetitions as usize;
            if steps_done < config.learning_steps_days.len() {
                next.interval_days = config.learning_steps_days[steps_done];
                next.repetitions += 1;
            } else {
                // Steps exhausted: graduate.
                next.status = SrsStatus::Review;
                next.interval_days = config.graduating_interval_days;
                next.repetitions = 1;
            }
        }
        (SrsStatus::Learning, false) => {
            next.interval_days = first_step;
            next.repetitions = 0;
        }
        (SrsStatus::Review, true) => {
            next.ease_factor = update_ease(current.ease_factor, quality, config);
            next.repetitions += 1;
            next.interval_days = match next.repetitions {
                1 => config.graduating_interval_days,
                2 => config.second_interval_days,
                _ => (current.interval_days * next.ease_factor).round(),
            };
            if next.interval_days >= config.mastery_interval_days
                && next.retention() >= config.mastery_accuracy
            {
                next.status = SrsStatus::Mastered;
            }
        }
        (SrsStatus::Review, false) => {
            next.status = SrsStatus::Learning;
            next.ease_factor =
                (current.ease_factor - config.review_lapse_penalty).max(config.min_ease);
            next.interval_days = first_step;
            next.repetitions = 0;
        }
        (SrsStatus::Mastered, true) => {
            next.ease_factor = update_ease(current.ease_factor, quality, config);
            next.repetitions += 1;
            next.interval_days = (current.interval_days * next.ease_factor).round();
        }
        (SrsStatus::Mastered, false) => {
            next.status = SrsStatus::Review;
            next.ease_factor =
                (current.ease_factor - config.mastered_lapse_penalty).max(config.min_ease);
            next.interval_days = (current.interval_days / 2.0).max(1.0);
        }
    }

    // Response-time nudge, after the transition and before capping.
    if outcome.correct {
        if let (Some(ms), Some(avg)) = (outcome.response_time_ms, outcome.average_response_time_ms)
        {
            if avg > 0.0 {
                let ms = ms as f64;
                if ms < avg / 2.0 {
                    next.interval_days *= 1.1;
                } else if ms > avg * 2.0 {
                    next.interval_days *= 0.9;
                }
            }
        }
    }

    next.interval_days = next.interval_days.min(config.max_interval_days);
    next.last_reviewed_at = Some(now);
    next.next_review_at = Some(now + Duration::seconds((next.interval_days * 86_400.0) as i64));
    next
}
