//! Spaced-repetition scheduling state and queue helpers.

pub mod scheduler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use scheduler::{derive_quality, schedule, ReviewOutcome, SchedulerConfig};

/// Scheduling status of one (user, item) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SrsStatus {
    New,
    Learning,
    Review,
    Mastered,
}

impl Default for SrsStatus {
    fn default() -> Self {
        Self::New
    }
}

impl SrsStatus {
    /// Queue rank: new before learning before review before mastered.
    fn queue_rank(&self) -> u8 {
        match self {
            Self::New => 0,
            Self::Learning => 1,
            Self::Review => 2,
            Self::Mastered => 3,
        }
    }
}

/// Per-item scheduling state.
///
/// Invariants: `ease_factor` stays within the configured bounds;
/// `next_review_at >= last_reviewed_at` once both are set; `status` only
/// changes through [`schedule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrsData {
    /// Days until the next review. Fractional during learning steps.
    pub interval_days: f64,
    pub ease_factor: f64,
    /// Completed learning steps while learning; successful reviews after
    /// graduation.
    pub repetitions: u32,
    pub status: SrsStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    pub review_count: u32,
    pub correct_count: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl Default for SrsData {
    fn default() -> Self {
        Self {
            interval_days: 0.0,
            ease_factor: 2.5,
            repetitions: 0,
            status: SrsStatus::New,
            last_reviewed_at: None,
            next_review_at: None,
            review_count: 0,
            correct_count: 0,
            streak: 0,
            best_streak: 0,
        }
    }
}

impl SrsData {
    /// Fraction of reviews answered correctly; 0 before any review.
    pub fn retention(&self) -> f64 {
        if self.review_count == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.review_count as f64
    }

    /// Lapse count: reviews that were not correct.
    pub fn lapses(&self) -> u32 {
        self.review_count - self.correct_count
    }

    /// True when the item should be shown now. Items never reviewed are
    /// always due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review_at {
            Some(next) => next <= now,
            None => true,
        }
    }

    /// An item whose lapses reach the threshold is a leech and deserves
    /// special handling.
    pub fn is_leech(&self, threshold: u32) -> bool {
        self.lapses() >= threshold
    }
}

/// Default leech threshold.
pub const DEFAULT_LEECH_THRESHOLD: u32 = 8;

/// One item in a review queue awaiting prioritization.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub id: String,
    pub srs: SrsData,
    /// Host-assigned priority tag; higher sorts sooner.
    pub priority: u32,
}

/// Order a candidate set for review: most overdue first, then explicit
/// priority, then status (new before learning before review before
/// mastered).
pub fn sort_queue(entries: &mut [QueueEntry], now: DateTime<Utc>) {
    entries.sort_by(|a, b| {
        let overdue_a = overdue_days(&a.srs, now);
        let overdue_b = overdue_days(&b.srs, now);
        overdue_b
            .partial_cmp(&overdue_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.srs.status.queue_rank().cmp(&b.srs.status.queue_rank()))
    });
}

fn overdue_days(srs: &SrsData, now: DateTime<Utc>) -> f64 {
    match srs.next_review_at {
        Some(next) => (now - next).num_seconds() as f64 / 86_400.0,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(now: DateTime<Utc>, days_from_now: i64) -> Option<DateTime<Utc>> {
        Some(now + Duration::days(days_from_now))
    }

    #[test]
    fn new_items_are_due() {
        let srs = SrsData::default();
        assert!(srs.is_due(Utc::now()));
    }

    #[test]
    fn future_items_are_not_due() {
        let now = Utc::now();
        let srs = SrsData {
            next_review_at: at(now, 3),
            ..SrsData::default()
        };
        assert!(!srs.is_due(now));
        assert!(srs.is_due(now + Duration::days(3)));
    }

    #[test]
    fn retention_is_correct_over_reviews() {
        let srs = SrsData {
            review_count: 10,
            correct_count: 9,
            ..SrsData::default()
        };
        assert!((srs.retention() - 0.9).abs() < 1e-9);
        assert_eq!(SrsData::default().retention(), 0.0);
    }

    #[test]
    fn leech_flag_uses_lapse_count() {
        let srs = SrsData {
            review_count: 20,
            correct_count: 12,
            ..SrsData::default()
        };
        assert!(srs.is_leech(DEFAULT_LEECH_THRESHOLD));
        assert!(!srs.is_leech(9));
    }

    #[test]
    fn queue_orders_overdue_then_priority_then_status() {
        let now = Utc::now();
        let mut entries = vec![
            QueueEntry {
                id: "future".to_string(),
                srs: SrsData {
                    next_review_at: at(now, 1),
                    status: SrsStatus::Review,
                    ..SrsData::default()
                },
                priority: 0,
            },
            QueueEntry {
                id: "overdue".to_string(),
                srs: SrsData {
                    next_review_at: at(now, -5),
                    status: SrsStatus::Mastered,
                    ..SrsData::default()
                },
                priority: 0,
            },
            QueueEntry {
                id: "slightly-overdue".to_string(),
                srs: SrsData {
                    next_review_at: at(now, -1),
                    status: SrsStatus::Review,
                    ..SrsData::default()
                },
                priority: 0,
            },
        ];
        sort_queue(&mut entries, now);
        assert_eq!(entries[0].id, "overdue");
        assert_eq!(entries[1].id, "slightly-overdue");
        assert_eq!(entries[2].id, "future");
    }

    #[test]
    fn explicit_priority_breaks_overdue_ties() {
        let now = Utc::now();
        let srs = SrsData {
            next_review_at: at(now, -1),
            status: SrsStatus::Review,
            ..SrsData::default()
        };
        let mut entries = vec![
            QueueEntry {
                id: "plain".to_string(),
                srs: srs.clone(),
                priority: 0,
            },
            QueueEntry {
                id: "flagged".to_string(),
                srs,
                priority: 5,
            },
        ];
        sort_queue(&mut entries, now);
        assert_eq!(entries[0].id, "flagged");
    }

    #[test]
    fn status_breaks_remaining_ties() {
        let now = Utc::now();
        let make = |status| SrsData {
            next_review_at: at(now, -1),
            status,
            ..SrsData::default()
        };
        let mut entries = vec![
            QueueEntry {
                id: "mastered".to_string(),
                srs: make(SrsStatus::Mastered),
                priority: 0,
            },
            QueueEntry {
                id: "learning".to_string(),
                srs: make(SrsStatus::Learning),
                priority: 0,
            },
        ];
        sort_queue(&mut entries, now);
        assert_eq!(entries[0].id, "learning");
    }
}
