//! Review sessions: state, statistics, events, storage port, and the
//! session manager.

pub mod clock;
pub mod events;
pub mod manager;
pub mod scoring;
pub mod storage;

use crate::config::ModeConfig;
use crate::srs::SrsData;
use crate::types::{ReviewMode, ReviewableContent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{EventEnvelope, EventSink, SessionEvent};
pub use manager::{SessionConfig, SessionEntry, SessionManager};
pub use storage::{InMemorySessionStore, SessionStore};

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Paused,
    Completed,
    Abandoned,
}

impl SessionStatus {
    /// Completed and abandoned sessions never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

/// One content item inside a session, filled in progressively as the user
/// interacts with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSessionItem {
    pub content: ReviewableContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presented_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    /// User-reported confidence, 1..=5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    pub hints_used: u32,
    pub attempts: u32,
    pub base_score: f64,
    pub final_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_interval_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_interval_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_ease_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_ease_factor: Option<f64>,
    pub skipped: bool,
}

impl ReviewSessionItem {
    pub fn new(content: ReviewableContent) -> Self {
        Self {
            content,
            presented_at: None,
            answered_at: None,
            response_time_ms: None,
            user_answer: None,
            is_correct: None,
            confidence: None,
            hints_used: 0,
            attempts: 0,
            base_score: 0.0,
            final_score: 0.0,
            previous_interval_days: None,
            next_interval_days: None,
            previous_ease_factor: None,
            next_ease_factor: None,
            skipped: false,
        }
    }

    /// Answered (either way) and not skipped.
    pub fn is_completed(&self) -> bool {
        self.is_correct.is_some() && !self.skipped
    }
}

/// Per-difficulty-bucket counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub total: u32,
    pub correct: u32,
}

/// Aggregate counters derived from the session's items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub total_items: u32,
    pub completed_items: u32,
    pub correct_items: u32,
    pub incorrect_items: u32,
    pub skipped_items: u32,
    /// Rounded percentage, 0 when nothing is completed.
    pub accuracy: u32,
    pub average_response_time_ms: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub easy: BucketStats,
    pub medium: BucketStats,
    pub hard: BucketStats,
    /// Completed/correct counts keyed by review mode tag.
    pub mode_breakdown: HashMap<String, BucketStats>,
    pub total_hints: u32,
    pub average_hints: f64,
    pub total_score: f64,
    pub max_score: f64,
}

impl SessionStatistics {
    /// Recompute all counters from the item list. Called after every
    /// answer so the aggregates can never drift from the items.
    pub fn from_items(items: &[ReviewSessionItem], mode: ReviewMode) -> Self {
        let mut stats = Self {
            total_items: items.len() as u32,
            ..Self::default()
        };

        let mut response_total: u64 = 0;
        let mut response_count: u32 = 0;
        let mut streak: u32 = 0;

        for item in items {
            if item.skipped {
                stats.skipped_items += 1;
                continue;
            }
            let Some(correct) = item.is_correct else {
                continue;
            };

            stats.completed_items += 1;
            let bucket = if item.content.difficulty < 0.34 {
                &mut stats.easy
            } else if item.content.difficulty < 0.67 {
                &mut stats.medium
            } else {
                &mut stats.hard
            };
            bucket.total += 1;

            let mode_bucket = stats
                .mode_breakdown
                .entry(mode.as_str().to_string())
                .or_default();
            mode_bucket.total += 1;

            if correct {
                stats.correct_items += 1;
                bucket.correct += 1;
                mode_bucket.correct += 1;
                streak += 1;
                stats.best_streak = stats.best_streak.max(streak);
            } else {
                stats.incorrect_items += 1;
                streak = 0;
            }

            if let Some(ms) = item.response_time_ms {
                response_total += ms;
                response_count += 1;
            }

            stats.total_hints += item.hints_used;
            stats.total_score += item.final_score;
            stats.max_score = stats.max_score.max(item.final_score);
        }

        stats.current_streak = streak;
        if stats.completed_items > 0 {
            stats.accuracy = ((stats.correct_items as f64 / stats.completed_items as f64) * 100.0)
                .round() as u32;
            stats.average_hints = stats.total_hints as f64 / stats.completed_items as f64;
        }
        if response_count > 0 {
            stats.average_response_time_ms = response_total as f64 / response_count as f64;
        }

        stats
    }
}

/// One bounded review interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    pub id: Uuid,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub last_activity_at: DateTime<Utc>,
    pub items: Vec<ReviewSessionItem>,
    pub current_index: usize,
    pub mode: ReviewMode,
    /// Snapshot of the mode config the session was started with.
    pub mode_config: ModeConfig,
    pub status: SessionStatus,
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SessionStatistics>,
}

impl ReviewSession {
    pub fn current_item(&self) -> Option<&ReviewSessionItem> {
        self.items.get(self.current_index)
    }
}

/// Compact per-session listing for history views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub user_id: String,
    pub mode: ReviewMode,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub item_count: usize,
    pub accuracy: u32,
}

impl From<&ReviewSession> for SessionSummary {
    fn from(session: &ReviewSession) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id.clone(),
            mode: session.mode,
            status: session.status,
            started_at: session.started_at,
            ended_at: session.ended_at,
            item_count: session.items.len(),
            accuracy: session
                .statistics
                .as_ref()
                .map(|s| s.accuracy)
                .unwrap_or(0),
        }
    }
}

/// Per-item SRS snapshot attached to a scheduling update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemScheduling {
    pub item_id: String,
    pub srs: SrsData,
}
