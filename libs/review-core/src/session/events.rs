//! Session lifecycle events.
//!
//! Every state change in the session manager is published to an
//! [`EventSink`] as a typed envelope. Consumers (analytics, UI, sync)
//! subscribe by implementing the sink; the manager never inherits from an
//! emitter.

use super::{SessionStatistics, SrsData};
use crate::validator::ValidationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed event payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        item_count: usize,
        mode: String,
        source: String,
    },
    SessionPaused,
    SessionResumed {
        paused_for_ms: u64,
    },
    SessionCompleted {
        statistics: SessionStatistics,
    },
    SessionAbandoned,
    ItemPresented {
        item_id: String,
        index: usize,
    },
    ItemAnswered {
        item_id: String,
        result: ValidationResult,
        scheduling: SrsData,
        final_score: f64,
    },
    ItemSkipped {
        item_id: String,
    },
    ItemHintUsed {
        item_id: String,
        hint_level: u32,
        hint: String,
    },
    ProgressUpdated {
        current_index: usize,
        total: usize,
    },
    StreakUpdated {
        streak: u32,
    },
    AchievementUnlocked {
        achievement: String,
    },
    TimeoutWarning {
        seconds_remaining: u32,
    },
}

/// Envelope every consumer receives: event type and data plus timestamp
/// and session/user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub session_id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub event: SessionEvent,
}

/// Consumer of session events. Emission is fire-and-forget: a sink must
/// not fail the operation that produced the event.
pub trait EventSink: Send + Sync {
    fn emit(&self, envelope: &EventEnvelope);
}

/// Sink that drops everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _envelope: &EventEnvelope) {}
}

/// Sink that records envelopes in memory, for tests and buffering hosts.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: std::sync::Mutex<Vec<EventEnvelope>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.lock().expect("event sink lock").clone()
    }

    /// Count of events matching a predicate.
    pub fn count_matching(&self, predicate: impl Fn(&SessionEvent) -> bool) -> usize {
        self.events
            .lock()
            .expect("event sink lock")
            .iter()
            .filter(|e| predicate(&e.event))
            .count()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, envelope: &EventEnvelope) {
        self.events.lock().expect("event sink lock").push(envelope.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_type_tag() {
        let envelope = EventEnvelope {
            timestamp: Utc::now(),
            session_id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            event: SessionEvent::StreakUpdated { streak: 4 },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["type"], "streak_updated");
        assert_eq!(json["streak"], 4);
        assert_eq!(json["user_id"], "user-1");
    }

    #[test]
    fn collecting_sink_records_in_order() {
        let sink = CollectingSink::new();
        for streak in [1, 2, 3] {
            sink.emit(&EventEnvelope {
                timestamp: Utc::now(),
                session_id: Uuid::nil(),
                user_id: "u".to_string(),
                event: SessionEvent::StreakUpdated { streak },
            });
        }
        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            sink.count_matching(|e| matches!(e, SessionEvent::StreakUpdated { .. })),
            3
        );
    }
}
