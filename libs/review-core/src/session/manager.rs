//! Session manager.
//!
//! Runs one review session at a time: presentation, answer validation,
//! scoring, statistics, scheduling, lifecycle events, and persistence via
//! the storage port. Not safe for concurrent mutation; wrap in a mutex
//! when embedding in a multi-threaded host.

use super::clock::Clock;
use super::events::{EventEnvelope, EventSink, SessionEvent};
use super::scoring::{base_score, final_score};
use super::storage::SessionStore;
use super::{
    ReviewSession, ReviewSessionItem, SessionStatistics, SessionStatus,
};
use crate::adapter::AdapterRegistry;
use crate::config::{InputKind, ModeConfig};
use crate::error::{ReviewError, Result};
use crate::srs::{schedule, ReviewOutcome, SchedulerConfig, SrsData};
use crate::types::{ReviewMode, ReviewableContent};
use crate::validator::{ValidationResult, ValidatorFactory};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Seconds of silence before a timeout warning is emitted.
pub const INACTIVITY_TIMEOUT_SECS: i64 = 300;
/// Seconds after the warning before the session is auto-paused.
pub const FINAL_WARNING_SECS: i64 = 60;

/// Hint levels stop escalating past the third tier.
const MAX_HINT_LEVEL: u32 = 2;

/// One item handed to `start_session`, with its current scheduling state.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub content: ReviewableContent,
    pub srs: SrsData,
}

impl SessionEntry {
    pub fn new(content: ReviewableContent) -> Self {
        Self {
            content,
            srs: SrsData::default(),
        }
    }
}

/// Options for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub mode: ReviewMode,
    pub shuffle: bool,
    pub source: String,
    pub tags: Vec<String>,
    pub metadata: HashMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: ReviewMode::Recognition,
            shuffle: false,
            source: "manual".to_string(),
            tags: vec![],
            metadata: HashMap::new(),
        }
    }
}

/// What `submit_answer` hands back to the caller.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub validation: ValidationResult,
    pub scheduling: SrsData,
    pub base_score: f64,
    pub final_score: f64,
}

/// Result of an inactivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactivityAction {
    Warned,
    AutoPaused,
}

pub struct SessionManager {
    user_id: String,
    registry: Arc<AdapterRegistry>,
    validators: Arc<ValidatorFactory>,
    store: Arc<dyn SessionStore>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    scheduler: SchedulerConfig,
    session: Option<ReviewSession>,
    srs: HashMap<String, SrsData>,
    warning_issued_at: Option<DateTime<Utc>>,
}

impl SessionManager {
    pub fn new(
        user_id: impl Into<String>,
        registry: Arc<AdapterRegistry>,
        validators: Arc<ValidatorFactory>,
        store: Arc<dyn SessionStore>,
        events: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            registry,
            validators,
            store,
            events,
            clock,
            scheduler: SchedulerConfig::default(),
            session: None,
            srs: HashMap::new(),
            warning_issued_at: None,
        }
    }

    /// Override the default scheduling parameters.
    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// The in-progress session, if any.
    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    /// Latest scheduling state for an item reviewed in this session.
    pub fn srs_state(&self, item_id: &str) -> Option<&SrsData> {
        self.srs.get(item_id)
    }

    /// Build, persist, and announce a new session.
    pub fn start_session(
        &mut self,
        entries: Vec<SessionEntry>,
        config: SessionConfig,
    ) -> Result<Uuid> {
        if self.session.is_some() {
            return Err(ReviewError::Session(
                "a session is already in progress".to_string(),
            ));
        }
        if entries.is_empty() {
            return Err(ReviewError::Session(
                "cannot start a session with no items".to_string(),
            ));
        }

        let mode = config.mode;
        let mode_config = self.mode_config_for(&entries, mode);

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let adapter = self.registry.get_for_kind(entry.content.kind);
            let prepared = adapter.prepare_for_mode(&entry.content, mode);
            self.srs.insert(entry.content.id.clone(), entry.srs);
            items.push(ReviewSessionItem::new(prepared));
        }
        if config.shuffle {
            items.shuffle(&mut rand::thread_rng());
        }

        let now = self.clock.now();
        let session = ReviewSession {
            id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            started_at: now,
            ended_at: None,
            last_activity_at: now,
            current_index: 0,
            mode,
            mode_config,
            status: SessionStatus::Active,
            source: config.source.clone(),
            tags: config.tags,
            metadata: config.metadata,
            statistics: Some(SessionStatistics::from_items(&items, mode)),
            items,
        };

        self.store.save_session(&session)?;
        info!(session_id = %session.id, items = session.items.len(), "session started");

        let id = session.id;
        let item_count = session.items.len();
        self.session = Some(session);
        self.warning_issued_at = None;
        self.emit(SessionEvent::SessionStarted {
            item_count,
            mode: mode.as_str().to_string(),
            source: config.source,
        });
        Ok(id)
    }

    /// Item at the cursor, or `None` past the end. The first access stamps
    /// the presentation time and emits an item-presented event.
    pub fn get_current_item(&mut self) -> Result<Option<ReviewSessionItem>> {
        let now = self.clock.now();
        let session = self.require_active()?;
        let index = session.current_index;

        let Some(item) = session.items.get_mut(index) else {
            return Ok(None);
        };

        let mut first_view = None;
        if item.presented_at.is_none() {
            item.presented_at = Some(now);
            first_view = Some(item.content.id.clone());
        }
        let snapshot = item.clone();

        if let Some(item_id) = first_view {
            self.emit(SessionEvent::ItemPresented { item_id, index });
        }
        Ok(Some(snapshot))
    }

    /// Validate and score an answer for the current item, reschedule the
    /// item, update statistics, and persist.
    pub fn submit_answer(
        &mut self,
        answer: &str,
        confidence: Option<u8>,
    ) -> Result<AnswerOutcome> {
        let now = self.clock.now();
        let scheduler = self.scheduler.clone();
        let registry = Arc::clone(&self.registry);
        let validators = Arc::clone(&self.validators);
        // Read the scheduling state up front; the session borrow below is
        // exclusive.
        let current_srs = self
            .session
            .as_ref()
            .and_then(|s| s.current_item())
            .and_then(|item| self.srs.get(&item.content.id))
            .cloned()
            .unwrap_or_default();

        let session = self.require_active()?;
        let mode = session.mode;
        let average_ms = session
            .statistics
            .as_ref()
            .map(|s| s.average_response_time_ms)
            .filter(|avg| *avg > 0.0);

        let index = session.current_index;
        let item = session
            .items
            .get_mut(index)
            .ok_or_else(|| ReviewError::Session("no current item to answer".to_string()))?;

        let presented_at = *item.presented_at.get_or_insert(now);
        item.answered_at = Some(now);
        let response_ms = (now - presented_at).num_milliseconds().max(0) as u64;
        item.response_time_ms = Some(response_ms);
        item.attempts += 1;
        item.user_answer = Some(answer.to_string());
        item.confidence = confidence;

        let kind = item.content.kind;
        let options = registry.config(kind).validation.clone();
        let validator = validators.get(kind, &options);
        let result = validator.validate(answer, &item.content);

        item.is_correct = Some(result.is_correct);
        item.base_score = base_score(result.is_correct, Some(response_ms), item.content.difficulty);
        item.final_score = final_score(item.base_score, item.hints_used, item.attempts, confidence);

        let outcome = ReviewOutcome {
            correct: result.is_correct,
            confidence,
            response_time_ms: Some(response_ms),
            hints_used: item.hints_used,
            attempts: item.attempts,
            average_response_time_ms: average_ms,
        };
        let item_id = item.content.id.clone();
        let next_srs = schedule(&current_srs, &outcome, &scheduler, now);

        item.previous_interval_days = Some(current_srs.interval_days);
        item.next_interval_days = Some(next_srs.interval_days);
        item.previous_ease_factor = Some(current_srs.ease_factor);
        item.next_ease_factor = Some(next_srs.ease_factor);
        let item_final = item.final_score;

        let item_base = item.base_score;

        let stats = SessionStatistics::from_items(&session.items, mode);
        let streak = stats.current_streak;
        session.statistics = Some(stats);
        session.last_activity_at = now;
        let snapshot = session.clone();
        self.warning_issued_at = None;
        self.srs.insert(item_id.clone(), next_srs.clone());

        // A dropped update would lose scheduling state, so this error must
        // reach the caller.
        self.store.update_session(&snapshot)?;

        self.emit(SessionEvent::ItemAnswered {
            item_id,
            result: result.clone(),
            scheduling: next_srs.clone(),
            final_score: item_final,
        });
        if result.is_correct {
            self.emit(SessionEvent::StreakUpdated { streak });
        }

        Ok(AnswerOutcome {
            validation: result,
            scheduling: next_srs,
            base_score: item_base,
            final_score: item_final,
        })
    }

    /// Advance the cursor. Completes the session when the cursor passes
    /// the last item.
    pub fn next_item(&mut self) -> Result<Option<ReviewSessionItem>> {
        let now = self.clock.now();
        let session = self.require_active()?;
        session.current_index += 1;
        session.last_activity_at = now;
        let current_index = session.current_index;
        let total = session.items.len();
        let snapshot = session.clone();
        self.warning_issued_at = None;

        if current_index >= total {
            self.complete_session()?;
            return Ok(None);
        }

        self.store.update_session(&snapshot)?;
        self.emit(SessionEvent::ProgressUpdated {
            current_index,
            total,
        });
        self.get_current_item()
    }

    /// Mark the current item skipped and advance.
    pub fn skip_item(&mut self) -> Result<Option<ReviewSessionItem>> {
        let session = self.require_active()?;
        let mode = session.mode;
        let index = session.current_index;
        let item = session
            .items
            .get_mut(index)
            .ok_or_else(|| ReviewError::Session("no current item to skip".to_string()))?;
        item.skipped = true;
        let item_id = item.content.id.clone();
        session.statistics = Some(SessionStatistics::from_items(&session.items, mode));

        self.emit(SessionEvent::ItemSkipped { item_id });
        self.next_item()
    }

    /// Fetch the next hint for the current item and charge its penalty.
    pub fn use_hint(&mut self) -> Result<String> {
        let now = self.clock.now();
        let registry = Arc::clone(&self.registry);
        let session = self.require_active()?;
        let index = session.current_index;
        let item = session
            .items
            .get_mut(index)
            .ok_or_else(|| ReviewError::Session("no current item for a hint".to_string()))?;

        let level = item.hints_used.min(MAX_HINT_LEVEL);
        let adapter = registry.get_for_kind(item.content.kind);
        let hints = adapter.generate_hints(&item.content);
        let hint = hints
            .get(level as usize)
            .or_else(|| hints.last())
            .cloned()
            .ok_or_else(|| {
                ReviewError::adapter(item.content.kind.as_str(), "no hints available")
            })?;

        item.hints_used += 1;
        let item_id = item.content.id.clone();
        session.last_activity_at = now;
        let snapshot = session.clone();
        self.warning_issued_at = None;
        self.store.update_session(&snapshot)?;

        self.emit(SessionEvent::ItemHintUsed {
            item_id,
            hint_level: level + 1,
            hint: hint.clone(),
        });
        Ok(hint)
    }

    /// Pause the session, stopping inactivity tracking.
    pub fn pause_session(&mut self) -> Result<()> {
        let now = self.clock.now();
        let session = self.require_active()?;
        session.status = SessionStatus::Paused;
        session.last_activity_at = now;
        let snapshot = session.clone();
        self.warning_issued_at = None;

        self.store.update_session(&snapshot)?;
        debug!(session_id = %snapshot.id, "session paused");
        self.emit(SessionEvent::SessionPaused);
        Ok(())
    }

    /// Resume a paused session. Returns how long it was paused, in
    /// milliseconds.
    pub fn resume_session(&mut self) -> Result<u64> {
        let now = self.clock.now();
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| ReviewError::Session("no session to resume".to_string()))?;
        if session.status != SessionStatus::Paused {
            return Err(ReviewError::Session(format!(
                "cannot resume a session in state {:?}",
                session.status
            )));
        }

        let paused_for_ms = (now - session.last_activity_at).num_milliseconds().max(0) as u64;
        session.status = SessionStatus::Active;
        session.last_activity_at = now;
        let snapshot = session.clone();
        self.warning_issued_at = None;

        self.store.update_session(&snapshot)?;
        self.emit(SessionEvent::SessionResumed { paused_for_ms });
        Ok(paused_for_ms)
    }

    /// Finalize the session: persist statistics, announce completion,
    /// evaluate achievements, and clear in-memory state.
    pub fn complete_session(&mut self) -> Result<SessionStatistics> {
        let now = self.clock.now();
        let mut session = self
            .session
            .take()
            .ok_or_else(|| ReviewError::Session("no active session to complete".to_string()))?;
        if session.status.is_terminal() {
            self.session = Some(session);
            return Err(ReviewError::Session(
                "session is already finished".to_string(),
            ));
        }

        session.status = SessionStatus::Completed;
        session.ended_at = Some(now);
        let stats = SessionStatistics::from_items(&session.items, session.mode);
        session.statistics = Some(stats.clone());

        self.store.update_session(&session)?;
        self.store.save_statistics(session.id, &stats)?;
        info!(session_id = %session.id, accuracy = stats.accuracy, "session completed");

        let session_id = session.id;
        self.warning_issued_at = None;
        self.srs.clear();

        self.emit_for(session_id, SessionEvent::SessionCompleted {
            statistics: stats.clone(),
        });
        for achievement in evaluate_achievements(&stats) {
            self.emit_for(session_id, SessionEvent::AchievementUnlocked { achievement });
        }
        Ok(stats)
    }

    /// Terminal exit without statistics finalization.
    pub fn abandon_session(&mut self) -> Result<()> {
        let now = self.clock.now();
        let mut session = self
            .session
            .take()
            .ok_or_else(|| ReviewError::Session("no active session to abandon".to_string()))?;
        if session.status.is_terminal() {
            self.session = Some(session);
            return Err(ReviewError::Session(
                "session is already finished".to_string(),
            ));
        }

        session.status = SessionStatus::Abandoned;
        session.ended_at = Some(now);
        self.store.update_session(&session)?;
        warn!(session_id = %session.id, "session abandoned");

        let session_id = session.id;
        self.warning_issued_at = None;
        self.srs.clear();
        self.emit_for(session_id, SessionEvent::SessionAbandoned);
        Ok(())
    }

    /// Host-driven inactivity poll. Emits a timeout warning after five
    /// silent minutes, then auto-pauses one minute later.
    pub fn check_inactivity(&mut self) -> Result<Option<InactivityAction>> {
        let now = self.clock.now();
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        if session.status != SessionStatus::Active {
            return Ok(None);
        }

        if let Some(warned_at) = self.warning_issued_at {
            if now - warned_at >= Duration::seconds(FINAL_WARNING_SECS) {
                self.pause_session()?;
                return Ok(Some(InactivityAction::AutoPaused));
            }
            return Ok(None);
        }

        if now - session.last_activity_at >= Duration::seconds(INACTIVITY_TIMEOUT_SECS) {
            self.warning_issued_at = Some(now);
            self.emit(SessionEvent::TimeoutWarning {
                seconds_remaining: FINAL_WARNING_SECS as u32,
            });
            return Ok(Some(InactivityAction::Warned));
        }
        Ok(None)
    }

    fn mode_config_for(&self, entries: &[SessionEntry], mode: ReviewMode) -> ModeConfig {
        entries
            .first()
            .and_then(|entry| {
                self.registry
                    .config(entry.content.kind)
                    .modes
                    .iter()
                    .find(|m| m.mode == mode)
                    .cloned()
            })
            .unwrap_or(ModeConfig {
                mode,
                input: InputKind::Typed,
                hints_enabled: true,
                audio_enabled: matches!(mode, ReviewMode::Listening),
            })
    }

    fn require_active(&mut self) -> Result<&mut ReviewSession> {
        match self.session.as_mut() {
            Some(session) if session.status == SessionStatus::Active => Ok(session),
            Some(session) => Err(ReviewError::Session(format!(
                "session is {:?}, not active",
                session.status
            ))),
            None => Err(ReviewError::Session("no active session".to_string())),
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(session) = self.session.as_ref() {
            self.emit_for(session.id, event);
        }
    }

    fn emit_for(&self, session_id: Uuid, event: SessionEvent) {
        self.events.emit(&EventEnvelope {
            timestamp: self.clock.now(),
            session_id,
            user_id: self.user_id.clone(),
            event,
        });
    }
}

/// Achievement rules evaluated at completion. Infallible so a rule can
/// never block completion.
fn evaluate_achievements(stats: &SessionStatistics) -> Vec<String> {
    let mut unlocked = Vec::new();
    if stats.completed_items >= 10 && stats.accuracy == 100 {
        unlocked.push("perfect_session".to_string());
    }
    if stats.best_streak >= 20 {
        unlocked.push("streak_20".to_string());
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::events::CollectingSink;
    use crate::session::storage::InMemorySessionStore;
    use crate::session::FixedClock;
    use crate::srs::SrsStatus;
    use crate::types::{ContentMetadata, ContentKind, MediaRefs};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn content(id: &str, answer: &str) -> ReviewableContent {
        ReviewableContent {
            id: id.to_string(),
            kind: ContentKind::Custom,
            primary_display: format!("prompt for {id}"),
            secondary_display: None,
            tertiary_display: None,
            primary_answer: answer.to_string(),
            alternative_answers: vec![],
            media: MediaRefs::default(),
            difficulty: 0.5,
            tags: vec!["practice".to_string()],
            supported_modes: vec![ReviewMode::Recognition, ReviewMode::Recall],
            preferred_mode: ReviewMode::Recognition,
            metadata: ContentMetadata::Custom { notes: None },
        }
    }

    fn entries(answers: &[(&str, &str)]) -> Vec<SessionEntry> {
        answers
            .iter()
            .map(|(id, answer)| SessionEntry::new(content(id, answer)))
            .collect()
    }

    fn harness() -> (
        SessionManager,
        Arc<FixedClock>,
        Arc<CollectingSink>,
        Arc<InMemorySessionStore>,
    ) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let sink = Arc::new(CollectingSink::new());
        let store = Arc::new(InMemorySessionStore::new());
        let manager = SessionManager::new(
            "user-1",
            Arc::new(AdapterRegistry::new(HashMap::new())),
            Arc::new(ValidatorFactory::new()),
            Arc::clone(&store) as Arc<dyn SessionStore>,
            Arc::clone(&sink) as Arc<dyn EventSink>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        (manager, clock, sink, store)
    }

    #[test]
    fn only_one_session_at_a_time() {
        let (mut manager, _clock, _sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();
        let err = manager
            .start_session(entries(&[("b", "dog")]), SessionConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReviewError::Session(_)));
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let (mut manager, _clock, _sink, _store) = harness();
        let err = manager
            .start_session(vec![], SessionConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReviewError::Session(_)));
    }

    #[test]
    fn answering_scores_and_reschedules() {
        let (mut manager, clock, sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();

        let item = manager.get_current_item().unwrap().unwrap();
        assert!(item.presented_at.is_some());

        clock.advance(Duration::seconds(3));
        let outcome = manager.submit_answer("cat", None).unwrap();
        assert!(outcome.validation.is_correct);
        assert_eq!(outcome.base_score, 100.0);
        assert_eq!(outcome.final_score, 100.0);
        assert_eq!(outcome.scheduling.status, SrsStatus::Learning);
        assert!((outcome.scheduling.interval_days - 10.0 / 1440.0).abs() < 1e-9);

        let srs = manager.srs_state("a").unwrap();
        assert_eq!(srs.review_count, 1);
        assert_eq!(srs.streak, 1);

        assert_eq!(
            sink.count_matching(|e| matches!(e, SessionEvent::ItemAnswered { .. })),
            1
        );
        assert_eq!(
            sink.count_matching(|e| matches!(e, SessionEvent::StreakUpdated { streak: 1 })),
            1
        );
    }

    #[test]
    fn finishing_the_list_completes_the_session() {
        let (mut manager, clock, sink, store) = harness();
        let id = manager
            .start_session(entries(&[("a", "cat"), ("b", "dog")]), SessionConfig::default())
            .unwrap();

        manager.get_current_item().unwrap().unwrap();
        clock.advance(Duration::seconds(2));
        manager.submit_answer("cat", None).unwrap();
        let second = manager.next_item().unwrap().unwrap();
        assert_eq!(second.content.id, "b");

        clock.advance(Duration::seconds(2));
        manager.submit_answer("wrong", None).unwrap();
        assert!(manager.next_item().unwrap().is_none());

        assert!(manager.session().is_none());
        let stored = store.load_session(id).unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Completed);
        assert!(stored.ended_at.is_some());

        let stats = store.load_statistics(id).unwrap().unwrap();
        assert_eq!(stats.completed_items, 2);
        assert_eq!(stats.accuracy, 50);

        assert_eq!(
            sink.count_matching(|e| matches!(e, SessionEvent::SessionCompleted { .. })),
            1
        );
    }

    #[test]
    fn skipped_items_do_not_count_as_completed() {
        let (mut manager, _clock, sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat"), ("b", "dog")]), SessionConfig::default())
            .unwrap();

        manager.get_current_item().unwrap().unwrap();
        let next = manager.skip_item().unwrap().unwrap();
        assert_eq!(next.content.id, "b");

        let stats = manager.session().unwrap().statistics.clone().unwrap();
        assert_eq!(stats.skipped_items, 1);
        assert_eq!(stats.completed_items, 0);
        assert_eq!(
            sink.count_matching(|e| matches!(e, SessionEvent::ItemSkipped { .. })),
            1
        );
    }

    #[test]
    fn pause_and_resume_report_the_pause_duration() {
        let (mut manager, clock, sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();

        manager.pause_session().unwrap();
        let err = manager.submit_answer("cat", None).unwrap_err();
        assert!(matches!(err, ReviewError::Session(_)));

        clock.advance(Duration::minutes(2));
        let paused_for_ms = manager.resume_session().unwrap();
        assert_eq!(paused_for_ms, 120_000);

        assert_eq!(
            sink.count_matching(|e| matches!(
                e,
                SessionEvent::SessionResumed {
                    paused_for_ms: 120_000
                }
            )),
            1
        );
    }

    #[test]
    fn resume_requires_a_paused_session() {
        let (mut manager, _clock, _sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();
        assert!(manager.resume_session().is_err());
    }

    #[test]
    fn hints_escalate_then_repeat_the_last_tier() {
        let (mut manager, clock, _sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();
        manager.get_current_item().unwrap().unwrap();

        let first = manager.use_hint().unwrap();
        let second = manager.use_hint().unwrap();
        let third = manager.use_hint().unwrap();
        let fourth = manager.use_hint().unwrap();
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(third, fourth);

        clock.advance(Duration::seconds(2));
        let outcome = manager.submit_answer("cat", None).unwrap();
        // Four hints cost 0.1 + 0.2 + 0.3 + 0.3 of the base score.
        assert_eq!(outcome.final_score, 10.0);
    }

    #[test]
    fn inactivity_warns_then_auto_pauses() {
        let (mut manager, clock, sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();
        manager.get_current_item().unwrap().unwrap();

        assert_eq!(manager.check_inactivity().unwrap(), None);

        clock.advance(Duration::minutes(5));
        assert_eq!(
            manager.check_inactivity().unwrap(),
            Some(InactivityAction::Warned)
        );
        assert_eq!(
            sink.count_matching(|e| matches!(
                e,
                SessionEvent::TimeoutWarning {
                    seconds_remaining: 60
                }
            )),
            1
        );

        assert_eq!(manager.check_inactivity().unwrap(), None);

        clock.advance(Duration::seconds(60));
        assert_eq!(
            manager.check_inactivity().unwrap(),
            Some(InactivityAction::AutoPaused)
        );
        assert_eq!(
            manager.session().unwrap().status,
            SessionStatus::Paused
        );
    }

    #[test]
    fn answering_resets_the_inactivity_window() {
        let (mut manager, clock, _sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat"), ("b", "dog")]), SessionConfig::default())
            .unwrap();
        manager.get_current_item().unwrap().unwrap();

        clock.advance(Duration::minutes(4));
        manager.submit_answer("cat", None).unwrap();

        clock.advance(Duration::minutes(4));
        assert_eq!(manager.check_inactivity().unwrap(), None);
    }

    #[test]
    fn perfect_long_session_unlocks_an_achievement() {
        let (mut manager, clock, sink, _store) = harness();
        let items: Vec<(String, String)> = (0..10)
            .map(|i| (format!("item-{i}"), format!("answer{i}")))
            .collect();
        let refs: Vec<(&str, &str)> = items
            .iter()
            .map(|(id, answer)| (id.as_str(), answer.as_str()))
            .collect();
        manager
            .start_session(entries(&refs), SessionConfig::default())
            .unwrap();

        for (_, answer) in &items {
            manager.get_current_item().unwrap().unwrap();
            clock.advance(Duration::seconds(2));
            manager.submit_answer(answer, None).unwrap();
            manager.next_item().unwrap();
        }

        assert!(manager.session().is_none());
        let unlocked: Vec<String> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e.event {
                SessionEvent::AchievementUnlocked { achievement } => Some(achievement),
                _ => None,
            })
            .collect();
        assert_eq!(unlocked, vec!["perfect_session".to_string()]);
    }

    #[test]
    fn abandoning_clears_state_for_a_new_session() {
        let (mut manager, _clock, sink, store) = harness();
        let id = manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();
        manager.abandon_session().unwrap();

        assert!(manager.session().is_none());
        assert_eq!(
            store.load_session(id).unwrap().unwrap().status,
            SessionStatus::Abandoned
        );
        assert_eq!(
            sink.count_matching(|e| matches!(e, SessionEvent::SessionAbandoned)),
            1
        );

        manager
            .start_session(entries(&[("b", "dog")]), SessionConfig::default())
            .unwrap();
    }

    #[test]
    fn completing_without_a_session_is_an_error() {
        let (mut manager, _clock, _sink, _store) = harness();
        assert!(manager.complete_session().is_err());
        assert!(manager.abandon_session().is_err());
    }

    #[test]
    fn seeded_scheduling_state_feeds_the_scheduler() {
        let (mut manager, clock, _sink, _store) = harness();
        let mut entry = SessionEntry::new(content("a", "cat"));
        entry.srs.status = SrsStatus::Review;
        entry.srs.interval_days = 6.0;
        entry.srs.ease_factor = 2.5;
        entry.srs.repetitions = 3;
        manager
            .start_session(vec![entry], SessionConfig::default())
            .unwrap();

        manager.get_current_item().unwrap().unwrap();
        clock.advance(Duration::seconds(3));
        let outcome = manager.submit_answer("cat", Some(4)).unwrap();

        // The seeded review state drives the interval, not a fresh default.
        assert_eq!(outcome.scheduling.status, SrsStatus::Review);
        assert_eq!(outcome.scheduling.interval_days, 15.0);

        let item = &manager.session().unwrap().items[0];
        assert_eq!(item.previous_interval_days, Some(6.0));
        assert_eq!(item.next_interval_days, Some(15.0));
        assert_eq!(item.previous_ease_factor, Some(2.5));
    }

    #[test]
    fn retries_accumulate_on_the_same_item() {
        let (mut manager, clock, _sink, _store) = harness();
        manager
            .start_session(entries(&[("a", "cat")]), SessionConfig::default())
            .unwrap();
        manager.get_current_item().unwrap().unwrap();

        clock.advance(Duration::seconds(2));
        let miss = manager.submit_answer("dog", None).unwrap();
        assert!(!miss.validation.is_correct);
        assert_eq!(miss.final_score, 0.0);

        clock.advance(Duration::seconds(2));
        let hit = manager.submit_answer("cat", None).unwrap();
        assert!(hit.validation.is_correct);
        // Second attempt takes the multiplicative retry penalty.
        assert_eq!(hit.final_score, 90.0);
    }
}
