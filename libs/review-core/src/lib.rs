//! Core review engine shared by Japanese-learning applications.
//!
//! Provides:
//! - Content adapters that turn raw entries (kana, kanji, vocabulary,
//!   sentences, custom cards) into reviewable items
//! - Answer validators per content type (script conversion, fuzzy
//!   matching, sentence similarity)
//! - A session manager driving presentation, scoring, statistics,
//!   lifecycle events, and persistence through a storage port
//! - A modified SM-2 scheduler with learning steps and a mastered state

pub mod adapter;
pub mod config;
pub mod error;
pub mod session;
pub mod srs;
pub mod text;
pub mod types;
pub mod validator;

pub use adapter::{AdapterRegistry, ContentAdapter};
pub use config::{ContentTypeConfig, ModeConfig, ValidationOptions, ValidationStrategy};
pub use error::{ReviewError, Result};
pub use session::{
    Clock, EventSink, InMemorySessionStore, ReviewSession, ReviewSessionItem, SessionConfig,
    SessionEntry, SessionEvent, SessionManager, SessionStatistics, SessionStatus, SessionStore,
    SessionSummary, SystemClock,
};
pub use srs::{schedule, ReviewOutcome, SchedulerConfig, SrsData, SrsStatus};
pub use types::{
    ContentKind, ContentMetadata, RawContent, ReviewMode, ReviewableContent,
};
pub use validator::{AnswerValidator, ValidationResult, ValidatorFactory};
