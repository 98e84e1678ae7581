//! Core domain logic for Loopletter.
//! This crate is the single source of truth for loop, editor and response rules.

pub mod capability;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod suggest;

pub use capability::{
    AvatarResolver, Clock, FixedClock, IdGenerator, PravatarResolver, SequentialIdGenerator,
    SystemClock, UuidIdGenerator,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::loop_record::{Category, Frequency, Loop, LoopId, LoopValidationError};
pub use model::records::{Member, MemberId, Question, QuestionId, Response, ResponseId};
pub use repo::loop_repo::{
    InMemoryLoopRepository, LoopCommit, LoopResponseSink, RepoError, RepoResult, ResponseSink,
};
pub use service::dashboard::{summarize, LoopCard};
pub use service::draft::{DraftAction, DraftContext, DraftError, LoopDraft, FIRST_SEND_LEAD_MS};
pub use service::editor::{
    DeleteConfirmation, EditorSession, SuggestionOutcome, DELETE_CONFIRMATION_PROMPT,
};
pub use service::reader::{compose_sections, Edition, EditionEntry, EditionSection};
pub use service::respond::{FormState, RespondError, ResponseForm};
pub use suggest::{CuratedQuestionSuggester, QuestionSuggester, SuggestError, SuggestionRequest};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
