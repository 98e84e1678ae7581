//! Loop repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Receive whole-record loop commits and delete intents from the editor.
//! - Append submitted responses to their owning loop.
//!
//! # Invariants
//! - Writes call `Loop::validate()` before mutating state.
//! - Save replaces the whole record; there is no field-level merge.
//! - Delete removes the whole aggregate and is idempotent.
//! - Insertion order of loops is preserved for listing.

use crate::model::loop_record::{Loop, LoopId, LoopValidationError};
use crate::model::records::Response;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for loop persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(LoopValidationError),
    LoopNotFound(LoopId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::LoopNotFound(id) => write!(f, "loop not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::LoopNotFound(_) => None,
        }
    }
}

impl From<LoopValidationError> for RepoError {
    fn from(value: LoopValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Owner of loop records that accepts editor commits.
pub trait LoopCommit {
    /// Inserts the loop or replaces the record with the same id.
    fn save_loop(&mut self, record: Loop) -> RepoResult<()>;

    /// Removes the loop with all its children.
    ///
    /// Returns `false` when no loop had this id.
    fn delete_loop(&mut self, id: &str) -> RepoResult<bool>;
}

/// Receiver of submitted responses, called once per response.
pub trait ResponseSink {
    fn submit_response(&mut self, response: Response);
}

impl ResponseSink for Vec<Response> {
    fn submit_response(&mut self, response: Response) {
        self.push(response);
    }
}

/// Process-local loop store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoopRepository {
    loops: Vec<Loop>,
}

impl InMemoryLoopRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Loop> {
        self.loops.iter().find(|record| record.id == id)
    }

    /// Lists loops in first-save order.
    pub fn list(&self) -> &[Loop] {
        &self.loops
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Returns a sink that appends responses to the given loop.
    pub fn response_sink(&mut self, loop_id: &str) -> RepoResult<LoopResponseSink<'_>> {
        let record = self
            .loops
            .iter_mut()
            .find(|record| record.id == loop_id)
            .ok_or_else(|| RepoError::LoopNotFound(loop_id.to_string()))?;
        Ok(LoopResponseSink { record })
    }
}

impl LoopCommit for InMemoryLoopRepository {
    fn save_loop(&mut self, record: Loop) -> RepoResult<()> {
        record.validate()?;

        let mode = if self.get(&record.id).is_some() {
            "replace"
        } else {
            "insert"
        };
        info!(
            "event=loop_save module=repo status=ok mode={} loop_id={} members={} questions={}",
            mode,
            record.id,
            record.members.len(),
            record.questions.len()
        );
        match self.loops.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => self.loops.push(record),
        }
        Ok(())
    }

    fn delete_loop(&mut self, id: &str) -> RepoResult<bool> {
        let before = self.loops.len();
        self.loops.retain(|record| record.id != id);
        let removed = self.loops.len() != before;
        info!(
            "event=loop_delete module=repo status=ok loop_id={} removed={}",
            id, removed
        );
        Ok(removed)
    }
}

/// Append-only response sink bound to one stored loop.
pub struct LoopResponseSink<'repo> {
    record: &'repo mut Loop,
}

impl ResponseSink for LoopResponseSink<'_> {
    fn submit_response(&mut self, response: Response) {
        debug!(
            "event=response_append module=repo status=ok loop_id={} response_id={} question_id={}",
            self.record.id, response.id, response.question_id
        );
        self.record.responses.push(response);
    }
}
