//! Loop editor session.
//!
//! # Responsibility
//! - Own one draft plus the capabilities its transitions need.
//! - Gate the question suggestion call with a pending flag.
//! - Commit the assembled loop, or a delete intent, to the owning repository.
//!
//! # Invariants
//! - At most one suggestion request is outstanding at a time.
//! - Settling a suggestion always clears the pending flag.
//! - A failed suggestion leaves the question list untouched.
//! - Submit calls `LoopCommit::save_loop` at most once and only with a named loop.

use crate::capability::{
    AvatarResolver, Clock, IdGenerator, PravatarResolver, SystemClock, UuidIdGenerator,
};
use crate::model::loop_record::{Loop, LoopId};
use crate::model::records::QuestionId;
use crate::repo::loop_repo::LoopCommit;
use crate::service::draft::{DraftAction, DraftContext, DraftError, LoopDraft};
use crate::suggest::{QuestionSuggester, SuggestError, SuggestionRequest};
use log::{info, warn};

/// Prompt shown before a loop is deleted.
pub const DELETE_CONFIRMATION_PROMPT: &str =
    "Are you sure? This will delete all history for this loop.";

/// Yes/no gate in front of destructive actions.
pub trait DeleteConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> DeleteConfirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of one suggestion round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Suggestions were appended; ids in append order.
    Added(Vec<QuestionId>),
    /// The service failed; questions are unchanged.
    Failed { reason: String },
    /// Another request is still pending; nothing was sent.
    Busy,
}

/// Editing session for one new or existing loop.
pub struct EditorSession {
    draft: LoopDraft,
    ids: Box<dyn IdGenerator>,
    avatars: Box<dyn AvatarResolver>,
    clock: Box<dyn Clock>,
    suggestion_pending: bool,
}

impl EditorSession {
    /// Opens a session with UUID ids, pravatar avatars and the system clock.
    pub fn new(existing: Option<&Loop>) -> Self {
        Self::with_capabilities(
            existing,
            Box::new(UuidIdGenerator),
            Box::new(PravatarResolver),
            Box::new(SystemClock),
        )
    }

    pub fn with_capabilities(
        existing: Option<&Loop>,
        ids: Box<dyn IdGenerator>,
        avatars: Box<dyn AvatarResolver>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let draft = match existing {
            Some(record) => LoopDraft::from_loop(record),
            None => LoopDraft::new(),
        };
        Self {
            draft,
            ids,
            avatars,
            clock,
            suggestion_pending: false,
        }
    }

    /// Resumes a session from a draft held by the shell between calls.
    pub fn resume(draft: LoopDraft) -> Self {
        Self {
            draft,
            ids: Box::new(UuidIdGenerator),
            avatars: Box::new(PravatarResolver),
            clock: Box::new(SystemClock),
            suggestion_pending: false,
        }
    }

    pub fn draft(&self) -> &LoopDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    /// Page heading for the current mode.
    pub fn heading(&self) -> &'static str {
        self.draft.heading()
    }

    /// Applies one local edit.
    pub fn dispatch(&mut self, action: DraftAction) {
        let mut ctx = DraftContext {
            ids: self.ids.as_mut(),
            avatars: self.avatars.as_ref(),
        };
        self.draft = self.draft.apply(action, &mut ctx);
    }

    pub fn is_suggestion_pending(&self) -> bool {
        self.suggestion_pending
    }

    /// Marks a suggestion call as in flight.
    ///
    /// Returns `None` while a previous call has not settled.
    pub fn begin_suggestion(&mut self) -> Option<SuggestionRequest> {
        if self.suggestion_pending {
            return None;
        }
        self.suggestion_pending = true;
        Some(self.draft.suggestion_request())
    }

    /// Settles the in-flight suggestion call.
    pub fn finish_suggestion(
        &mut self,
        result: Result<Vec<String>, SuggestError>,
    ) -> SuggestionOutcome {
        self.suggestion_pending = false;
        match result {
            Ok(texts) => {
                let before = self.draft.questions.len();
                self.dispatch(DraftAction::AppendQuestions(texts));
                let added = self.draft.questions[before..]
                    .iter()
                    .map(|question| question.id.clone())
                    .collect::<Vec<_>>();
                info!(
                    "event=question_suggest module=editor status=ok added={}",
                    added.len()
                );
                SuggestionOutcome::Added(added)
            }
            Err(err) => {
                warn!(
                    "event=question_suggest module=editor status=error error={}",
                    err
                );
                SuggestionOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Runs one full suggestion round against `suggester`.
    pub fn suggest_with(&mut self, suggester: &dyn QuestionSuggester) -> SuggestionOutcome {
        match self.begin_suggestion() {
            Some(request) => {
                let result = suggester.suggest_questions(&request);
                self.finish_suggestion(result)
            }
            None => SuggestionOutcome::Busy,
        }
    }

    /// Assembles the loop and hands it to `commit`.
    pub fn submit(&mut self, commit: &mut dyn LoopCommit) -> Result<LoopId, DraftError> {
        let record = self.draft.build_loop(self.ids.as_mut(), self.clock.as_ref())?;
        let loop_id = record.id.clone();
        let mode = if self.is_editing() { "update" } else { "create" };
        commit.save_loop(record)?;
        info!(
            "event=loop_submit module=editor status=ok mode={} loop_id={}",
            mode, loop_id
        );
        Ok(loop_id)
    }

    /// Deletes the loop being edited after confirmation.
    ///
    /// Returns `Ok(None)` when the user declines.
    pub fn delete(
        &self,
        confirmation: &mut dyn DeleteConfirmation,
        commit: &mut dyn LoopCommit,
    ) -> Result<Option<LoopId>, DraftError> {
        let loop_id = match &self.draft.base {
            Some(base) => base.id.clone(),
            None => return Err(DraftError::NotEditing),
        };
        if !confirmation.confirm(DELETE_CONFIRMATION_PROMPT) {
            info!(
                "event=loop_delete module=editor status=cancelled loop_id={}",
                loop_id
            );
            return Ok(None);
        }
        let removed = commit.delete_loop(&loop_id)?;
        info!(
            "event=loop_delete module=editor status=ok loop_id={} removed={}",
            loop_id, removed
        );
        Ok(Some(loop_id))
    }
}
