//! Public response collection form.
//!
//! # Responsibility
//! - Bind a responding member to free-text answers, one per question.
//! - Emit one `Response` per non-blank answer on submit.
//!
//! # Invariants
//! - `Submitted` is terminal; a submitted form never emits again.
//! - Submit is refused unless a member is selected and one answer is non-blank.
//! - Emitted answers keep their raw text; blank answers are dropped.
//! - Emission follows the order in which questions were first answered.

use crate::capability::IdGenerator;
use crate::model::loop_record::{Loop, LoopId};
use crate::model::records::{MemberId, QuestionId, Response};
use crate::repo::loop_repo::ResponseSink;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle of the response form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Answering,
    Submitted,
}

/// Response form failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespondError {
    /// Member id is not part of the loop.
    UnknownMember(MemberId),
    NoMemberSelected,
    /// Every entered answer is blank.
    NoAnswers,
    AlreadySubmitted,
}

impl Display for RespondError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMember(id) => write!(f, "member not in loop: {id}"),
            Self::NoMemberSelected => write!(f, "select who is responding first"),
            Self::NoAnswers => write!(f, "at least one answer is required"),
            Self::AlreadySubmitted => write!(f, "responses were already submitted"),
        }
    }
}

impl Error for RespondError {}

/// Answer-collection state for one loop.
#[derive(Debug, Clone)]
pub struct ResponseForm {
    loop_id: LoopId,
    member_ids: Vec<MemberId>,
    selected_member: Option<MemberId>,
    answers: Vec<(QuestionId, String)>,
    state: FormState,
}

impl ResponseForm {
    pub fn new(target: &Loop) -> Self {
        Self {
            loop_id: target.id.clone(),
            member_ids: target
                .members
                .iter()
                .map(|member| member.id.clone())
                .collect(),
            selected_member: None,
            answers: Vec::new(),
            state: FormState::Answering,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn selected_member(&self) -> Option<&str> {
        self.selected_member.as_deref()
    }

    /// Picks the responding member from the loop's circle.
    pub fn select_member(&mut self, member_id: &str) -> Result<(), RespondError> {
        if !self.member_ids.iter().any(|id| id == member_id) {
            return Err(RespondError::UnknownMember(member_id.to_string()));
        }
        self.selected_member = Some(member_id.to_string());
        Ok(())
    }

    pub fn clear_member(&mut self) {
        self.selected_member = None;
    }

    /// Stores the answer for a question, replacing any earlier text.
    pub fn set_answer(&mut self, question_id: &str, text: impl Into<String>) {
        let text = text.into();
        match self.answers.iter_mut().find(|(id, _)| id == question_id) {
            Some((_, existing)) => *existing = text,
            None => self.answers.push((question_id.to_string(), text)),
        }
    }

    /// Current text for a question; empty when unanswered.
    pub fn answer(&self, question_id: &str) -> &str {
        self.answers
            .iter()
            .find(|(id, _)| id == question_id)
            .map_or("", |(_, text)| text.as_str())
    }

    pub fn can_submit(&self) -> bool {
        self.check_ready().is_ok()
    }

    /// Emits one response per non-blank answer and closes the form.
    ///
    /// Returns the number of responses handed to `sink`.
    pub fn submit(
        &mut self,
        ids: &mut dyn IdGenerator,
        sink: &mut dyn ResponseSink,
    ) -> Result<usize, RespondError> {
        let member_id = self.check_ready()?.to_string();

        let mut emitted = 0;
        for (question_id, text) in &self.answers {
            if text.trim().is_empty() {
                continue;
            }
            sink.submit_response(Response {
                id: ids.next_id(),
                member_id: member_id.clone(),
                question_id: question_id.clone(),
                answer: text.clone(),
            });
            emitted += 1;
        }

        self.state = FormState::Submitted;
        info!(
            "event=responses_submit module=respond status=ok loop_id={} member_id={} count={}",
            self.loop_id, member_id, emitted
        );
        Ok(emitted)
    }

    fn check_ready(&self) -> Result<&str, RespondError> {
        if self.state == FormState::Submitted {
            return Err(RespondError::AlreadySubmitted);
        }
        let member_id = self
            .selected_member
            .as_deref()
            .ok_or(RespondError::NoMemberSelected)?;
        if self.answers.iter().all(|(_, text)| text.trim().is_empty()) {
            return Err(RespondError::NoAnswers);
        }
        Ok(member_id)
    }
}
