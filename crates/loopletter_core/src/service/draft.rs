//! Loop editor draft and its pure transitions.
//!
//! # Responsibility
//! - Hold the in-progress state of a loop being created or edited.
//! - Apply editor actions as pure `draft -> draft` transitions.
//! - Assemble the final `Loop` record for commit.
//!
//! # Invariants
//! - Transitions never touch the persisted loop; only `build_loop` reads `base`.
//! - Question and member lists keep insertion order.
//! - Removing a missing id is a no-op.
//! - Blank inputs (after trim) never create questions or members.

use crate::capability::{AvatarResolver, Clock, IdGenerator};
use crate::model::loop_record::{Category, Frequency, Loop};
use crate::model::records::{Member, MemberId, Question, QuestionId};
use crate::repo::loop_repo::RepoError;
use crate::suggest::SuggestionRequest;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lead time between creating a loop and its first planned send.
pub const FIRST_SEND_LEAD_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Editor failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Submit attempted with an empty name.
    NameRequired,
    /// Delete attempted on a loop that was never saved.
    NotEditing,
    /// The owning repository refused the commit.
    Commit(RepoError),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "loop name is required"),
            Self::NotEditing => write!(f, "only saved loops can be deleted"),
            Self::Commit(err) => write!(f, "loop commit failed: {err}"),
        }
    }
}

impl Error for DraftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Commit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DraftError {
    fn from(value: RepoError) -> Self {
        Self::Commit(value)
    }
}

/// One local edit on the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum DraftAction {
    SetName(String),
    SetDescription(String),
    SetCategory(Category),
    SetFrequency(Frequency),
    SetQuestionInput(String),
    /// Appends the question input buffer as a new question.
    AddQuestion,
    RemoveQuestion(QuestionId),
    SetMemberNameInput(String),
    SetMemberEmailInput(String),
    /// Appends the member input buffers as a new member.
    AddMember,
    RemoveMember(MemberId),
    /// Appends each text as a new question, in order.
    AppendQuestions(Vec<String>),
}

/// Capabilities a transition may need.
pub struct DraftContext<'a> {
    pub ids: &'a mut dyn IdGenerator,
    pub avatars: &'a dyn AvatarResolver,
}

/// Serializable editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub question_input: String,
    #[serde(default)]
    pub member_name_input: String,
    #[serde(default)]
    pub member_email_input: String,
    /// Loop being edited; `None` while creating.
    #[serde(default)]
    pub base: Option<Loop>,
}

impl LoopDraft {
    /// Empty draft for a new loop (`family`, `monthly`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded from a saved loop.
    pub fn from_loop(existing: &Loop) -> Self {
        Self {
            name: existing.name.clone(),
            description: existing.description.clone(),
            category: existing.category,
            frequency: existing.frequency,
            questions: existing.questions.clone(),
            members: existing.members.clone(),
            question_input: String::new(),
            member_name_input: String::new(),
            member_email_input: String::new(),
            base: Some(existing.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.base.is_some()
    }

    /// Page heading for the current mode.
    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Refine your Loop"
        } else {
            "Start a New Loop"
        }
    }

    /// Applies one action and returns the resulting draft.
    pub fn apply(&self, action: DraftAction, ctx: &mut DraftContext<'_>) -> LoopDraft {
        let mut next = self.clone();
        match action {
            DraftAction::SetName(value) => next.name = value,
            DraftAction::SetDescription(value) => next.description = value,
            DraftAction::SetCategory(value) => next.category = value,
            DraftAction::SetFrequency(value) => next.frequency = value,
            DraftAction::SetQuestionInput(value) => next.question_input = value,
            DraftAction::SetMemberNameInput(value) => next.member_name_input = value,
            DraftAction::SetMemberEmailInput(value) => next.member_email_input = value,
            DraftAction::AddQuestion => {
                if next.question_input.trim().is_empty() {
                    return next;
                }
                let text = std::mem::take(&mut next.question_input);
                next.questions.push(Question {
                    id: ctx.ids.next_id(),
                    text,
                });
            }
            DraftAction::RemoveQuestion(id) => next.questions.retain(|question| question.id != id),
            DraftAction::AddMember => {
                if next.member_name_input.trim().is_empty()
                    || next.member_email_input.trim().is_empty()
                {
                    return next;
                }
                let name = std::mem::take(&mut next.member_name_input);
                let email = std::mem::take(&mut next.member_email_input);
                next.members.push(Member {
                    id: ctx.ids.next_id(),
                    avatar: ctx.avatars.avatar_for(&email),
                    name,
                    email,
                });
            }
            DraftAction::RemoveMember(id) => next.members.retain(|member| member.id != id),
            DraftAction::AppendQuestions(texts) => {
                for text in texts {
                    next.questions.push(Question {
                        id: ctx.ids.next_id(),
                        text,
                    });
                }
            }
        }
        next
    }

    /// Request for the question suggestion service.
    pub fn suggestion_request(&self) -> SuggestionRequest {
        SuggestionRequest {
            category: self.category,
            description: self.description.clone(),
            existing_questions: self
                .questions
                .iter()
                .map(|question| question.text.clone())
                .collect(),
        }
    }

    /// Assembles the complete loop record.
    ///
    /// # Contract
    /// - Editing keeps `id`, `responses`, `last_generated_at`, `header_image`,
    ///   `intro_text` and `next_send_date` from `base`.
    /// - Creating takes a fresh id and schedules the first send
    ///   `FIRST_SEND_LEAD_MS` after `clock`.
    pub fn build_loop(
        &self,
        ids: &mut dyn IdGenerator,
        clock: &dyn Clock,
    ) -> Result<Loop, DraftError> {
        if self.name.is_empty() {
            return Err(DraftError::NameRequired);
        }

        let base = self.base.as_ref();
        let id = match base {
            Some(existing) => existing.id.clone(),
            None => ids.next_id(),
        };
        let next_send_date = base
            .and_then(|existing| existing.next_send_date)
            .unwrap_or_else(|| clock.now_ms().saturating_add(FIRST_SEND_LEAD_MS));

        Ok(Loop {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            frequency: self.frequency,
            members: self.members.clone(),
            questions: self.questions.clone(),
            responses: base
                .map(|existing| existing.responses.clone())
                .unwrap_or_default(),
            last_generated_at: base.and_then(|existing| existing.last_generated_at),
            header_image: base.and_then(|existing| existing.header_image.clone()),
            intro_text: base.and_then(|existing| existing.intro_text.clone()),
            next_send_date: Some(next_send_date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftAction, DraftContext, DraftError, LoopDraft, FIRST_SEND_LEAD_MS};
    use crate::capability::{FixedClock, PravatarResolver, SequentialIdGenerator};
    use crate::model::loop_record::{Category, Frequency};

    fn run(
        draft: &LoopDraft,
        ids: &mut SequentialIdGenerator,
        actions: Vec<DraftAction>,
    ) -> LoopDraft {
        let avatars = PravatarResolver;
        let mut ctx = DraftContext {
            ids,
            avatars: &avatars,
        };
        actions
            .into_iter()
            .fold(draft.clone(), |current, action| current.apply(action, &mut ctx))
    }

    #[test]
    fn new_draft_defaults_to_family_monthly() {
        let draft = LoopDraft::new();
        assert_eq!(draft.category, Category::Family);
        assert_eq!(draft.frequency, Frequency::Monthly);
        assert!(!draft.is_editing());
    }

    #[test]
    fn add_question_keeps_raw_text_and_clears_input() {
        let mut ids = SequentialIdGenerator::new("q");
        let draft = run(
            &LoopDraft::new(),
            &mut ids,
            vec![
                DraftAction::SetQuestionInput(" What's new? ".to_string()),
                DraftAction::AddQuestion,
            ],
        );
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].id, "q-1");
        assert_eq!(draft.questions[0].text, " What's new? ");
        assert!(draft.question_input.is_empty());
    }

    #[test]
    fn blank_member_inputs_are_ignored_and_kept() {
        let mut ids = SequentialIdGenerator::new("m");
        let draft = run(
            &LoopDraft::new(),
            &mut ids,
            vec![
                DraftAction::SetMemberNameInput("Ada".to_string()),
                DraftAction::SetMemberEmailInput("   ".to_string()),
                DraftAction::AddMember,
            ],
        );
        assert!(draft.members.is_empty());
        assert_eq!(draft.member_name_input, "Ada");
    }

    #[test]
    fn apply_does_not_mutate_source_draft() {
        let mut ids = SequentialIdGenerator::new("q");
        let source = LoopDraft::new();
        let _ = run(
            &source,
            &mut ids,
            vec![DraftAction::AppendQuestions(vec!["a".to_string()])],
        );
        assert!(source.questions.is_empty());
    }

    #[test]
    fn build_loop_requires_name() {
        let mut ids = SequentialIdGenerator::new("loop");
        let err = LoopDraft::new()
            .build_loop(&mut ids, &FixedClock(0))
            .unwrap_err();
        assert_eq!(err, DraftError::NameRequired);
    }

    #[test]
    fn build_loop_schedules_first_send_for_new_loop() {
        let mut ids = SequentialIdGenerator::new("loop");
        let mut draft = LoopDraft::new();
        draft.name = "Cousins".to_string();
        let record = draft.build_loop(&mut ids, &FixedClock(1_000)).unwrap();
        assert_eq!(record.id, "loop-1");
        assert_eq!(record.next_send_date, Some(1_000 + FIRST_SEND_LEAD_MS));
        assert!(record.responses.is_empty());
    }

    #[test]
    fn draft_serializes_with_tagged_actions() {
        let action = DraftAction::RemoveMember("m-1".to_string());
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "remove_member");
        assert_eq!(json["value"], "m-1");

        let unit = serde_json::to_value(DraftAction::AddQuestion).unwrap();
        assert_eq!(unit["action"], "add_question");
    }
}
