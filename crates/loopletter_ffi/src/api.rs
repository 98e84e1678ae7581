//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose editor, response and reader use-cases to Dart via FRB.
//! - Carry drafts and loops across the boundary as JSON strings.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in envelopes (`ok=false` + message), never thrown.
//! - Calls are stateless; the shell owns the draft/loop JSON between calls.

use loopletter_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CuratedQuestionSuggester, DraftAction, DraftContext, Edition, EditorSession,
    InMemoryLoopRepository, Loop, LoopCommit, LoopDraft, PravatarResolver, ResponseForm,
    SuggestionOutcome, UuidIdGenerator,
};
use log::warn;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Editor state returned to the shell after each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEnvelope {
    pub ok: bool,
    /// Serialized `LoopDraft`; present whenever `ok` is true.
    pub draft_json: Option<String>,
    /// "Start a New Loop" or "Refine your Loop".
    pub heading: String,
    pub message: String,
}

impl DraftEnvelope {
    fn success(draft: &LoopDraft, message: impl Into<String>) -> Self {
        match serde_json::to_string(draft) {
            Ok(draft_json) => Self {
                ok: true,
                draft_json: Some(draft_json),
                heading: draft.heading().to_string(),
                message: message.into(),
            },
            Err(err) => Self::failure(format!("draft encode failed: {err}")),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            draft_json: None,
            heading: String::new(),
            message: message.into(),
        }
    }
}

/// Result of committing a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopEnvelope {
    pub ok: bool,
    pub loop_id: Option<String>,
    /// Serialized `Loop` to hand to the shell's store.
    pub loop_json: Option<String>,
    pub message: String,
}

impl LoopEnvelope {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            loop_id: None,
            loop_json: None,
            message: message.into(),
        }
    }
}

/// One answer typed on the public response page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerInput {
    pub question_id: String,
    pub text: String,
}

/// Result of a public response submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondEnvelope {
    pub ok: bool,
    /// Number of responses recorded.
    pub emitted: u32,
    /// Loop with the new responses appended.
    pub loop_json: Option<String>,
    pub message: String,
}

/// Printed answer in an edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionEntryItem {
    pub name: String,
    pub avatar: String,
    pub answer: String,
}

/// All printed answers for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionSectionItem {
    pub question: String,
    pub entries: Vec<EditionEntryItem>,
}

/// Composed newsletter for the reader page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionView {
    pub ok: bool,
    pub title: String,
    pub header_image: Option<String>,
    pub intro_text: String,
    pub edition_label: String,
    pub sections: Vec<EditionSectionItem>,
    pub message: String,
}

/// Opens an editor draft, seeded from `loop_json` when editing.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_open(loop_json: Option<String>) -> DraftEnvelope {
    match loop_json {
        Some(raw) => match decode_loop(&raw) {
            Ok(existing) => {
                DraftEnvelope::success(&LoopDraft::from_loop(&existing), "Draft opened.")
            }
            Err(message) => DraftEnvelope::failure(message),
        },
        None => DraftEnvelope::success(&LoopDraft::new(), "Draft opened."),
    }
}

/// Applies one editor action to a draft.
///
/// `action_json` uses the tagged shape `{"action": "...", "value": ...}`,
/// e.g. `{"action":"add_question"}` or `{"action":"set_name","value":"Crew"}`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_apply(draft_json: String, action_json: String) -> DraftEnvelope {
    let draft = match decode_draft(&draft_json) {
        Ok(draft) => draft,
        Err(message) => return DraftEnvelope::failure(message),
    };
    let action = match serde_json::from_str::<DraftAction>(&action_json) {
        Ok(action) => action,
        Err(err) => return DraftEnvelope::failure(format!("editor_apply failed: {err}")),
    };

    let mut ids = UuidIdGenerator;
    let avatars = PravatarResolver;
    let mut ctx = DraftContext {
        ids: &mut ids,
        avatars: &avatars,
    };
    DraftEnvelope::success(&draft.apply(action, &mut ctx), "Draft updated.")
}

/// Appends curated question suggestions to a draft.
///
/// A failed suggestion returns `ok=true` with the draft unchanged and the
/// reason in `message`, so the shell can keep editing.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_suggest(draft_json: String) -> DraftEnvelope {
    let draft = match decode_draft(&draft_json) {
        Ok(draft) => draft,
        Err(message) => return DraftEnvelope::failure(message),
    };

    let mut session = EditorSession::resume(draft);
    let message = match session.suggest_with(&CuratedQuestionSuggester::new()) {
        SuggestionOutcome::Added(ids) => format!("Added {} question(s).", ids.len()),
        SuggestionOutcome::Failed { reason } => format!("No suggestions: {reason}"),
        SuggestionOutcome::Busy => "Suggestion already running.".to_string(),
    };
    DraftEnvelope::success(session.draft(), message)
}

/// Validates a draft and returns the complete loop record.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_submit(draft_json: String) -> LoopEnvelope {
    let draft = match decode_draft(&draft_json) {
        Ok(draft) => draft,
        Err(message) => return LoopEnvelope::failure(message),
    };

    let mut repo = InMemoryLoopRepository::new();
    if let Some(base) = draft.base.clone() {
        if let Err(err) = repo.save_loop(base) {
            return LoopEnvelope::failure(format!("editor_submit failed: {err}"));
        }
    }

    let mut session = EditorSession::resume(draft);
    let loop_id = match session.submit(&mut repo) {
        Ok(loop_id) => loop_id,
        Err(err) => return LoopEnvelope::failure(format!("editor_submit failed: {err}")),
    };
    let Some(saved) = repo.get(&loop_id) else {
        return LoopEnvelope::failure("editor_submit failed: saved loop missing");
    };
    match serde_json::to_string(saved) {
        Ok(loop_json) => LoopEnvelope {
            ok: true,
            loop_id: Some(loop_id),
            loop_json: Some(loop_json),
            message: "Loop saved.".to_string(),
        },
        Err(err) => LoopEnvelope::failure(format!("loop encode failed: {err}")),
    }
}

/// Composes the newsletter edition of a loop.
#[flutter_rust_bridge::frb(sync)]
pub fn reader_compose(loop_json: String) -> EditionView {
    let source = match decode_loop(&loop_json) {
        Ok(source) => source,
        Err(message) => {
            return EditionView {
                ok: false,
                title: String::new(),
                header_image: None,
                intro_text: String::new(),
                edition_label: String::new(),
                sections: Vec::new(),
                message,
            }
        }
    };

    let edition = Edition::compose(&source);
    EditionView {
        ok: true,
        title: edition.title,
        header_image: edition.header_image,
        intro_text: edition.intro_text,
        edition_label: edition.edition_label,
        sections: edition
            .sections
            .into_iter()
            .map(|section| EditionSectionItem {
                question: section.question,
                entries: section
                    .entries
                    .into_iter()
                    .map(|entry| EditionEntryItem {
                        name: entry.name,
                        avatar: entry.avatar,
                        answer: entry.answer,
                    })
                    .collect(),
            })
            .collect(),
        message: String::new(),
    }
}

/// Records one member's answers and returns the updated loop.
#[flutter_rust_bridge::frb(sync)]
pub fn respond_submit(
    loop_json: String,
    member_id: String,
    answers: Vec<AnswerInput>,
) -> RespondEnvelope {
    let failure = |message: String| RespondEnvelope {
        ok: false,
        emitted: 0,
        loop_json: None,
        message,
    };

    let mut target = match decode_loop(&loop_json) {
        Ok(target) => target,
        Err(message) => return failure(message),
    };

    let mut form = ResponseForm::new(&target);
    if !member_id.is_empty() {
        if let Err(err) = form.select_member(&member_id) {
            return failure(format!("respond_submit failed: {err}"));
        }
    }
    for answer in answers {
        form.set_answer(&answer.question_id, answer.text);
    }

    // Appends straight onto the decoded loop; the aggregate is not re-validated.
    let emitted = match form.submit(&mut UuidIdGenerator, &mut target.responses) {
        Ok(emitted) => emitted,
        Err(err) => return failure(format!("respond_submit failed: {err}")),
    };

    match serde_json::to_string(&target) {
        Ok(loop_json) => RespondEnvelope {
            ok: true,
            emitted: u32::try_from(emitted).unwrap_or(u32::MAX),
            loop_json: Some(loop_json),
            message: format!("Recorded {emitted} response(s)."),
        },
        Err(err) => failure(format!("loop encode failed: {err}")),
    }
}

fn decode_draft(raw: &str) -> Result<LoopDraft, String> {
    serde_json::from_str(raw).map_err(|err| {
        warn!("event=ffi_decode module=ffi status=error kind=draft");
        format!("draft decode failed: {err}")
    })
}

fn decode_loop(raw: &str) -> Result<Loop, String> {
    serde_json::from_str(raw).map_err(|err| {
        warn!("event=ffi_decode module=ffi status=error kind=loop");
        format!("loop decode failed: {err}")
    })
}
