//! Newsletter edition composition.
//!
//! # Responsibility
//! - Group a loop's responses by question for the public reader.
//! - Resolve responding members to their display name and avatar.
//!
//! # Invariants
//! - Composition is pure and can be recomputed from loop state at any time.
//! - Sections follow question order; entries follow response insertion order.
//! - A response with an unknown member or question is skipped on its own.
//! - Questions without any resolvable response produce no section.

use crate::model::loop_record::Loop;
use crate::model::records::{Member, Question, QuestionId, Response};
use chrono::DateTime;
use serde::Serialize;

/// Intro shown when a loop has no custom intro text.
pub const DEFAULT_INTRO_TEXT: &str =
    "Welcome to our circle. Here's a look at what everyone's been up to.";
/// Edition label used before the first edition is generated.
pub const RECENT_EDITION_LABEL: &str = "Recent Edition";

/// One member's answer as printed in an edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionEntry {
    pub name: String,
    pub avatar: String,
    pub answer: String,
}

/// All printed answers to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionSection {
    pub question_id: QuestionId,
    pub question: String,
    pub entries: Vec<EditionEntry>,
}

/// Read-only view of a composed newsletter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edition {
    pub title: String,
    pub header_image: Option<String>,
    pub intro_text: String,
    /// Long-form date of the last generated edition, or "Recent Edition".
    pub edition_label: String,
    pub sections: Vec<EditionSection>,
}

impl Edition {
    pub fn compose(source: &Loop) -> Self {
        Self {
            title: source.name.clone(),
            header_image: source.header_image.clone(),
            intro_text: source
                .intro_text
                .clone()
                .unwrap_or_else(|| DEFAULT_INTRO_TEXT.to_string()),
            edition_label: source
                .last_generated_at
                .and_then(format_long_date)
                .unwrap_or_else(|| RECENT_EDITION_LABEL.to_string()),
            sections: compose_sections(&source.questions, &source.responses, &source.members),
        }
    }
}

/// Groups responses under their questions.
pub fn compose_sections(
    questions: &[Question],
    responses: &[Response],
    members: &[Member],
) -> Vec<EditionSection> {
    let mut sections = questions
        .iter()
        .map(|question| EditionSection {
            question_id: question.id.clone(),
            question: question.text.clone(),
            entries: Vec::new(),
        })
        .collect::<Vec<_>>();

    for response in responses {
        let Some(section) = sections
            .iter_mut()
            .find(|section| section.question_id == response.question_id)
        else {
            continue;
        };
        let Some(member) = members.iter().find(|member| member.id == response.member_id) else {
            continue;
        };
        section.entries.push(EditionEntry {
            name: member.name.clone(),
            avatar: member.avatar.clone(),
            answer: response.answer.clone(),
        });
    }

    sections.retain(|section| !section.entries.is_empty());
    sections
}

/// Formats epoch milliseconds as e.g. "March 5, 2026" (UTC).
pub fn format_long_date(epoch_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(epoch_ms).map(|at| at.format("%B %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_long_date, Edition, DEFAULT_INTRO_TEXT, RECENT_EDITION_LABEL};
    use crate::model::loop_record::Loop;

    #[test]
    fn long_date_uses_month_name() {
        // 2026-03-05T12:00:00Z
        assert_eq!(
            format_long_date(1_772_712_000_000).as_deref(),
            Some("March 5, 2026")
        );
    }

    #[test]
    fn compose_falls_back_to_default_copy() {
        let edition = Edition::compose(&Loop::new("loop-1", "Cousins"));
        assert_eq!(edition.title, "Cousins");
        assert_eq!(edition.intro_text, DEFAULT_INTRO_TEXT);
        assert_eq!(edition.edition_label, RECENT_EDITION_LABEL);
        assert!(edition.sections.is_empty());
    }

    #[test]
    fn compose_keeps_custom_intro_and_header() {
        let mut record = Loop::new("loop-1", "Cousins");
        record.intro_text = Some("Hello all".to_string());
        record.header_image = Some("cover.jpg".to_string());
        let edition = Edition::compose(&record);
        assert_eq!(edition.intro_text, "Hello all");
        assert_eq!(edition.header_image.as_deref(), Some("cover.jpg"));
    }
}
