//! Loop aggregate model.
//!
//! # Responsibility
//! - Define the aggregate root that owns members, questions and responses.
//! - Provide category/frequency enums with their display labels.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a loop and never reassigned.
//! - Child lists are owned by exactly one loop.
//! - Persisted loops always carry a non-empty `id` and `name`.

use crate::model::records::{Member, Question, Response};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a loop.
pub type LoopId = String;

/// Audience a loop is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Family,
    Friends,
    Work,
    Other,
}

impl Category {
    /// All categories in picker order.
    pub const ALL: [Category; 4] = [Self::Family, Self::Friends, Self::Work, Self::Other];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friends => "friends",
            Self::Work => "work",
            Self::Other => "other",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friends => "Friends",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }

    /// Emoji shown on dashboard cards.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Family => "🏠",
            Self::Friends => "🥂",
            Self::Work => "💼",
            Self::Other => "✨",
        }
    }
}

/// Newsletter cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
}

impl Frequency {
    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly => "Monthly",
        }
    }
}

/// Validation failures for loop records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopValidationError {
    /// Loop id is an empty string.
    EmptyId,
    /// Loop name is an empty string.
    EmptyName { loop_id: LoopId },
}

impl Display for LoopValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "loop id must not be empty"),
            Self::EmptyName { loop_id } => write!(f, "loop `{loop_id}` must have a name"),
        }
    }
}

impl Error for LoopValidationError {}

/// Aggregate root for one private newsletter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    /// Stable id assigned on first save.
    pub id: LoopId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub frequency: Frequency,
    /// Ordered member circle.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Ordered discussion prompts.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Append-only responses in submission order.
    #[serde(default)]
    pub responses: Vec<Response>,
    /// Unix epoch milliseconds of the last composed edition.
    #[serde(default)]
    pub last_generated_at: Option<i64>,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub intro_text: Option<String>,
    /// Unix epoch milliseconds of the next planned send.
    #[serde(default)]
    pub next_send_date: Option<i64>,
}

impl Loop {
    /// Creates an empty loop with default category and frequency.
    pub fn new(id: impl Into<LoopId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: Category::default(),
            frequency: Frequency::default(),
            members: Vec::new(),
            questions: Vec::new(),
            responses: Vec::new(),
            last_generated_at: None,
            header_image: None,
            intro_text: None,
            next_send_date: None,
        }
    }

    /// Checks record-level invariants before the loop is accepted by a store.
    pub fn validate(&self) -> Result<(), LoopValidationError> {
        if self.id.is_empty() {
            return Err(LoopValidationError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(LoopValidationError::EmptyName {
                loop_id: self.id.clone(),
            });
        }
        Ok(())
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id == member_id)
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Frequency, Loop, LoopValidationError};

    #[test]
    fn new_loop_uses_family_monthly_defaults() {
        let record = Loop::new("loop-1", "Cousins");
        assert_eq!(record.category, Category::Family);
        assert_eq!(record.frequency, Frequency::Monthly);
        assert!(record.members.is_empty());
        assert_eq!(record.next_send_date, None);
    }

    #[test]
    fn validate_rejects_empty_fields() {
        assert_eq!(
            Loop::new("", "x").validate(),
            Err(LoopValidationError::EmptyId)
        );
        assert_eq!(
            Loop::new("loop-1", "").validate(),
            Err(LoopValidationError::EmptyName {
                loop_id: "loop-1".to_string()
            })
        );
        assert!(Loop::new("loop-1", "Book club").validate().is_ok());
    }

    #[test]
    fn labels_match_picker_copy() {
        assert_eq!(Frequency::Biweekly.label(), "Bi-weekly");
        assert_eq!(Category::Work.icon(), "💼");
        assert_eq!(Category::ALL.len(), 4);
    }
}
