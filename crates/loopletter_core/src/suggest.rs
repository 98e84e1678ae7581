//! Question suggestion service contract and offline implementation.
//!
//! # Responsibility
//! - Define the request/response shape of the suggestion service.
//! - Ship a curated, model-free suggester usable without network access.
//!
//! # Invariants
//! - Suggesters never mutate the request.
//! - Suggestions never repeat a prompt already present in the request.

use crate::model::loop_record::Category;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default number of prompts returned per call.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

const FAMILY_PROMPTS: &[&str] = &[
    "What made you laugh the hardest this month?",
    "What is one small win you want the family to celebrate?",
    "Which meal have you been cooking on repeat lately?",
    "What is a memory from childhood that came back to you recently?",
    "Where would you take the whole family if money were no object?",
    "What are you looking forward to before we next see each other?",
];

const FRIENDS_PROMPTS: &[&str] = &[
    "What is the best thing you watched, read or listened to lately?",
    "What is something new you tried since we last caught up?",
    "Which place did you visit that we should all go to together?",
    "What is currently taking up most of your headspace?",
    "What is a hot take you have been dying to share?",
    "What plans do you have for the coming weeks?",
];

const WORK_PROMPTS: &[&str] = &[
    "What did you ship or finish that you are proud of?",
    "What is one thing that slowed you down and how could we help?",
    "Who on the team deserves a shout-out and why?",
    "What are you learning outside your usual responsibilities?",
    "What is your focus for the next cycle?",
    "What tool or habit made your week easier?",
];

const OTHER_PROMPTS: &[&str] = &[
    "What has been the highlight of your last few weeks?",
    "What is something you are currently curious about?",
    "What photo from your camera roll tells the story of this month?",
    "What is one thing you want to share with the group?",
    "What are you grateful for right now?",
    "What is next on your list?",
];

/// Input of one suggestion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub category: Category,
    pub description: String,
    /// Texts of the questions already on the draft.
    pub existing_questions: Vec<String>,
}

/// Failure reported by a suggestion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    /// Service reachable but returned nothing usable.
    Exhausted,
    /// Service failed; message is diagnostic only.
    Unavailable(String),
}

impl Display for SuggestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "no new question suggestions available"),
            Self::Unavailable(message) => {
                write!(f, "question suggestion service unavailable: {message}")
            }
        }
    }
}

impl Error for SuggestError {}

/// External service that proposes discussion prompts.
pub trait QuestionSuggester {
    fn suggest_questions(&self, request: &SuggestionRequest) -> Result<Vec<String>, SuggestError>;
}

/// Offline suggester drawing from a fixed per-category prompt bank.
#[derive(Debug, Clone, Copy)]
pub struct CuratedQuestionSuggester {
    limit: usize,
}

impl Default for CuratedQuestionSuggester {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl CuratedQuestionSuggester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of prompts per call. Zero falls back to the default.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: if limit == 0 {
                DEFAULT_SUGGESTION_LIMIT
            } else {
                limit
            },
        }
    }
}

impl QuestionSuggester for CuratedQuestionSuggester {
    fn suggest_questions(&self, request: &SuggestionRequest) -> Result<Vec<String>, SuggestError> {
        let existing = request
            .existing_questions
            .iter()
            .map(|text| normalize_prompt(text))
            .collect::<HashSet<_>>();

        let suggestions = prompt_bank(request.category)
            .iter()
            .filter(|prompt| !existing.contains(&normalize_prompt(prompt)))
            .take(self.limit)
            .map(|prompt| (*prompt).to_string())
            .collect::<Vec<_>>();

        if suggestions.is_empty() {
            return Err(SuggestError::Exhausted);
        }
        Ok(suggestions)
    }
}

fn prompt_bank(category: Category) -> &'static [&'static str] {
    match category {
        Category::Family => FAMILY_PROMPTS,
        Category::Friends => FRIENDS_PROMPTS,
        Category::Work => WORK_PROMPTS,
        Category::Other => OTHER_PROMPTS,
    }
}

fn normalize_prompt(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{
        CuratedQuestionSuggester, QuestionSuggester, SuggestError, SuggestionRequest,
        DEFAULT_SUGGESTION_LIMIT, WORK_PROMPTS,
    };
    use crate::model::loop_record::Category;

    fn request(category: Category, existing: &[&str]) -> SuggestionRequest {
        SuggestionRequest {
            category,
            description: "weekly team digest".to_string(),
            existing_questions: existing.iter().map(|text| text.to_string()).collect(),
        }
    }

    #[test]
    fn returns_default_number_of_prompts_for_category() {
        let suggestions = CuratedQuestionSuggester::new()
            .suggest_questions(&request(Category::Work, &[]))
            .expect("work bank is not empty");
        assert_eq!(suggestions.len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(suggestions[0], WORK_PROMPTS[0]);
    }

    #[test]
    fn skips_prompts_already_on_the_draft_ignoring_case() {
        let existing = WORK_PROMPTS[0].to_uppercase();
        let suggestions = CuratedQuestionSuggester::with_limit(1)
            .suggest_questions(&request(Category::Work, &[format!("  {existing} ").as_str()]))
            .expect("bank has more prompts");
        assert_eq!(suggestions, vec![WORK_PROMPTS[1].to_string()]);
    }

    #[test]
    fn exhausted_bank_fails() {
        let err = CuratedQuestionSuggester::new()
            .suggest_questions(&request(Category::Work, WORK_PROMPTS))
            .unwrap_err();
        assert_eq!(err, SuggestError::Exhausted);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let suggestions = CuratedQuestionSuggester::with_limit(0)
            .suggest_questions(&request(Category::Family, &[]))
            .unwrap();
        assert_eq!(suggestions.len(), DEFAULT_SUGGESTION_LIMIT);
    }
}
