//! Child records owned by a loop.
//!
//! # Invariants
//! - Records are plain data; they carry no behavior beyond construction.
//! - `Response` ids reference members/questions of the same loop, but dangling
//!   references are tolerated and filtered at read time.

use serde::{Deserialize, Serialize};

pub type MemberId = String;
pub type QuestionId = String;
pub type ResponseId = String;

/// Person in a loop's circle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    /// Image URL derived from `email` by an avatar resolver.
    pub avatar: String,
}

/// Discussion prompt sent to members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
}

/// One member's answer to one question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub member_id: MemberId,
    pub question_id: QuestionId,
    /// Answer text exactly as typed, including surrounding whitespace.
    pub answer: String,
}
