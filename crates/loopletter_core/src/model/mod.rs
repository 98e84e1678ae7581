//! Loop-centric domain model.
//!
//! # Responsibility
//! - Define the records shared by editor, response and reader flows.
//! - Keep the loop as the single owner of its members/questions/responses.
//!
//! # Invariants
//! - Every record is identified by an opaque string id.
//! - Timestamps are Unix epoch milliseconds.

pub mod loop_record;
pub mod records;
