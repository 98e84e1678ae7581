//! Loop ownership layer.
//!
//! # Responsibility
//! - Define the commit/delete/append contracts the UI flows talk to.
//! - Provide an in-process store implementing them.
//!
//! # Invariants
//! - Repository writes enforce `Loop::validate()` before mutation.
//! - Deleting a loop removes its members, questions and responses with it.

pub mod loop_repo;
