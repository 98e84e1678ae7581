//! Use-case flows driven by the UI shell.
//!
//! # Responsibility
//! - Loop editor draft and session.
//! - Public response collection form.
//! - Read-only edition and dashboard projections.
//!
//! # Invariants
//! - Flows talk to storage only through `repo` traits.

pub mod dashboard;
pub mod draft;
pub mod editor;
pub mod reader;
pub mod respond;
