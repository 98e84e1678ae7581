//! Injected capabilities used by the editor and response flows.
//!
//! # Responsibility
//! - Abstract id generation, avatar resolution and wall-clock access.
//! - Provide production defaults plus deterministic variants for tests.
//!
//! # Invariants
//! - `IdGenerator` never returns the same id twice for one generator.
//! - `AvatarResolver` is a pure function of the email string.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const PRAVATAR_BASE_URL: &str = "https://i.pravatar.cc/150";

/// Source of fresh record ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `{prefix}-{n}` ids starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Maps a member email to an avatar image URL.
pub trait AvatarResolver {
    fn avatar_for(&self, email: &str) -> String;
}

/// Avatar URLs served by pravatar.cc, keyed by email.
#[derive(Debug, Clone, Copy, Default)]
pub struct PravatarResolver;

impl AvatarResolver for PravatarResolver {
    fn avatar_for(&self, email: &str) -> String {
        format!("{PRAVATAR_BASE_URL}?u={email}")
    }
}

/// Wall-clock source in Unix epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        // Clocks set before 1970 collapse to the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}
