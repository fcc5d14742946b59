//! Identifier strategies for the in-memory address book.
//!
//! A generator only produces candidate strings. Whether two calls may return
//! the same value depends on the strategy; collisions are detected and
//! reported by the caller, never by the generator.

use rand::Rng;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

pub trait IdGenerator {
    fn new_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn new_id(&self) -> String {
        (**self).new_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn new_id(&self) -> String {
        (**self).new_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn new_id(&self) -> String {
        (**self).new_id()
    }
}

/// Random integers rendered as strings. Two calls may return the same value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator {
    bound: Option<u32>,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self { bound: None }
    }

    /// Restricts values to `0..bound`. A bound of zero is treated as one.
    pub fn with_bound(bound: u32) -> Self {
        Self {
            bound: Some(bound.max(1)),
        }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn new_id(&self) -> String {
        let mut rng = rand::thread_rng();
        match self.bound {
            Some(bound) => rng.gen_range(0..bound).to_string(),
            None => rng.gen::<i32>().to_string(),
        }
    }
}

/// Monotonic counter shared by every generator holding a clone of it.
#[derive(Debug, Clone, Default)]
pub struct IdCounter {
    next: Arc<AtomicU64>,
}

static PROCESS_COUNTER: OnceLock<IdCounter> = OnceLock::new();

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// The counter behind every default `IncrementIdGenerator`.
    pub fn process_wide() -> Self {
        PROCESS_COUNTER.get_or_init(IdCounter::new).clone()
    }

    pub fn next_value(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Counter-backed identifiers. Generators sharing one `IdCounter` never
/// return the same value twice.
#[derive(Debug, Clone)]
pub struct IncrementIdGenerator {
    counter: IdCounter,
}

impl IncrementIdGenerator {
    pub fn new(counter: IdCounter) -> Self {
        Self { counter }
    }

    pub fn counter(&self) -> &IdCounter {
        &self.counter
    }
}

impl Default for IncrementIdGenerator {
    fn default() -> Self {
        Self::new(IdCounter::process_wide())
    }
}

impl IdGenerator for IncrementIdGenerator {
    fn new_id(&self) -> String {
        self.counter.next_value().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdGeneratorKind {
    Random,
    #[default]
    Counter,
    Uuid,
}

impl IdGeneratorKind {
    pub fn build(self) -> Box<dyn IdGenerator> {
        match self {
            IdGeneratorKind::Random => Box::new(RandomIdGenerator::new()),
            IdGeneratorKind::Counter => Box::new(IncrementIdGenerator::default()),
            IdGeneratorKind::Uuid => Box::new(UuidIdGenerator),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IdGeneratorKind::Random => "random",
            IdGeneratorKind::Counter => "counter",
            IdGeneratorKind::Uuid => "uuid",
        }
    }
}
