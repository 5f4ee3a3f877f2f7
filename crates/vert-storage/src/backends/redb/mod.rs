//! Redb storage backend.
//!
//! Redb only knows statically declared tables, so every logical table lives
//! inside one physical table and is told apart by a key prefix (see
//! [`tables`]). File-backed and in-memory databases are both supported; the
//! in-memory form is what the test suites run against.

mod engine;
pub mod tables;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::{RedbCursor, RedbTransaction};
