//! Fitness journal domain model.
//!
//! # Responsibility
//! - Define the athlete aggregate, its exercise records and goal kinds.
//! - Keep every domain invariant inside core types.
//!
//! # Invariants
//! - Exercise records are immutable once constructed.
//! - The athlete exclusively owns its log and goals.

pub mod athlete;
pub mod exercise;
pub mod goal;
