//! Progress persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the on-disk progress document shape.
//! - Isolate file and encoding details from the athlete aggregate.
//!
//! # Invariants
//! - Repository APIs report a missing target (`NotFound`) separately from
//!   malformed content and transport errors.

pub mod progress_repo;
