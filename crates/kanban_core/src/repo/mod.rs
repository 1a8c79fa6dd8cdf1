//! Task repository and first-run seed data.
//!
//! # Responsibility
//! - Own the authoritative in-memory task list for one session.
//! - Mirror every mutation to the persistent store before returning.
//!
//! # Invariants
//! - Repository writes validate task fields before mutating state.
//! - Semantic errors (`NotFound`, `Validation`) are returned before any
//!   mutation; storage errors are reported after it.

pub mod seed;
pub mod task_repo;
