//! Board domain model.
//!
//! # Responsibility
//! - Define the task record shared by repository, renderer and controllers.
//! - Define the fixed column set tasks are routed into.
//!
//! # Invariants
//! - Every task is identified by a unique, never-reused integer `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod column;
pub mod task;
