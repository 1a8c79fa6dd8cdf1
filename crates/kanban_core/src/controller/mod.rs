//! Interaction controllers translating UI input into repository commands.
//!
//! # Responsibility
//! - `drag`: pointer gesture state machine ending in a column move.
//! - `form`: create/edit modal state and input coercion.
//!
//! # Invariants
//! - Controllers never hold repository state; they borrow the repository
//!   for the duration of one event.

pub mod drag;
pub mod form;
