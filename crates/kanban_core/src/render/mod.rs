//! Board projection for UI layers.
//!
//! Rendering is a pure function of the task list: no repository access, no
//! incremental diffing. Callers rebuild the whole view after every mutation.

pub mod board;
