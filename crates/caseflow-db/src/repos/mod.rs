//! Repository modules implementing operations for all Caseflow entities.
//!
//! Each module adds methods to `CaseService` via `impl CaseService` blocks.

pub mod case;
pub mod comment;
pub mod project;
pub mod queue;
pub mod rating;
pub mod validation;
pub mod workflow;
