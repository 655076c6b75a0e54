//! # caseflow-core
//!
//! Core types and pure workflow logic for Caseflow.
//!
//! This crate holds everything about a case's lifecycle that does not touch
//! storage:
//! - Entity structs for projects, cases and case comments
//! - Status enums with the transition graph
//! - The workflow planner: guards evaluated against a case snapshot, producing
//!   a `TransitionPlan` for the store to commit atomically
//! - Structured audit comments and their rendering
//! - Rating aggregation and the validation gate
//! - Approval queue prioritisation
//! - The `WorkflowError` taxonomy shared by every crate

pub mod audit;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod queue;
pub mod rating;
pub mod validation;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;
