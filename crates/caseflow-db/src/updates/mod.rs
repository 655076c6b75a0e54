//! Update builder types for entity mutations.
//!
//! A builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL.

pub mod case;
