//! Entity structs for Caseflow domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `caseflow-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod case;
mod comment;
mod project;

pub use case::Case;
pub use comment::CaseComment;
pub use project::Project;
