mod case;
mod comment;
mod project;

pub use case::CaseCommands;
pub use comment::CommentCommands;
pub use project::ProjectCommands;
