pub mod case;
pub mod comment;
pub mod dispatch;
pub mod project;
pub mod shared;
