use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CommentKind;

/// An append-only comment on a case. Workflow transitions write review
/// comments; free-form discussion is stored alongside with `is_review = false`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseComment {
    pub id: String,
    pub case_id: String,
    pub author: String,
    pub kind: CommentKind,
    pub content: String,
    pub is_review: bool,
    pub created_at: DateTime<Utc>,
}
