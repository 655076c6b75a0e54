//! Structured audit comments.
//!
//! A transition that carries operator text produces an `AuditComment` value
//! (kind + author + body). Rendering to the stored text is a separate step so
//! the workflow never assembles strings itself.

use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CommentKind;

/// Text used when an approval carries no comment.
pub const DEFAULT_APPROVAL_NOTE: &str = "Case approved for publication";

/// Text used when an archive carries no reason.
pub const DEFAULT_ARCHIVE_NOTE: &str = "Case archived";

/// Body of an audit comment, before rendering.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommentBody {
    /// Free text placed after the tag.
    Note { text: String },
    /// An archive motive, rendered as `Reason: ...`.
    Reason { reason: String },
    /// A rejection with its ordered, non-blank suggestions.
    Rejection {
        reason: String,
        suggestions: Vec<String>,
    },
}

/// A comment to append to a case's audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditComment {
    pub kind: CommentKind,
    pub author: String,
    pub body: CommentBody,
}

impl AuditComment {
    /// Submission comment. Only produced when the submitter wrote something.
    #[must_use]
    pub fn submitted(author: &str, comment: Option<&str>) -> Option<Self> {
        non_blank(comment).map(|text| Self {
            kind: CommentKind::SubmittedForReview,
            author: author.to_string(),
            body: CommentBody::Note { text },
        })
    }

    /// Approval comment, falling back to [`DEFAULT_APPROVAL_NOTE`].
    #[must_use]
    pub fn approved(author: &str, comment: Option<&str>) -> Self {
        Self {
            kind: CommentKind::Approved,
            author: author.to_string(),
            body: CommentBody::Note {
                text: non_blank(comment).unwrap_or_else(|| DEFAULT_APPROVAL_NOTE.to_string()),
            },
        }
    }

    /// Rejection comment. Blank suggestions are dropped, the rest keep their order.
    #[must_use]
    pub fn rejected(author: &str, reason: &str, suggestions: &[String]) -> Self {
        Self {
            kind: CommentKind::Rejected,
            author: author.to_string(),
            body: CommentBody::Rejection {
                reason: reason.trim().to_string(),
                suggestions: suggestions
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            },
        }
    }

    /// Archive comment with the reason, or [`DEFAULT_ARCHIVE_NOTE`].
    #[must_use]
    pub fn archived(author: &str, reason: Option<&str>) -> Self {
        let body = match non_blank(reason) {
            Some(reason) => CommentBody::Reason { reason },
            None => CommentBody::Note {
                text: DEFAULT_ARCHIVE_NOTE.to_string(),
            },
        };
        Self {
            kind: CommentKind::Archived,
            author: author.to_string(),
            body,
        }
    }

    /// Free-form discussion entry; not a review comment.
    #[must_use]
    pub fn discussion(author: &str, text: &str) -> Self {
        Self {
            kind: CommentKind::Discussion,
            author: author.to_string(),
            body: CommentBody::Note {
                text: text.trim().to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_review(&self) -> bool {
        self.kind.is_review()
    }

    /// Render the stored comment text.
    #[must_use]
    pub fn render(&self) -> String {
        let tag = self.kind.tag();
        match &self.body {
            CommentBody::Note { text } => match tag {
                Some(tag) => format!("{tag} {text}"),
                None => text.clone(),
            },
            CommentBody::Reason { reason } => match tag {
                Some(tag) => format!("{tag} Reason: {reason}"),
                None => format!("Reason: {reason}"),
            },
            CommentBody::Rejection {
                reason,
                suggestions,
            } => {
                let mut out = String::new();
                if let Some(tag) = tag {
                    out.push_str(tag);
                    out.push_str("\n\n");
                }
                out.push_str("Reason:\n");
                out.push_str(reason);
                if !suggestions.is_empty() {
                    out.push_str("\n\nSuggestions:");
                    for (i, suggestion) in suggestions.iter().enumerate() {
                        let _ = write!(out, "\n{}. {suggestion}", i + 1);
                    }
                }
                out
            }
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}
