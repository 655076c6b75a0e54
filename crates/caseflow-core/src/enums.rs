//! Status enums, transition kinds, complexity and comment kinds for Caseflow.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `CaseStatus` carries the lifecycle graph through `allowed_next_states()`;
//! `Transition` names the operations that walk it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a case.
///
/// ```text
/// draft → in_review → approved → published
///   ↑         │
///   └─────────┘ (reject)
///
/// draft | in_review | approved → archived
/// ```
///
/// `published` cannot be archived directly and `archived` has no outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Draft,
    InReview,
    Approved,
    Published,
    Archived,
}

impl CaseStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::InReview,
        Self::Approved,
        Self::Published,
        Self::Archived,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::InReview, Self::Archived],
            Self::InReview => &[Self::Approved, Self::Draft, Self::Archived],
            Self::Approved => &[Self::Published, Self::Archived],
            Self::Published | Self::Archived => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// A guarded lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    SubmitForReview,
    Approve,
    Reject,
    Publish,
    Archive,
}

impl Transition {
    pub const ALL: [Self; 5] = [
        Self::SubmitForReview,
        Self::Approve,
        Self::Reject,
        Self::Publish,
        Self::Archive,
    ];

    /// Statuses this transition may start from.
    #[must_use]
    pub const fn source_states(self) -> &'static [CaseStatus] {
        match self {
            Self::SubmitForReview => &[CaseStatus::Draft],
            Self::Approve | Self::Reject => &[CaseStatus::InReview],
            Self::Publish => &[CaseStatus::Approved],
            Self::Archive => &[CaseStatus::Draft, CaseStatus::InReview, CaseStatus::Approved],
        }
    }

    /// Status the case lands in when the transition commits.
    #[must_use]
    pub const fn target(self) -> CaseStatus {
        match self {
            Self::SubmitForReview => CaseStatus::InReview,
            Self::Approve => CaseStatus::Approved,
            Self::Reject => CaseStatus::Draft,
            Self::Publish => CaseStatus::Published,
            Self::Archive => CaseStatus::Archived,
        }
    }

    /// Transitions whose source states include `status`.
    #[must_use]
    pub fn available_from(status: CaseStatus) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|t| t.source_states().contains(&status))
            .collect()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmitForReview => "submit_for_review",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Publish => "publish",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CaseComplexity
// ---------------------------------------------------------------------------

/// Complexity level a case was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseComplexity {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl CaseComplexity {
    /// Base priority of a case of this complexity in the approval queue.
    #[must_use]
    pub const fn queue_weight(self) -> f64 {
        match self {
            Self::Basic => 1.0,
            Self::Intermediate => 2.0,
            Self::Advanced => 3.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CaseComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CommentKind
// ---------------------------------------------------------------------------

/// What produced a case comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    SubmittedForReview,
    Approved,
    Rejected,
    Archived,
    Discussion,
}

impl CommentKind {
    /// Bracketed prefix rendered at the start of workflow comments.
    #[must_use]
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Self::SubmittedForReview => Some("[SUBMITTED FOR REVIEW]"),
            Self::Approved => Some("[APPROVED]"),
            Self::Rejected => Some("[REJECTED]"),
            Self::Archived => Some("[ARCHIVED]"),
            Self::Discussion => None,
        }
    }

    /// Workflow-generated entries are review comments; discussion is not.
    #[must_use]
    pub const fn is_review(self) -> bool {
        !matches!(self, Self::Discussion)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmittedForReview => "submitted_for_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
            Self::Discussion => "discussion",
        }
    }
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
