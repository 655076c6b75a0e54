//! Case update builder.
//!
//! Stamps are only ever set, never cleared, so none of the fields need the
//! `Option<Option<_>>` shape.

use caseflow_core::enums::CaseStatus;
use caseflow_core::validation::ValidationOutcome;
use caseflow_core::workflow::{Stamp, TransitionPlan};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_for_review_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_for_review_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_results: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_validated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CaseUpdate {
    /// Fields written by a transition plan.
    #[must_use]
    pub fn from_plan(plan: &TransitionPlan) -> Self {
        let builder = CaseUpdateBuilder::new()
            .status(plan.to)
            .updated_at(plan.at);
        match &plan.stamp {
            Some(Stamp::SubmittedForReview { by, at }) => builder.submitted_for_review(by, *at),
            Some(Stamp::Reviewed { by, at }) => builder.reviewed(by, *at),
            Some(Stamp::Published { at }) => builder.published_at(*at),
            Some(Stamp::Archived { by, at }) => builder.archived(by, *at),
            None => builder,
        }
        .build()
    }

    /// Fields written when a validation run is recorded.
    #[must_use]
    pub fn from_validation(outcome: &ValidationOutcome, at: DateTime<Utc>) -> Self {
        CaseUpdateBuilder::new()
            .validation(outcome.score, outcome.is_valid, outcome.report.clone())
            .last_validated_at(at)
            .updated_at(at)
            .build()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `column = ?n` clauses and their parameters, numbered from 1.
    pub(crate) fn set_clauses(&self) -> (Vec<String>, Vec<libsql::Value>) {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        };

        if let Some(status) = self.status {
            push("status", status.as_str().into());
        }
        if let Some(ref by) = self.submitted_for_review_by {
            push("submitted_for_review_by", by.clone().into());
        }
        if let Some(at) = self.submitted_for_review_at {
            push("submitted_for_review_at", at.to_rfc3339().into());
        }
        if let Some(ref by) = self.reviewed_by {
            push("reviewed_by", by.clone().into());
        }
        if let Some(at) = self.reviewed_at {
            push("reviewed_at", at.to_rfc3339().into());
        }
        if let Some(at) = self.published_at {
            push("published_at", at.to_rfc3339().into());
        }
        if let Some(ref by) = self.archived_by {
            push("archived_by", by.clone().into());
        }
        if let Some(at) = self.archived_at {
            push("archived_at", at.to_rfc3339().into());
        }
        if let Some(score) = self.validation_score {
            push("validation_score", score.into());
        }
        if let Some(validated) = self.validated {
            push("validated", i64::from(validated).into());
        }
        if let Some(ref results) = self.validation_results {
            push("validation_results", results.to_string().into());
        }
        if let Some(at) = self.last_validated_at {
            push("last_validated_at", at.to_rfc3339().into());
        }
        if let Some(at) = self.updated_at {
            push("updated_at", at.to_rfc3339().into());
        }
        (sets, params)
    }
}

pub struct CaseUpdateBuilder(CaseUpdate);

impl Default for CaseUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CaseUpdate::default())
    }

    #[must_use]
    pub const fn status(mut self, status: CaseStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn submitted_for_review(mut self, by: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.0.submitted_for_review_by = Some(by.into());
        self.0.submitted_for_review_at = Some(at);
        self
    }

    #[must_use]
    pub fn reviewed(mut self, by: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.0.reviewed_by = Some(by.into());
        self.0.reviewed_at = Some(at);
        self
    }

    #[must_use]
    pub const fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.0.published_at = Some(at);
        self
    }

    #[must_use]
    pub fn archived(mut self, by: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.0.archived_by = Some(by.into());
        self.0.archived_at = Some(at);
        self
    }

    #[must_use]
    pub fn validation(mut self, score: f64, validated: bool, results: serde_json::Value) -> Self {
        self.0.validation_score = Some(score);
        self.0.validated = Some(validated);
        self.0.validation_results = Some(results);
        self
    }

    #[must_use]
    pub const fn last_validated_at(mut self, at: DateTime<Utc>) -> Self {
        self.0.last_validated_at = Some(at);
        self
    }

    #[must_use]
    pub const fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.0.updated_at = Some(at);
        self
    }

    #[must_use]
    pub fn build(self) -> CaseUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::enums::Transition;
    use pretty_assertions::assert_eq;

    fn plan(stamp: Option<Stamp>) -> TransitionPlan {
        TransitionPlan {
            case_id: "cas-00000001".into(),
            project_id: "prj-00000001".into(),
            transition: Transition::Reject,
            from: CaseStatus::InReview,
            to: CaseStatus::Draft,
            stamp,
            comment: None,
            at: Utc::now(),
        }
    }

    #[test]
    fn reject_plan_only_touches_status() {
        let update = CaseUpdate::from_plan(&plan(None));
        let (sets, params) = update.set_clauses();
        assert_eq!(sets, vec!["status = ?1", "updated_at = ?2"]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn review_stamp_sets_both_columns() {
        let at = Utc::now();
        let update = CaseUpdate::from_plan(&plan(Some(Stamp::Reviewed {
            by: "rev".into(),
            at,
        })));
        assert_eq!(update.reviewed_by.as_deref(), Some("rev"));
        assert_eq!(update.reviewed_at, Some(at));
        let (sets, _) = update.set_clauses();
        assert_eq!(
            sets,
            vec!["status = ?1", "reviewed_by = ?2", "reviewed_at = ?3", "updated_at = ?4"]
        );
    }

    #[test]
    fn serializes_changed_fields_only() {
        let update = CaseUpdateBuilder::new().status(CaseStatus::Archived).build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"status": "archived"}));
    }

    #[test]
    fn empty_update() {
        assert!(CaseUpdateBuilder::new().build().is_empty());
        assert!(!CaseUpdateBuilder::new().published_at(Utc::now()).build().is_empty());
    }
}
