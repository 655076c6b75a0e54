//! Lifecycle planning.
//!
//! [`plan_transition`] evaluates a request's guards against a case snapshot
//! and returns a [`TransitionPlan`] describing every field the transition
//! writes. It never touches storage: the store commits the plan with a
//! conditional update keyed on `plan.from`, so a plan built from a stale
//! snapshot cannot be applied.
//!
//! Guard order is fixed:
//! 1. request-level checks that need no snapshot (a reject reason)
//! 2. existence, resolved by the caller before planning
//! 3. state (`TerminalStateConflict` before `WrongState` for archive)
//! 4. score gates

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::audit::AuditComment;
use crate::entities::Case;
use crate::enums::{CaseStatus, Transition};
use crate::errors::WorkflowError;
use crate::validation::ValidationGate;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A lifecycle operation with its operator-supplied arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum TransitionRequest {
    SubmitForReview {
        actor: String,
        comment: Option<String>,
    },
    Approve {
        actor: String,
        comment: Option<String>,
    },
    Reject {
        actor: String,
        reason: String,
        #[serde(default)]
        suggestions: Vec<String>,
    },
    Publish,
    Archive {
        actor: String,
        reason: Option<String>,
    },
}

impl TransitionRequest {
    #[must_use]
    pub const fn transition(&self) -> Transition {
        match self {
            Self::SubmitForReview { .. } => Transition::SubmitForReview,
            Self::Approve { .. } => Transition::Approve,
            Self::Reject { .. } => Transition::Reject,
            Self::Publish => Transition::Publish,
            Self::Archive { .. } => Transition::Archive,
        }
    }

    /// Checks that need no snapshot. Run before the case is even fetched.
    ///
    /// # Errors
    ///
    /// `MissingReason` for a reject whose reason is blank.
    pub fn precheck(&self) -> Result<(), WorkflowError> {
        match self {
            Self::Reject { reason, .. } if reason.trim().is_empty() => {
                Err(WorkflowError::MissingReason)
            }
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Audit stamp written by a transition. Reject writes none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "stamp", rename_all = "snake_case")]
pub enum Stamp {
    SubmittedForReview { by: String, at: DateTime<Utc> },
    Reviewed { by: String, at: DateTime<Utc> },
    Published { at: DateTime<Utc> },
    Archived { by: String, at: DateTime<Utc> },
}

/// Everything one transition writes, computed from a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionPlan {
    pub case_id: String,
    pub project_id: String,
    pub transition: Transition,
    /// Status observed in the snapshot; the commit is conditional on it.
    pub from: CaseStatus,
    pub to: CaseStatus,
    pub stamp: Option<Stamp>,
    pub comment: Option<AuditComment>,
    pub at: DateTime<Utc>,
}

impl TransitionPlan {
    /// The case as it looks once this plan is committed.
    #[must_use]
    pub fn apply_to(&self, case: &Case) -> Case {
        let mut next = case.clone();
        next.status = self.to;
        next.updated_at = self.at;
        match &self.stamp {
            Some(Stamp::SubmittedForReview { by, at }) => {
                next.submitted_for_review_by = Some(by.clone());
                next.submitted_for_review_at = Some(*at);
            }
            Some(Stamp::Reviewed { by, at }) => {
                next.reviewed_by = Some(by.clone());
                next.reviewed_at = Some(*at);
            }
            Some(Stamp::Published { at }) => next.published_at = Some(*at),
            Some(Stamp::Archived { by, at }) => {
                next.archived_by = Some(by.clone());
                next.archived_at = Some(*at);
            }
            None => {}
        }
        next
    }
}

/// Evaluate guards for `request` against `case` and build the plan.
///
/// # Errors
///
/// Returns the first failing guard, in the order documented on this module.
pub fn plan_transition(
    case: &Case,
    request: &TransitionRequest,
    gate: &ValidationGate,
    now: DateTime<Utc>,
) -> Result<TransitionPlan, WorkflowError> {
    request.precheck()?;
    let transition = request.transition();
    check_state(case, transition)?;

    let (stamp, comment) = match request {
        TransitionRequest::SubmitForReview { actor, comment } => {
            gate.check_submission(case)?;
            (
                Some(Stamp::SubmittedForReview {
                    by: actor.clone(),
                    at: now,
                }),
                AuditComment::submitted(actor, comment.as_deref()),
            )
        }
        TransitionRequest::Approve { actor, comment } => (
            Some(Stamp::Reviewed {
                by: actor.clone(),
                at: now,
            }),
            Some(AuditComment::approved(actor, comment.as_deref())),
        ),
        TransitionRequest::Reject {
            actor,
            reason,
            suggestions,
        } => (None, Some(AuditComment::rejected(actor, reason, suggestions))),
        TransitionRequest::Publish => {
            gate.check_publication(case)?;
            (Some(Stamp::Published { at: now }), None)
        }
        TransitionRequest::Archive { actor, reason } => (
            Some(Stamp::Archived {
                by: actor.clone(),
                at: now,
            }),
            Some(AuditComment::archived(actor, reason.as_deref())),
        ),
    };

    Ok(TransitionPlan {
        case_id: case.id.clone(),
        project_id: case.project_id.clone(),
        transition,
        from: case.status,
        to: transition.target(),
        stamp,
        comment,
        at: now,
    })
}

fn check_state(case: &Case, transition: Transition) -> Result<(), WorkflowError> {
    if transition == Transition::Archive && case.status == CaseStatus::Published {
        return Err(WorkflowError::TerminalStateConflict {
            case_id: case.id.clone(),
            status: case.status,
        });
    }
    if transition.source_states().contains(&case.status) {
        Ok(())
    } else {
        Err(WorkflowError::WrongState {
            transition,
            expected: transition.source_states().to_vec(),
            actual: case.status,
        })
    }
}

// ---------------------------------------------------------------------------
// Status summary
// ---------------------------------------------------------------------------

/// Review stamps currently on a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewStamps {
    pub submitted_by: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub archived_by: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
}

/// Where a case stands and what it may do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkflowStatus {
    pub case_id: String,
    pub status: CaseStatus,
    pub next_states: Vec<CaseStatus>,
    pub available_transitions: Vec<Transition>,
    pub validation_score: Option<f64>,
    pub can_submit_for_review: bool,
    /// Why submission would fail right now; empty when it would pass.
    pub submit_blockers: Vec<String>,
    pub can_approve: bool,
    pub can_publish: bool,
    pub review: ReviewStamps,
}

/// Summarise `case` against the configured gates.
#[must_use]
pub fn workflow_status(case: &Case, gate: &ValidationGate) -> WorkflowStatus {
    let submit_blockers: Vec<String> = [
        check_state(case, Transition::SubmitForReview),
        gate.check_submission(case),
    ]
    .into_iter()
    .filter_map(Result::err)
    .map(|err| err.to_string())
    .collect();
    let can_publish = check_state(case, Transition::Publish)
        .and_then(|()| gate.check_publication(case))
        .is_ok();

    WorkflowStatus {
        case_id: case.id.clone(),
        status: case.status,
        next_states: case.status.allowed_next_states().to_vec(),
        available_transitions: Transition::available_from(case.status),
        validation_score: case.validation_score,
        can_submit_for_review: submit_blockers.is_empty(),
        submit_blockers,
        can_approve: check_state(case, Transition::Approve).is_ok(),
        can_publish,
        review: ReviewStamps {
            submitted_by: case.submitted_for_review_by.clone(),
            submitted_at: case.submitted_for_review_at,
            reviewed_by: case.reviewed_by.clone(),
            reviewed_at: case.reviewed_at,
            published_at: case.published_at,
            archived_by: case.archived_by.clone(),
            archived_at: case.archived_at,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::CommentKind;
    use crate::test_support::{CaseFixture, t0};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn gate() -> ValidationGate {
        ValidationGate::default()
    }

    fn submit(comment: Option<&str>) -> TransitionRequest {
        TransitionRequest::SubmitForReview {
            actor: "author".into(),
            comment: comment.map(String::from),
        }
    }

    fn approve() -> TransitionRequest {
        TransitionRequest::Approve {
            actor: "reviewer".into(),
            comment: None,
        }
    }

    fn reject(reason: &str, suggestions: &[&str]) -> TransitionRequest {
        TransitionRequest::Reject {
            actor: "reviewer".into(),
            reason: reason.into(),
            suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn archive(reason: Option<&str>) -> TransitionRequest {
        TransitionRequest::Archive {
            actor: "ops".into(),
            reason: reason.map(String::from),
        }
    }

    fn request_for(transition: Transition) -> TransitionRequest {
        match transition {
            Transition::SubmitForReview => submit(None),
            Transition::Approve => approve(),
            Transition::Reject => reject("incomplete history", &[]),
            Transition::Publish => TransitionRequest::Publish,
            Transition::Archive => archive(None),
        }
    }

    // --- Submit ---

    #[test]
    fn submit_without_score_is_missing_validation() {
        let case = CaseFixture::draft().build();
        let err = plan_transition(&case, &submit(None), &gate(), t0()).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingValidation { .. }));
    }

    #[test]
    fn submit_below_threshold() {
        let case = CaseFixture::draft().score(70.0).build();
        let err = plan_transition(&case, &submit(None), &gate(), t0()).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::BelowThreshold {
                score: 70.0,
                threshold: 85.0,
            }
        );
    }

    #[test]
    fn submit_at_threshold_stamps_and_skips_comment() {
        let case = CaseFixture::draft().score(85.0).build();
        let plan = plan_transition(&case, &submit(None), &gate(), t0()).unwrap();
        assert_eq!(plan.from, CaseStatus::Draft);
        assert_eq!(plan.to, CaseStatus::InReview);
        assert_eq!(
            plan.stamp,
            Some(Stamp::SubmittedForReview {
                by: "author".into(),
                at: t0(),
            })
        );
        assert!(plan.comment.is_none());

        let next = plan.apply_to(&case);
        assert_eq!(next.status, CaseStatus::InReview);
        assert_eq!(next.submitted_for_review_by.as_deref(), Some("author"));
        assert_eq!(next.submitted_for_review_at, Some(t0()));
        assert_eq!(next.updated_at, t0());
    }

    #[test]
    fn submit_with_comment_records_it() {
        let case = CaseFixture::draft().score(91.0).build();
        let plan = plan_transition(&case, &submit(Some("ready")), &gate(), t0()).unwrap();
        let comment = plan.comment.unwrap();
        assert_eq!(comment.kind, CommentKind::SubmittedForReview);
        assert_eq!(comment.render(), "[SUBMITTED FOR REVIEW] ready");
    }

    #[test]
    fn submit_threshold_is_configurable() {
        let case = CaseFixture::draft().score(70.0).build();
        let lenient = ValidationGate {
            required_score: 60.0,
            ..ValidationGate::default()
        };
        assert!(plan_transition(&case, &submit(None), &lenient, t0()).is_ok());
    }

    #[test]
    fn state_checked_before_score() {
        let case = CaseFixture::approved().build();
        let err = plan_transition(&case, &submit(None), &gate(), t0()).unwrap_err();
        assert!(matches!(err, WorkflowError::WrongState { .. }), "{err}");
    }

    // --- Approve / Reject ---

    #[test]
    fn approve_stamps_reviewer_with_default_comment() {
        let case = CaseFixture::in_review().score(90.0).build();
        let plan = plan_transition(&case, &approve(), &gate(), t0()).unwrap();
        assert_eq!(plan.to, CaseStatus::Approved);
        assert_eq!(
            plan.comment.unwrap().render(),
            "[APPROVED] Case approved for publication"
        );
        let next = plan_transition(&case, &approve(), &gate(), t0())
            .unwrap()
            .apply_to(&case);
        assert_eq!(next.reviewed_by.as_deref(), Some("reviewer"));
        assert_eq!(next.reviewed_at, Some(t0()));
    }

    #[test]
    fn second_approve_sees_approved() {
        let case = CaseFixture::in_review().build();
        let approved = plan_transition(&case, &approve(), &gate(), t0())
            .unwrap()
            .apply_to(&case);
        let err = plan_transition(&approved, &approve(), &gate(), t0()).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::WrongState {
                transition: Transition::Approve,
                expected: vec![CaseStatus::InReview],
                actual: CaseStatus::Approved,
            }
        );
    }

    #[test]
    fn reject_reason_checked_before_state() {
        // Even a published case reports the missing reason first.
        let case = CaseFixture::new(CaseStatus::Published).build();
        let err = plan_transition(&case, &reject("   ", &[]), &gate(), t0()).unwrap_err();
        assert_eq!(err, WorkflowError::MissingReason);
    }

    #[test]
    fn reject_keeps_reviewer_stamps() {
        let earlier = t0() - Duration::days(1);
        let case = CaseFixture::in_review().reviewed("first-reviewer", earlier).build();
        let plan = plan_transition(
            &case,
            &reject("needs more detail", &["fix X", "", "fix Y"]),
            &gate(),
            t0(),
        )
        .unwrap();
        assert!(plan.stamp.is_none());
        assert_eq!(
            plan.comment.as_ref().unwrap().render(),
            "[REJECTED]\n\nReason:\nneeds more detail\n\nSuggestions:\n1. fix X\n2. fix Y"
        );
        let next = plan.apply_to(&case);
        assert_eq!(next.status, CaseStatus::Draft);
        assert_eq!(next.reviewed_by.as_deref(), Some("first-reviewer"));
        assert_eq!(next.reviewed_at, Some(earlier));
    }

    // --- Publish / Archive ---

    #[test]
    fn publish_stamps_without_comment() {
        let case = CaseFixture::approved().build();
        let plan = plan_transition(&case, &TransitionRequest::Publish, &gate(), t0()).unwrap();
        assert_eq!(plan.stamp, Some(Stamp::Published { at: t0() }));
        assert!(plan.comment.is_none());
    }

    #[test]
    fn archive_published_is_terminal_conflict() {
        let case = CaseFixture::new(CaseStatus::Published).build();
        let err = plan_transition(&case, &archive(Some("old")), &gate(), t0()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::TerminalStateConflict {
                status: CaseStatus::Published,
                ..
            }
        ));
    }

    #[test]
    fn archive_archived_is_wrong_state() {
        let case = CaseFixture::new(CaseStatus::Archived).build();
        let err = plan_transition(&case, &archive(None), &gate(), t0()).unwrap_err();
        assert!(matches!(err, WorkflowError::WrongState { .. }));
    }

    #[test]
    fn archive_draft_with_reason() {
        let case = CaseFixture::draft().build();
        let plan = plan_transition(&case, &archive(Some("duplicate")), &gate(), t0()).unwrap();
        assert_eq!(plan.comment.unwrap().render(), "[ARCHIVED] Reason: duplicate");
        let next = plan_transition(&case, &archive(None), &gate(), t0())
            .unwrap()
            .apply_to(&case);
        assert_eq!(next.archived_by.as_deref(), Some("ops"));
        assert_eq!(next.status, CaseStatus::Archived);
    }

    // --- Status summary ---

    #[test]
    fn status_summary_for_draft_below_threshold() {
        let case = CaseFixture::draft().score(60.0).build();
        let status = workflow_status(&case, &gate());
        assert_eq!(status.status, CaseStatus::Draft);
        assert_eq!(
            status.next_states,
            vec![CaseStatus::InReview, CaseStatus::Archived]
        );
        assert!(!status.can_submit_for_review);
        assert_eq!(status.submit_blockers.len(), 1);
        assert!(status.submit_blockers[0].contains("85"));
        assert!(!status.can_approve);
        assert!(!status.can_publish);
    }

    #[test]
    fn submit_blockers_list_every_failing_guard() {
        let case = CaseFixture::approved().score(60.0).build();
        let status = workflow_status(&case, &gate());
        assert!(!status.can_submit_for_review);
        assert_eq!(status.submit_blockers.len(), 2);
        assert!(status.submit_blockers[0].contains("approved"));
        assert!(status.submit_blockers[1].contains("85"));

        let unscored = CaseFixture::in_review().build();
        let status = workflow_status(&unscored, &gate());
        assert_eq!(status.submit_blockers.len(), 2);
        assert!(status.submit_blockers[1].contains("no validation score"));
    }

    #[test]
    fn status_summary_for_approved() {
        let case = CaseFixture::approved()
            .score(92.0)
            .recorded(json!({}))
            .reviewed("reviewer", t0())
            .build();
        let status = workflow_status(&case, &gate());
        assert!(status.can_publish);
        assert!(!status.can_approve);
        assert!(!status.can_submit_for_review);
        assert_eq!(status.submit_blockers.len(), 1);
        assert_eq!(status.review.reviewed_by.as_deref(), Some("reviewer"));
        assert_eq!(
            status.available_transitions,
            vec![Transition::Publish, Transition::Archive]
        );
    }

    // --- Properties ---

    fn any_status() -> impl Strategy<Value = CaseStatus> {
        prop::sample::select(CaseStatus::ALL.to_vec())
    }

    fn any_transition() -> impl Strategy<Value = Transition> {
        prop::sample::select(Transition::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn every_pair_follows_the_graph(
            status in any_status(),
            transition in any_transition(),
            score in 85.0f64..=100.0,
        ) {
            let case = CaseFixture::new(status).score(score).build();
            match plan_transition(&case, &request_for(transition), &gate(), t0()) {
                Ok(plan) => {
                    prop_assert!(transition.source_states().contains(&status));
                    prop_assert!(status.can_transition_to(plan.to));
                    prop_assert_eq!(plan.apply_to(&case).status, transition.target());
                }
                Err(WorkflowError::TerminalStateConflict { .. }) => {
                    prop_assert_eq!(status, CaseStatus::Published);
                    prop_assert_eq!(transition, Transition::Archive);
                }
                Err(WorkflowError::WrongState { actual, .. }) => {
                    prop_assert_eq!(actual, status);
                    prop_assert!(!transition.source_states().contains(&status));
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }

        #[test]
        fn failed_guards_leave_snapshot_unchanged(
            status in any_status(),
            transition in any_transition(),
            score in proptest::option::of(0.0f64..=100.0),
        ) {
            let mut fixture = CaseFixture::new(status);
            if let Some(score) = score {
                fixture = fixture.score(score);
            }
            let case = fixture.build();
            let before = case.clone();
            let _ = plan_transition(&case, &request_for(transition), &gate(), t0());
            prop_assert_eq!(case, before);
        }
    }
}
