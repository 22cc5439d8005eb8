//! The moderation state machine.
//!
//! Pure transition table, payload-agnostic: it decides the target status
//! and which adapter side effect must run, never touching payload fields.
//! Executing the plan (adapter call + status write as one atomic unit) is
//! the service's job.

use serde::{Deserialize, Serialize};

use super::error::ModerationError;
use super::models::SubmissionStatus;

/// The one decision an admin can make about a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
        }
    }
}

/// Which adapter operation a transition requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedSideEffect {
    /// The change is (or stays) in the catalog already, or never was.
    None,
    /// Materialize the payload into the catalog now.
    RunApply,
    /// Undo the previously applied change now.
    RunRevert,
}

/// A legal transition: where the submission goes and what must happen on
/// the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: SubmissionStatus,
    pub to: SubmissionStatus,
    pub side_effect: PlannedSideEffect,
}

/// Decide the transition for `action` from `current`.
///
/// Terminal states reject every action with `AlreadyReviewed`.
pub fn plan_transition(
    current: SubmissionStatus,
    action: ModerationAction,
) -> Result<TransitionPlan, ModerationError> {
    use ModerationAction::*;
    use SubmissionStatus::*;

    let (to, side_effect) = match (current, action) {
        (Pending, Approve) => (Approved, PlannedSideEffect::RunApply),
        (Pending, Reject) => (Rejected, PlannedSideEffect::None),
        (LivePendingReview, Approve) => (Approved, PlannedSideEffect::None),
        (LivePendingReview, Reject) => (Rejected, PlannedSideEffect::RunRevert),
        (Approved | Rejected, _) => return Err(ModerationError::AlreadyReviewed),
    };

    Ok(TransitionPlan {
        from: current,
        to,
        side_effect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_approve_runs_apply() {
        let plan = plan_transition(SubmissionStatus::Pending, ModerationAction::Approve).unwrap();
        assert_eq!(plan.to, SubmissionStatus::Approved);
        assert_eq!(plan.side_effect, PlannedSideEffect::RunApply);
    }

    #[test]
    fn test_pending_reject_has_no_side_effect() {
        let plan = plan_transition(SubmissionStatus::Pending, ModerationAction::Reject).unwrap();
        assert_eq!(plan.to, SubmissionStatus::Rejected);
        assert_eq!(plan.side_effect, PlannedSideEffect::None);
    }

    #[test]
    fn test_live_approve_is_already_applied() {
        let plan = plan_transition(
            SubmissionStatus::LivePendingReview,
            ModerationAction::Approve,
        )
        .unwrap();
        assert_eq!(plan.to, SubmissionStatus::Approved);
        assert_eq!(plan.side_effect, PlannedSideEffect::None);
    }

    #[test]
    fn test_live_reject_runs_revert() {
        let plan = plan_transition(
            SubmissionStatus::LivePendingReview,
            ModerationAction::Reject,
        )
        .unwrap();
        assert_eq!(plan.to, SubmissionStatus::Rejected);
        assert_eq!(plan.side_effect, PlannedSideEffect::RunRevert);
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for status in [SubmissionStatus::Approved, SubmissionStatus::Rejected] {
            for action in [ModerationAction::Approve, ModerationAction::Reject] {
                let result = plan_transition(status, action);
                assert!(matches!(result, Err(ModerationError::AlreadyReviewed)));
            }
        }
    }
}
