//! Re-analysis status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Status of the re-analysis control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReanalysisStatus {
    /// Ready to trigger.
    #[default]
    Idle,

    /// A request is in flight; the control is disabled.
    InProgress,

    /// The service returned a payload; a refresh is pending.
    Success,

    /// The last attempt failed; retry is allowed until the status resets.
    Error,
}

impl ReanalysisStatus {
    /// Returns true if a new trigger may start from this status.
    pub fn accepts_trigger(&self) -> bool {
        self.can_transition_to(&ReanalysisStatus::InProgress)
    }

    /// Short label for the control in this status.
    pub fn label(&self) -> &'static str {
        match self {
            ReanalysisStatus::Idle => "Re-analyze Document",
            ReanalysisStatus::InProgress => "Re-analyzing...",
            ReanalysisStatus::Success => "Re-analysis completed! Refreshing...",
            ReanalysisStatus::Error => "Re-analysis failed. Please try again.",
        }
    }
}

impl StateMachine for ReanalysisStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReanalysisStatus::*;
        matches!(
            (self, target),
            (Idle, InProgress)
                | (Error, InProgress)
                | (InProgress, Success)
                | (InProgress, Error)
                | (Success, Idle)
                | (Error, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReanalysisStatus::*;
        match self {
            Idle => vec![InProgress],
            InProgress => vec![Success, Error],
            Success => vec![Idle],
            Error => vec![InProgress, Idle],
        }
    }
}

impl fmt::Display for ReanalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReanalysisStatus::Idle => "idle",
            ReanalysisStatus::InProgress => "in_progress",
            ReanalysisStatus::Success => "success",
            ReanalysisStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReanalysisStatus::*;

    const ALL: [ReanalysisStatus; 4] = [Idle, InProgress, Success, Error];

    #[test]
    fn default_is_idle() {
        assert_eq!(ReanalysisStatus::default(), Idle);
    }

    #[test]
    fn idle_and_error_accept_trigger() {
        assert!(Idle.accepts_trigger());
        assert!(Error.accepts_trigger());
    }

    #[test]
    fn in_progress_and_success_reject_trigger() {
        assert!(!InProgress.accepts_trigger());
        assert!(!Success.accepts_trigger());
    }

    #[test]
    fn in_progress_resolves_to_success_or_error() {
        assert_eq!(InProgress.transition_to(Success), Ok(Success));
        assert_eq!(InProgress.transition_to(Error), Ok(Error));
        assert!(InProgress.transition_to(Idle).is_err());
    }

    #[test]
    fn success_cannot_fall_into_error() {
        assert!(Success.transition_to(Error).is_err());
    }

    #[test]
    fn no_status_is_terminal() {
        for status in ALL {
            assert!(!status.is_terminal(), "{:?} should have an exit", status);
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(InProgress.to_string(), "in_progress");
    }

    #[test]
    fn labels_carry_the_user_messages() {
        assert_eq!(Idle.label(), "Re-analyze Document");
        assert_eq!(Success.label(), "Re-analysis completed! Refreshing...");
        assert_eq!(
            Error.label(),
            crate::domain::reanalysis::ReanalysisError::AuthenticationRequired.user_message()
        );
    }
}
