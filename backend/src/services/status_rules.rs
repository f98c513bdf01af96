//! Agent status transition rules.
//!
//! The status set is open: only the pairs listed in [`FORBIDDEN_TRANSITIONS`]
//! are rejected. Transitions involving unrecognized statuses, and same-state
//! transitions, are always allowed.

use thiserror::Error;

use crate::models::AgentStatus;

/// Direct transitions that are never allowed, keyed by `(from, to)`
pub const FORBIDDEN_TRANSITIONS: &[(AgentStatus, AgentStatus)] = &[
    (AgentStatus::Delivering, AgentStatus::Inactive),
    (AgentStatus::Inactive, AgentStatus::Delivering),
];

/// Rejected status change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot change status from '{from}' to '{to}'")]
pub struct InvalidTransition {
    pub from: AgentStatus,
    pub to: AgentStatus,
}

/// Check whether an agent in status `from` may move to `to`
pub fn check_transition(from: &AgentStatus, to: &AgentStatus) -> Result<(), InvalidTransition> {
    let forbidden = FORBIDDEN_TRANSITIONS
        .iter()
        .any(|(f, t)| f == from && t == to);

    if forbidden {
        return Err(InvalidTransition {
            from: from.clone(),
            to: to.clone(),
        });
    }

    Ok(())
}
