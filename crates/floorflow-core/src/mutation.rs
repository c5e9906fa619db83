//! Optimistic mutation lifecycle.
//!
//! A local change is applied before the remote update is confirmed, then
//! either kept or reverted once the store answers:
//!
//! ```text
//! Idle -> Optimistic -> Confirmed
//!                    \-> RolledBack
//! ```
//!
//! # Usage
//!
//! ```rust
//! use floorflow_core::mutation::{Mutation, MutationState};
//!
//! let mut m = Mutation::new("task 42");
//! m.apply().unwrap();
//! assert!(m.state().is_pending());
//! m.roll_back("store unreachable").unwrap();
//! assert_eq!(m.state(), &MutationState::RolledBack("store unreachable".into()));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

// ============================================================================
// MutationState
// ============================================================================

/// State of an optimistic mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationState {
    /// Nothing applied yet.
    Idle,
    /// Applied locally, remote confirmation outstanding.
    Optimistic,
    /// The store accepted the change.
    Confirmed,
    /// The store call failed and the local change was reverted.
    RolledBack(String),
}

impl MutationState {
    /// Returns `true` while the remote answer is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Optimistic)
    }

    /// Returns `true` once the mutation reached a final state.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Confirmed | Self::RolledBack(_))
    }

    /// Returns `true` if the change is (or is assumed to be) in effect.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Optimistic | Self::Confirmed)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Optimistic => "optimistic",
            Self::Confirmed => "confirmed",
            Self::RolledBack(_) => "rolled-back",
        }
    }

    fn can_move_to(&self, next: &MutationState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Optimistic)
                | (Self::Optimistic, Self::Confirmed)
                | (Self::Optimistic, Self::RolledBack(_))
        )
    }
}

impl fmt::Display for MutationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RolledBack(reason) => write!(f, "rolled-back: {reason}"),
            other => f.write_str(other.name()),
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// One optimistic change and its lifecycle.
#[derive(Clone, Debug)]
pub struct Mutation {
    label: String,
    state: MutationState,
}

impl Mutation {
    /// Creates an idle mutation described by `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: MutationState::Idle,
        }
    }

    /// What is being changed.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current state.
    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// Marks the local change as applied.
    pub fn apply(&mut self) -> Result<()> {
        self.transition(MutationState::Optimistic)
    }

    /// Marks the change as accepted by the store.
    pub fn confirm(&mut self) -> Result<()> {
        self.transition(MutationState::Confirmed)
    }

    /// Marks the change as reverted after a failed store call.
    pub fn roll_back(&mut self, reason: impl Into<String>) -> Result<()> {
        self.transition(MutationState::RolledBack(reason.into()))
    }

    fn transition(&mut self, next: MutationState) -> Result<()> {
        if !self.state.can_move_to(&next) {
            return Err(Error::InvalidTransition {
                from: self.state.name().to_string(),
                to: next.name().to_string(),
            });
        }
        log::debug!("Mutation '{}' -> {next}", self.label);
        self.state = next;
        Ok(())
    }
}
