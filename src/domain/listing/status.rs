//! Load status of a list view.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// Where a list view is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    /// Mounted, nothing requested yet.
    #[default]
    Idle,
    /// At least one request is outstanding.
    Loading,
    /// Showing a page, fetched or restored from cache.
    Loaded,
    /// The latest request failed; rows are the last good ones.
    Failed,
}

impl ListStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListStatus::Loading)
    }
}

impl StateMachine for ListStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ListStatus::*;
        matches!(
            (self, target),
            (Idle, Loading)
                | (Idle, Loaded)
                | (Loading, Loading)
                | (Loading, Loaded)
                | (Loading, Failed)
                | (Loaded, Loading)
                | (Failed, Loading)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ListStatus::*;
        match self {
            Idle => vec![Loading, Loaded],
            Loading => vec![Loading, Loaded, Failed],
            Loaded => vec![Loading],
            Failed => vec![Loading],
        }
    }
}
