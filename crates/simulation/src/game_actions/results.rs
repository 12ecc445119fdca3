use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::placement::{FootprintConflict, PlacementError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionResult {
    Success,
    /// The action succeeded but produced a warning the caller should see
    /// (e.g. residences replaced or a rate clamped).
    SuccessWithWarning(String),
    Error(ActionError),
}

impl ActionResult {
    /// Returns `true` for both `Success` and `SuccessWithWarning`.
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success | ActionResult::SuccessWithWarning(_))
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            ActionResult::SuccessWithWarning(w) => Some(w.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Result<(), ActionError>> for ActionResult {
    fn from(result: Result<(), ActionError>) -> Self {
        match result {
            Ok(()) => ActionResult::Success,
            Err(e) => ActionResult::Error(e),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionError {
    OutOfBounds,
    FootprintConflict(FootprintConflict),
    InvalidAction(String),
    NotFound,
    InsufficientFunds,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "out of bounds"),
            ActionError::FootprintConflict(c) => write!(f, "footprint conflict: {c}"),
            ActionError::InvalidAction(msg) => write!(f, "invalid action: {msg}"),
            ActionError::NotFound => write!(f, "building not found"),
            ActionError::InsufficientFunds => write!(f, "insufficient funds"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<PlacementError> for ActionError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::OutOfBounds => ActionError::OutOfBounds,
            PlacementError::NotFound => ActionError::NotFound,
            PlacementError::FootprintConflict(c) => ActionError::FootprintConflict(c),
        }
    }
}
