//! Assignment and lesson-progress statuses and their state machines.
//!
//! Status IDs match the seed data of the `assignment_statuses` and
//! `lesson_progress_statuses` lookup tables (1-based SMALLSERIAL).

use serde::Serialize;

use crate::error::CoreError;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Lifecycle of an agency's enrollment in a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum AssignmentStatus {
    Pending = 1,
    Active = 2,
    Completed = 3,
}

impl AssignmentStatus {
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(Self::Pending),
            2 => Ok(Self::Active),
            3 => Ok(Self::Completed),
            other => Err(CoreError::Internal(format!(
                "Unknown assignment status id {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// The start date may only change while the assignment is pending.
    pub fn start_date_is_mutable(self) -> bool {
        self == Self::Pending
    }

    /// Valid target statuses reachable from `self`.
    pub fn valid_transitions(self) -> &'static [AssignmentStatus] {
        match self {
            Self::Pending => &[Self::Active],
            Self::Active => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Validate a transition, failing with [`CoreError::Conflict`].
    pub fn validate_transition(self, to: AssignmentStatus) -> Result<(), CoreError> {
        if self.valid_transitions().contains(&to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid assignment transition: {} -> {}",
                self.name(),
                to.name()
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Lesson progress
// ---------------------------------------------------------------------------

/// Per-learner status of a single lesson.
///
/// Only `Locked -> Available` is decided by the unlock calculator; the
/// remaining transitions are learner actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum LessonStatus {
    Locked = 1,
    Available = 2,
    InProgress = 3,
    Completed = 4,
}

impl LessonStatus {
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(Self::Locked),
            2 => Ok(Self::Available),
            3 => Ok(Self::InProgress),
            4 => Ok(Self::Completed),
            other => Err(CoreError::Internal(format!(
                "Unknown lesson progress status id {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Available => "available",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn valid_transitions(self) -> &'static [LessonStatus] {
        match self {
            Self::Locked => &[Self::Available],
            Self::Available => &[Self::InProgress, Self::Completed],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    pub fn can_transition(self, to: LessonStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// The status a learner sees for a lesson given its stored progress and
    /// whether the calculator has unlocked it.
    ///
    /// Stored progress past `Available` always wins; otherwise the unlock
    /// decides between `Locked` and `Available`.
    pub fn effective(stored: Option<LessonStatus>, is_unlocked: bool) -> LessonStatus {
        match stored {
            Some(s @ (Self::InProgress | Self::Completed)) => s,
            _ if is_unlocked => Self::Available,
            _ => Self::Locked,
        }
    }
}
