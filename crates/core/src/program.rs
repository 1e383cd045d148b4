//! Curriculum program kinds.
//!
//! Each program shares the same business-day unlock rules but differs in
//! length.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Length of the Sales Experience coaching program in weeks.
pub const SALES_EXPERIENCE_WEEKS: u32 = 8;

/// Length of the Challenge habit program in weeks.
pub const CHALLENGE_WEEKS: u32 = 6;

/// A curriculum program an agency can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    SalesExperience,
    Challenge,
}

impl ProgramKind {
    /// Database / wire name of the program.
    pub fn as_str(self) -> &'static str {
        match self {
            ProgramKind::SalesExperience => "sales_experience",
            ProgramKind::Challenge => "challenge",
        }
    }

    /// Parse a database / wire name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "sales_experience" => Ok(ProgramKind::SalesExperience),
            "challenge" => Ok(ProgramKind::Challenge),
            other => Err(CoreError::Validation(format!(
                "Unknown program '{other}'. Must be one of: sales_experience, challenge"
            ))),
        }
    }

    /// Number of weeks in the program; the current week is clamped to this.
    pub fn max_weeks(self) -> u32 {
        match self {
            ProgramKind::SalesExperience => SALES_EXPERIENCE_WEEKS,
            ProgramKind::Challenge => CHALLENGE_WEEKS,
        }
    }
}

impl std::fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
