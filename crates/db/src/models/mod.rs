//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts where rows are created through the API

pub mod agency;
pub mod assignment;
pub mod call_recording;
pub mod curriculum;
pub mod profile;
pub mod progress;
pub mod quiz_attempt;
pub mod staff;
