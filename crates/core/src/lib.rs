//! Domain logic for the AgencyBrain curriculum backend.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the HTTP API, and any future tooling.

pub mod curriculum;
pub mod error;
pub mod program;
pub mod quiz;
pub mod roles;
pub mod status;
pub mod transcript;
pub mod types;
