//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: one-shot
//! logging initialization, unique fixture names, and Problem Details
//! assertions that do not depend on backend types.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
