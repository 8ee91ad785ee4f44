//! Signal-driven employer matching for placement outreach.
//!
//! The library ranks partner organizations against a placement request by
//! fanning out independent signal providers per candidate, combining their
//! scores into a weighted composite, and selecting a ranked subset with a
//! graceful fallback when scores run sparse.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
