//! Time-series utilities shared by providers and the orchestrator.
//!
//! Modules include:
//! - `split`: partition a date range into sub-ranges that respect the per-request point cap
//! - `assemble`: convert provider fragments into table rows and append them in order
/// Fragment-to-row conversion and ordered appends.
pub mod assemble;
/// Date-range partitioning.
pub mod split;
