//! Loan eligibility screening: intake validation, threshold evaluation, and optional advice.

pub mod advice;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
