//! Scoring and form-state engine for annual faculty performance appraisals.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
