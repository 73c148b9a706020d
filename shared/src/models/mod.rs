//! Data models
//!
//! Attendance and dashboard payloads as served by the attendance API.

pub mod attendance;
pub mod dashboard;

// Re-exports
pub use attendance::*;
pub use dashboard::*;
