//! Shared types for the attendance client
//!
//! Wire DTOs exchanged with the attendance API: auth payloads, attendance
//! records and summaries, manager dashboard data and the small response
//! envelopes the API uses for confirmations and errors.

pub mod client;
pub mod models;
pub mod response;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{Identity, LoginRequest, RegisterRequest, Role};
pub use models::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, DepartmentSlice, ManagerOverview,
    RecordOwner, TeamFilters, TodayStatus, WeeklyTrendPoint,
};
pub use response::{ErrorBody, MessageResponse};
pub use types::{MonthFilter, MonthFilterError};
