//! Attendance Model

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Daily attendance classification (computed server-side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    #[serde(rename = "half-day")]
    HalfDay,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half-day",
        }
    }
}

/// Today's check state as reported alongside the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodayStatus {
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[serde(rename = "Checked Out")]
    CheckedOut,
    #[serde(rename = "Not Checked In")]
    NotCheckedIn,
}

/// Per-employee attendance totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub absent: u32,
    #[serde(default)]
    pub late: u32,
    #[serde(rename = "half-day", default)]
    pub half_day: u32,
    /// Hours from days with a recorded check-out
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_status: Option<TodayStatus>,
}

impl AttendanceSummary {
    pub fn days_recorded(&self) -> u32 {
        self.present
            .saturating_add(self.absent)
            .saturating_add(self.late)
            .saturating_add(self.half_day)
    }
}

/// Employee a record belongs to (team listings only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOwner {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub department: String,
}

/// One day of attendance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub total_hours: f64,
    /// Populated `userId`; an unpopulated id reference deserializes to `None`
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "owner_or_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<RecordOwner>,
}

impl AttendanceRecord {
    /// Time between check-in and check-out, when both are recorded in order
    pub fn worked_duration(&self) -> Option<Duration> {
        match (self.check_in_time, self.check_out_time) {
            (Some(start), Some(end)) if end > start => Some(end - start),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_none()
    }

    /// Calendar day of the record, accepting both `YYYY-MM-DD` and RFC 3339
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.date)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

fn owner_or_reference<'de, D>(deserializer: D) -> Result<Option<RecordOwner>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OwnerField {
        Populated(RecordOwner),
        Reference(#[allow(dead_code)] String),
    }

    Ok(match Option::<OwnerField>::deserialize(deserializer)? {
        Some(OwnerField::Populated(owner)) => Some(owner),
        Some(OwnerField::Reference(_)) | None => None,
    })
}

/// Manager team-listing filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
}

impl TeamFilters {
    /// Filters preset to today's date, the manager view's initial state
    pub fn today() -> Self {
        Self::default().with_date(Local::now().date_naive())
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    pub fn with_status(mut self, status: AttendanceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Query parameters; blank values are left out
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(date) = self.date {
            pairs.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(employee_id) = self
            .employee_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            pairs.push(("employeeId", employee_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}
