//! Manager dashboard Model

use serde::{Deserialize, Serialize};

/// One bar of the weekly trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTrendPoint {
    /// Day label (e.g. "Mon")
    pub name: String,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub late: u32,
    #[serde(default)]
    pub absent: u32,
}

/// One slice of the department breakdown chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSlice {
    pub name: String,
    #[serde(default)]
    pub value: u32,
}

/// Team overview for today plus chart series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerOverview {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub late: u32,
    #[serde(default)]
    pub absent: u32,
    #[serde(default)]
    pub weekly_trend: Vec<WeeklyTrendPoint>,
    #[serde(default)]
    pub department_data: Vec<DepartmentSlice>,
}

impl ManagerOverview {
    /// Share of employees who showed up today (late arrivals count as present)
    pub fn attendance_rate(&self) -> Option<f64> {
        if self.total_employees == 0 {
            return None;
        }
        let showed_up = f64::from(self.present) + f64::from(self.late);
        Some(showed_up / f64::from(self.total_employees))
    }
}
