//! Attendance models and DTOs.
//!
//! A session is one course on one date; marking the same pair again replaces
//! the whole roll call rather than appending to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Per-student mark. Wire format is the single letter used on paper
/// registers: `P`resent, `A`bsent, `L`ate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum AttendanceStatus {
    #[default]
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
    #[serde(rename = "L")]
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
            AttendanceStatus::Late => "L",
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordEntry {
    #[serde(alias = "student_id")]
    pub student: Uuid,
    #[serde(default)]
    pub status: AttendanceStatus,
}

/// Create-or-replace a roll call for one course and date.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertSessionDto {
    #[serde(alias = "course")]
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub records: Vec<RecordEntry>,
    pub note: Option<String>,
}

/// Listing row with the course joined in and headline counts.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct SessionSummary {
    pub id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub note: String,
    pub course_code: String,
    pub course_name: String,
    pub total: i64,
    pub present: i64,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct RecordWithStudent {
    pub student_id: Uuid,
    pub status: String,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct SessionRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub note: String,
    pub course_code: String,
    pub course_name: String,
}

/// One session with its full roll call.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: SessionRow,
    pub records: Vec<RecordWithStudent>,
}
