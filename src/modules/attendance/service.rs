use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::attendance::model::{
    RecordWithStudent, SessionDetail, SessionRow, SessionSummary, UpsertSessionDto,
};
use crate::utils::errors::AppError;

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

pub struct AttendanceService;

impl AttendanceService {
    /// Sessions newest-first, optionally narrowed to one course and/or date.
    #[instrument(skip(db))]
    pub async fn list_sessions(
        db: &PgPool,
        course_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<SessionSummary>, AppError> {
        sqlx::query_as::<_, SessionSummary>(
            "SELECT s.id, s.course_id, s.date, s.note, c.code AS course_code,
                    c.name AS course_name,
                    COUNT(r.student_id) AS total,
                    COUNT(r.student_id) FILTER (WHERE r.status = 'P') AS present
             FROM attendance_sessions s
             JOIN courses c ON c.id = s.course_id
             LEFT JOIN attendance_records r ON r.session_id = s.id
             WHERE ($1::uuid IS NULL OR s.course_id = $1)
               AND ($2::date IS NULL OR s.date = $2)
             GROUP BY s.id, c.code, c.name
             ORDER BY s.date DESC, c.code",
        )
        .bind(course_id)
        .bind(date)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    #[instrument(skip(db))]
    pub async fn get_session(db: &PgPool, id: Uuid) -> Result<SessionDetail, AppError> {
        let session = sqlx::query_as::<_, SessionRow>(
            "SELECT s.id, s.course_id, s.date, s.note, c.code AS course_code,
                    c.name AS course_name
             FROM attendance_sessions s
             JOIN courses c ON c.id = s.course_id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Attendance session not found"))?;

        let records = sqlx::query_as::<_, RecordWithStudent>(
            "SELECT r.student_id, r.status, u.name AS student_name, u.email AS student_email
             FROM attendance_records r
             JOIN users u ON u.id = r.student_id
             WHERE r.session_id = $1
             ORDER BY u.name",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(SessionDetail { session, records })
    }

    /// Create or fully replace the roll call for one (course, date) pair.
    /// Replaying the same payload is a no-op apart from timestamps.
    #[instrument(skip(db, dto), fields(course_id = %dto.course_id, date = %dto.date))]
    pub async fn upsert_session(
        db: &PgPool,
        dto: UpsertSessionDto,
    ) -> Result<SessionDetail, AppError> {
        let course_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(dto.course_id)
                .fetch_one(db)
                .await?;
        if !course_exists {
            return Err(AppError::bad_request("Invalid course"));
        }

        let mut tx = db.begin().await?;

        let session_id: Uuid = sqlx::query_scalar(
            "INSERT INTO attendance_sessions (course_id, date, note)
             VALUES ($1, $2, $3)
             ON CONFLICT (course_id, date)
             DO UPDATE SET note = EXCLUDED.note, updated_at = NOW()
             RETURNING id",
        )
        .bind(dto.course_id)
        .bind(dto.date)
        .bind(dto.note.unwrap_or_default())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM attendance_records WHERE session_id = $1")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;

        for record in &dto.records {
            sqlx::query(
                "INSERT INTO attendance_records (session_id, student_id, status)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (session_id, student_id) DO UPDATE SET status = EXCLUDED.status",
            )
            .bind(session_id)
            .bind(record.student)
            .bind(record.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::bad_request("Unknown student in records")
                } else {
                    AppError::from(e)
                }
            })?;
        }

        tx.commit().await?;

        Self::get_session(db, session_id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_session(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendance_sessions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Attendance session not found"));
        }
        Ok(())
    }
}
