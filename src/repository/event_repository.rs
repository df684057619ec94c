use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Department, Event, Priority, RecurrencePattern},
    error::{AppError, Result},
    repository::{bool_to_int, parse_column, parse_uuid, to_utc, EventRepository},
};

#[derive(FromRow)]
struct EventRow {
    id: String,
    title: String,
    title_ja: Option<String>,
    description: String,
    description_ja: Option<String>,
    start_at: NaiveDateTime,
    end_at: NaiveDateTime,
    location: String,
    department: String,
    priority: String,
    recurrence: Option<String>,
    reminder_sent: i32,
    created_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const EVENT_COLUMNS: &str = r#"
    id, title, title_ja, description, description_ja, start_at, end_at, location,
    department, priority, recurrence, reminder_sent, created_by, created_at, updated_at
"#;

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Result<Event> {
        let recurrence = row
            .recurrence
            .as_deref()
            .map(|r| parse_column(r, RecurrencePattern::from_str, "recurrence"))
            .transpose()?;

        Ok(Event {
            id: parse_uuid(&row.id)?,
            title: row.title,
            title_ja: row.title_ja,
            description: row.description,
            description_ja: row.description_ja,
            start_at: to_utc(row.start_at),
            end_at: to_utc(row.end_at),
            location: row.location,
            department: parse_column(&row.department, Department::from_str, "department")?,
            priority: parse_column(&row.priority, Priority::from_str, "priority")?,
            is_recurring: recurrence.is_some(),
            recurrence,
            reminder_sent: row.reminder_sent != 0,
            created_by: parse_uuid(&row.created_by)?,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: Event) -> Result<Event> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, title_ja, description, description_ja, start_at, end_at, location,
                department, priority, recurrence, reminder_sent, created_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.id.to_string())
        .bind(&event.title)
        .bind(&event.title_ja)
        .bind(&event.description)
        .bind(&event.description_ja)
        .bind(event.start_at.naive_utc())
        .bind(event.end_at.naive_utc())
        .bind(&event.location)
        .bind(event.department.as_str())
        .bind(event.priority.as_str())
        .bind(event.recurrence.map(|r| r.as_str()))
        .bind(bool_to_int(event.reminder_sent))
        .bind(event.created_by.to_string())
        .bind(event.created_at.naive_utc())
        .bind(event.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(event.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created event".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events WHERE id = ?",
            EVENT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_event).transpose()
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events ORDER BY start_at ASC",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn list_due_for_reminder(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT {} FROM events
            WHERE reminder_sent = 0 AND start_at >= ? AND start_at <= ?
            ORDER BY start_at ASC
            "#,
            EVENT_COLUMNS
        ))
        .bind(from.naive_utc())
        .bind(to.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn mark_reminder_sent(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE events SET reminder_sent = 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now().naive_utc())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, id: Uuid, event: Event) -> Result<Event> {
        sqlx::query(
            r#"
            UPDATE events
            SET title = ?, title_ja = ?, description = ?, description_ja = ?,
                start_at = ?, end_at = ?, location = ?, department = ?, priority = ?,
                recurrence = ?, reminder_sent = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.title_ja)
        .bind(&event.description)
        .bind(&event.description_ja)
        .bind(event.start_at.naive_utc())
        .bind(event.end_at.naive_utc())
        .bind(&event.location)
        .bind(event.department.as_str())
        .bind(event.priority.as_str())
        .bind(event.recurrence.map(|r| r.as_str()))
        .bind(bool_to_int(event.reminder_sent))
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
