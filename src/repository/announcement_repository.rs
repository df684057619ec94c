use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Announcement, AnnouncementStatus, Department, Priority},
    error::{AppError, Result},
    repository::{bool_to_int, parse_column, parse_optional_uuid, parse_uuid, to_utc, AnnouncementRepository},
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: String,
    title: String,
    title_ja: Option<String>,
    content: String,
    content_ja: Option<String>,
    priority: String,
    department: String,
    status: String,
    author: String,
    author_id: String,
    image_url: Option<String>,
    is_ai_generated: i32,
    ai_overridden: i32,
    reviewed_by: Option<String>,
    reviewed_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const ANNOUNCEMENT_COLUMNS: &str = r#"
    id, title, title_ja, content, content_ja, priority, department, status,
    author, author_id, image_url, is_ai_generated, ai_overridden,
    reviewed_by, reviewed_at, created_at, updated_at
"#;

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: parse_uuid(&row.id)?,
            title: row.title,
            title_ja: row.title_ja,
            content: row.content,
            content_ja: row.content_ja,
            priority: parse_column(&row.priority, Priority::from_str, "priority")?,
            department: parse_column(&row.department, Department::from_str, "department")?,
            status: parse_column(&row.status, AnnouncementStatus::from_str, "status")?,
            author: row.author,
            author_id: parse_uuid(&row.author_id)?,
            image_url: row.image_url,
            is_ai_generated: row.is_ai_generated != 0,
            ai_overridden: row.ai_overridden != 0,
            reviewed_by: parse_optional_uuid(row.reviewed_by)?,
            reviewed_at: row.reviewed_at.map(to_utc),
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement> {
        sqlx::query(
            r#"
            INSERT INTO announcements (
                id, title, title_ja, content, content_ja, priority, department, status,
                author, author_id, image_url, is_ai_generated, ai_overridden,
                reviewed_by, reviewed_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(announcement.id.to_string())
        .bind(&announcement.title)
        .bind(&announcement.title_ja)
        .bind(&announcement.content)
        .bind(&announcement.content_ja)
        .bind(announcement.priority.as_str())
        .bind(announcement.department.as_str())
        .bind(announcement.status.as_str())
        .bind(&announcement.author)
        .bind(announcement.author_id.to_string())
        .bind(&announcement.image_url)
        .bind(bool_to_int(announcement.is_ai_generated))
        .bind(bool_to_int(announcement.ai_overridden))
        .bind(announcement.reviewed_by.map(|id| id.to_string()))
        .bind(announcement.reviewed_at.map(|dt| dt.naive_utc()))
        .bind(announcement.created_at.naive_utc())
        .bind(announcement.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {} FROM announcements WHERE id = ?",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_announcement).transpose()
    }

    async fn list(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {} FROM announcements ORDER BY created_at DESC",
            ANNOUNCEMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn list_by_status(&self, status: AnnouncementStatus) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {} FROM announcements WHERE status = ? ORDER BY created_at DESC",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Announcement> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, title_ja = ?, content = ?, content_ja = ?, priority = ?,
                department = ?, status = ?, image_url = ?, ai_overridden = ?,
                reviewed_by = ?, reviewed_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.title_ja)
        .bind(&announcement.content)
        .bind(&announcement.content_ja)
        .bind(announcement.priority.as_str())
        .bind(announcement.department.as_str())
        .bind(announcement.status.as_str())
        .bind(&announcement.image_url)
        .bind(bool_to_int(announcement.ai_overridden))
        .bind(announcement.reviewed_by.map(|id| id.to_string()))
        .bind(announcement.reviewed_at.map(|dt| dt.naive_utc()))
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Announcement not found".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
