use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Notification, NotificationDispatch, NotificationType},
    error::{AppError, Result},
    repository::{bool_to_int, parse_column, parse_uuid, to_utc, NotificationRepository},
};

#[derive(FromRow)]
struct NotificationRow {
    id: String,
    user_id: String,
    title: String,
    title_ja: Option<String>,
    message: String,
    message_ja: Option<String>,
    notification_type: String,
    is_read: i32,
    link: Option<String>,
    created_at: NaiveDateTime,
}

const NOTIFICATION_COLUMNS: &str = r#"
    id, user_id, title, title_ja, message, message_ja, notification_type,
    is_read, link, created_at
"#;

const INSERT_NOTIFICATION: &str = r#"
    INSERT INTO notifications (
        id, user_id, title, title_ja, message, message_ja, notification_type,
        is_read, link, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct SqliteNotificationRepository {
    pool: SqlitePool,
}

impl SqliteNotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_notification(row: NotificationRow) -> Result<Notification> {
        Ok(Notification {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            title_ja: row.title_ja,
            message: row.message,
            message_ja: row.message_ja,
            notification_type: parse_column(
                &row.notification_type,
                NotificationType::from_str,
                "notification type",
            )?,
            is_read: row.is_read != 0,
            link: row.link,
            created_at: to_utc(row.created_at),
        })
    }

    fn insert(notification: &Notification) -> sqlx::query::Query<'_, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'_>> {
        sqlx::query(INSERT_NOTIFICATION)
            .bind(notification.id.to_string())
            .bind(notification.user_id.to_string())
            .bind(&notification.title)
            .bind(&notification.title_ja)
            .bind(&notification.message)
            .bind(&notification.message_ja)
            .bind(notification.notification_type.as_str())
            .bind(bool_to_int(notification.is_read))
            .bind(&notification.link)
            .bind(notification.created_at.naive_utc())
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn create(&self, notification: Notification) -> Result<Notification> {
        Self::insert(&notification).execute(&self.pool).await?;

        self.find_by_id(notification.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created notification".to_string())
        })
    }

    async fn create_many(&self, notifications: Vec<Notification>) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for notification in &notifications {
            let result = Self::insert(notification).execute(&mut *tx).await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {} FROM notifications WHERE id = ?",
            NOTIFICATION_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_notification).transpose()
    }

    async fn list_for_user(&self, user_id: Uuid, unread_only: bool) -> Result<Vec<Notification>> {
        let filter = if unread_only { "AND is_read = 0" } else { "" };

        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {} FROM notifications WHERE user_id = ? {} ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS, filter
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_notification).collect()
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn mark_read(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn record_dispatch(&self, dispatch: NotificationDispatch) -> Result<NotificationDispatch> {
        let recipients = serde_json::to_string(&dispatch.recipients)?;

        sqlx::query(
            r#"
            INSERT INTO notification_dispatches (
                id, channel, recipients, title, message, scheduled_for, status, sent_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dispatch.id.to_string())
        .bind(dispatch.channel.as_str())
        .bind(recipients)
        .bind(&dispatch.title)
        .bind(&dispatch.message)
        .bind(dispatch.scheduled_for.map(|dt| dt.naive_utc()))
        .bind(dispatch.status.as_str())
        .bind(dispatch.sent_at.map(|dt| dt.naive_utc()))
        .bind(dispatch.created_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(dispatch)
    }
}
