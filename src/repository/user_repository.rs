use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Department, Role, User, UserPreferences},
    error::{AppError, Result},
    repository::{parse_column, parse_uuid, to_utc, UserRepository},
};

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    department: String,
    job_title: Option<String>,
    location: Option<String>,
    phone: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    preferences: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const USER_COLUMNS: &str = r#"
    id, name, email, role, department, job_title, location, phone, bio,
    avatar_url, preferences, created_at, updated_at
"#;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: UserRow) -> Result<User> {
        let preferences: UserPreferences = serde_json::from_str(&row.preferences)
            .map_err(|e| AppError::Database(format!("Invalid preferences: {}", e)))?;

        Ok(User {
            id: parse_uuid(&row.id)?,
            name: row.name,
            email: row.email,
            role: parse_column(&row.role, Role::from_str, "role")?,
            department: parse_column(&row.department, Department::from_str, "department")?,
            job_title: row.job_title,
            location: row.location,
            phone: row.phone,
            bio: row.bio,
            avatar_url: row.avatar_url,
            preferences,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User> {
        let preferences = serde_json::to_string(&user.preferences)?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, role, department, job_title, location, phone, bio,
                avatar_url, preferences, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(user.email.to_lowercase())
        .bind(user.role.as_str())
        .bind(user.department.as_str())
        .bind(&user.job_title)
        .bind(&user.location)
        .bind(&user.phone)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .bind(preferences)
        .bind(user.created_at.naive_utc())
        .bind(user.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Email already exists".to_string())
            }
            other => AppError::Database(other.to_string()),
        })?;

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created user".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY name ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    async fn update(&self, id: Uuid, user: User) -> Result<User> {
        let preferences = serde_json::to_string(&user.preferences)?;

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, role = ?, department = ?, job_title = ?, location = ?,
                phone = ?, bio = ?, avatar_url = ?, preferences = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.department.as_str())
        .bind(&user.job_title)
        .bind(&user.location)
        .bind(&user.phone)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .bind(preferences)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
