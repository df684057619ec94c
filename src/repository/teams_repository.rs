use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Channel, Team, TeamsMessage},
    error::{AppError, Result},
    repository::{bool_to_int, parse_uuid, to_utc, TeamsRepository},
};

#[derive(FromRow)]
struct TeamRow {
    id: String,
    name: String,
    description: Option<String>,
    member_count: i64,
}

#[derive(FromRow)]
struct ChannelRow {
    id: String,
    team_id: String,
    name: String,
    is_private: i32,
}

#[derive(FromRow)]
struct MessageRow {
    id: String,
    channel_id: String,
    channel_name: String,
    content: String,
    sender: String,
    created_at: NaiveDateTime,
}

pub struct SqliteTeamsRepository {
    pool: SqlitePool,
}

impl SqliteTeamsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_channel(row: ChannelRow) -> Result<Channel> {
        Ok(Channel {
            id: parse_uuid(&row.id)?,
            team_id: parse_uuid(&row.team_id)?,
            name: row.name,
            is_private: row.is_private != 0,
        })
    }

    fn row_to_message(row: MessageRow) -> Result<TeamsMessage> {
        Ok(TeamsMessage {
            id: parse_uuid(&row.id)?,
            channel_id: parse_uuid(&row.channel_id)?,
            channel_name: row.channel_name,
            content: row.content,
            from: row.sender,
            timestamp: to_utc(row.created_at),
        })
    }
}

#[async_trait]
impl TeamsRepository for SqliteTeamsRepository {
    async fn create_team(&self, team: Team) -> Result<Team> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO teams (id, name, description, member_count) VALUES (?, ?, ?, ?)")
            .bind(team.id.to_string())
            .bind(&team.name)
            .bind(&team.description)
            .bind(team.member_count)
            .execute(&mut *tx)
            .await?;

        for channel in &team.channels {
            sqlx::query("INSERT INTO channels (id, team_id, name, is_private) VALUES (?, ?, ?, ?)")
                .bind(channel.id.to_string())
                .bind(team.id.to_string())
                .bind(&channel.name)
                .bind(bool_to_int(channel.is_private))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(team)
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        let team_rows = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, description, member_count FROM teams ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let channel_rows = sqlx::query_as::<_, ChannelRow>(
            "SELECT id, team_id, name, is_private FROM channels ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut channels: HashMap<String, Vec<Channel>> = HashMap::new();
        for row in channel_rows {
            let team_id = row.team_id.clone();
            channels.entry(team_id).or_default().push(Self::row_to_channel(row)?);
        }

        team_rows
            .into_iter()
            .map(|row| -> Result<Team> {
                Ok(Team {
                    id: parse_uuid(&row.id)?,
                    channels: channels.remove(&row.id).unwrap_or_default(),
                    name: row.name,
                    description: row.description,
                    member_count: row.member_count,
                })
            })
            .collect()
    }

    async fn find_channel(&self, id: Uuid) -> Result<Option<Channel>> {
        let row = sqlx::query_as::<_, ChannelRow>(
            "SELECT id, team_id, name, is_private FROM channels WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_channel).transpose()
    }

    async fn list_messages(&self) -> Result<Vec<TeamsMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.id, m.channel_id, c.name AS channel_name, m.content, m.sender, m.created_at
            FROM channel_messages m
            JOIN channels c ON c.id = m.channel_id
            ORDER BY m.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_message).collect()
    }

    async fn create_message(&self, message: TeamsMessage) -> Result<TeamsMessage> {
        let result = sqlx::query(
            "INSERT INTO channel_messages (id, channel_id, content, sender, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.channel_id.to_string())
        .bind(&message.content)
        .bind(&message.from)
        .bind(message.timestamp.naive_utc())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Database("Failed to store channel message".to_string()));
        }

        Ok(message)
    }
}
