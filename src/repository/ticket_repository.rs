use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{HelpTicket, TicketPriority, TicketResponse, TicketStatus},
    error::{AppError, Result},
    repository::{bool_to_int, parse_column, parse_uuid, to_utc, TicketRepository},
};

#[derive(FromRow)]
struct TicketRow {
    id: String,
    title: String,
    description: String,
    category: String,
    status: String,
    priority: String,
    created_by: String,
    created_by_name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ResponseRow {
    seq: i64,
    id: String,
    ticket_id: String,
    author_id: String,
    author_name: String,
    content: String,
    is_staff: i32,
    created_at: NaiveDateTime,
}

const TICKET_COLUMNS: &str = r#"
    id, title, description, category, status, priority, created_by,
    created_by_name, created_at, updated_at
"#;

const RESPONSE_COLUMNS: &str =
    "seq, id, ticket_id, author_id, author_name, content, is_staff, created_at";

pub struct SqliteTicketRepository {
    pool: SqlitePool,
}

impl SqliteTicketRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_ticket(row: TicketRow, responses: Vec<TicketResponse>) -> Result<HelpTicket> {
        Ok(HelpTicket {
            id: parse_uuid(&row.id)?,
            title: row.title,
            description: row.description,
            category: row.category,
            status: parse_column(&row.status, TicketStatus::from_str, "ticket status")?,
            priority: parse_column(&row.priority, TicketPriority::from_str, "ticket priority")?,
            created_by: parse_uuid(&row.created_by)?,
            created_by_name: row.created_by_name,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
            responses,
        })
    }

    fn row_to_response(row: ResponseRow) -> Result<TicketResponse> {
        Ok(TicketResponse {
            seq: row.seq,
            id: parse_uuid(&row.id)?,
            author_id: parse_uuid(&row.author_id)?,
            author_name: row.author_name,
            content: row.content,
            is_staff: row.is_staff != 0,
            created_at: to_utc(row.created_at),
        })
    }

    async fn responses_for(&self, ticket_id: Uuid) -> Result<Vec<TicketResponse>> {
        let rows = sqlx::query_as::<_, ResponseRow>(&format!(
            "SELECT {} FROM ticket_responses WHERE ticket_id = ? ORDER BY seq ASC",
            RESPONSE_COLUMNS
        ))
        .bind(ticket_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_response).collect()
    }

    /// Attach responses to a batch of ticket rows with a single extra query.
    async fn hydrate(&self, rows: Vec<TicketRow>) -> Result<Vec<HelpTicket>> {
        let response_rows = sqlx::query_as::<_, ResponseRow>(&format!(
            "SELECT {} FROM ticket_responses ORDER BY seq ASC",
            RESPONSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut by_ticket: HashMap<String, Vec<TicketResponse>> = HashMap::new();
        for row in response_rows {
            let ticket_id = row.ticket_id.clone();
            by_ticket
                .entry(ticket_id)
                .or_default()
                .push(Self::row_to_response(row)?);
        }

        rows.into_iter()
            .map(|row| {
                let responses = by_ticket.remove(&row.id).unwrap_or_default();
                Self::row_to_ticket(row, responses)
            })
            .collect()
    }
}

#[async_trait]
impl TicketRepository for SqliteTicketRepository {
    async fn create(&self, ticket: HelpTicket) -> Result<HelpTicket> {
        sqlx::query(
            r#"
            INSERT INTO help_tickets (
                id, title, description, category, status, priority, created_by,
                created_by_name, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(ticket.id.to_string())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(&ticket.category)
        .bind(ticket.status.as_str())
        .bind(ticket.priority.as_str())
        .bind(ticket.created_by.to_string())
        .bind(&ticket.created_by_name)
        .bind(ticket.created_at.naive_utc())
        .bind(ticket.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(ticket.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created ticket".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HelpTicket>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM help_tickets WHERE id = ?",
            TICKET_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let responses = self.responses_for(id).await?;
                Ok(Some(Self::row_to_ticket(row, responses)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<HelpTicket>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM help_tickets ORDER BY created_at DESC",
            TICKET_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn list_by_creator(&self, user_id: Uuid) -> Result<Vec<HelpTicket>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM help_tickets WHERE created_by = ? ORDER BY created_at DESC",
            TICKET_COLUMNS
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn add_response(&self, ticket_id: Uuid, response: TicketResponse) -> Result<HelpTicket> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO ticket_responses (
                id, ticket_id, author_id, author_name, content, is_staff, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(response.id.to_string())
        .bind(ticket_id.to_string())
        .bind(response.author_id.to_string())
        .bind(&response.author_name)
        .bind(&response.content)
        .bind(bool_to_int(response.is_staff))
        .bind(response.created_at.naive_utc())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE help_tickets SET updated_at = ? WHERE id = ?")
            .bind(Utc::now().naive_utc())
            .bind(ticket_id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }

    async fn update_status(&self, id: Uuid, status: TicketStatus) -> Result<HelpTicket> {
        sqlx::query("UPDATE help_tickets SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now().naive_utc())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }
}
