use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::domain::*;
use crate::error::{AppError, Result};

pub mod user_repository;
pub mod announcement_repository;
pub mod event_repository;
pub mod notification_repository;
pub mod document_repository;
pub mod ticket_repository;
pub mod teams_repository;

pub use user_repository::SqliteUserRepository;
pub use announcement_repository::SqliteAnnouncementRepository;
pub use event_repository::SqliteEventRepository;
pub use notification_repository::SqliteNotificationRepository;
pub use document_repository::SqliteDocumentRepository;
pub use ticket_repository::SqliteTicketRepository;
pub use teams_repository::SqliteTeamsRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn update(&self, id: Uuid, user: User) -> Result<User>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    /// Every announcement, newest first.
    async fn list(&self) -> Result<Vec<Announcement>>;
    async fn list_by_status(&self, status: AnnouncementStatus) -> Result<Vec<Announcement>>;
    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Announcement>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: Event) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    /// Every event, soonest first.
    async fn list(&self) -> Result<Vec<Event>>;
    /// Events starting in `[from, to]` whose reminder has not gone out.
    async fn list_due_for_reminder(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Event>>;
    async fn mark_reminder_sent(&self, id: Uuid) -> Result<()>;
    async fn update(&self, id: Uuid, event: Event) -> Result<Event>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> Result<Notification>;
    /// Insert a batch atomically.
    async fn create_many(&self, notifications: Vec<Notification>) -> Result<u64>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>>;
    async fn list_for_user(&self, user_id: Uuid, unread_only: bool) -> Result<Vec<Notification>>;
    async fn unread_count(&self, user_id: Uuid) -> Result<i64>;
    async fn mark_read(&self, id: Uuid) -> Result<()>;
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn record_dispatch(&self, dispatch: NotificationDispatch) -> Result<NotificationDispatch>;
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: Document) -> Result<Document>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>>;
    /// Children of a folder, or the root level when `parent_id` is `None`.
    async fn list_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Document>>;
    async fn list(&self) -> Result<Vec<Document>>;
    async fn count_children(&self, id: Uuid) -> Result<i64>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create(&self, ticket: HelpTicket) -> Result<HelpTicket>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<HelpTicket>>;
    async fn list(&self) -> Result<Vec<HelpTicket>>;
    async fn list_by_creator(&self, user_id: Uuid) -> Result<Vec<HelpTicket>>;
    async fn add_response(&self, ticket_id: Uuid, response: TicketResponse) -> Result<HelpTicket>;
    async fn update_status(&self, id: Uuid, status: TicketStatus) -> Result<HelpTicket>;
}

#[async_trait]
pub trait TeamsRepository: Send + Sync {
    async fn create_team(&self, team: Team) -> Result<Team>;
    async fn list_teams(&self) -> Result<Vec<Team>>;
    async fn find_channel(&self, id: Uuid) -> Result<Option<Channel>>;
    /// Newest first.
    async fn list_messages(&self) -> Result<Vec<TeamsMessage>>;
    async fn create_message(&self, message: TeamsMessage) -> Result<TeamsMessage>;
}

// Row decoding helpers shared by the SQLite repositories.

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::Database(e.to_string()))
}

pub(crate) fn parse_optional_uuid(value: Option<String>) -> Result<Option<Uuid>> {
    value.as_deref().map(parse_uuid).transpose()
}

pub(crate) fn parse_column<T>(value: &str, parse: fn(&str) -> Option<T>, column: &str) -> Result<T> {
    parse(value).ok_or_else(|| AppError::Database(format!("Invalid {}: {}", column, value)))
}

pub(crate) fn to_utc(value: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(value, Utc)
}

pub(crate) fn bool_to_int(value: bool) -> i32 {
    if value { 1 } else { 0 }
}
