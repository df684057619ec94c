use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Department;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub title_ja: Option<String>,
    pub message: String,
    pub message_ja: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Announcement,
    Event,
    Reminder,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Announcement => "announcement",
            NotificationType::Event => "event",
            NotificationType::Reminder => "reminder",
            NotificationType::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "announcement" => Some(NotificationType::Announcement),
            "event" => Some(NotificationType::Event),
            "reminder" => Some(NotificationType::Reminder),
            "system" => Some(NotificationType::System),
            _ => None,
        }
    }
}

/// Input for a single in-app notification, before it is addressed to a user.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub title_ja: Option<String>,
    pub message: String,
    pub message_ja: Option<String>,
    pub notification_type: NotificationType,
    pub link: Option<String>,
}

impl NewNotification {
    pub fn for_user(&self, user_id: Uuid) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id,
            title: self.title.clone(),
            title_ja: self.title_ja.clone(),
            message: self.message.clone(),
            message_ja: self.message_ja.clone(),
            notification_type: self.notification_type,
            is_read: false,
            link: self.link.clone(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    Teams,
    Email,
    Push,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Teams => "teams",
            DeliveryChannel::Email => "email",
            DeliveryChannel::Push => "push",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Scheduled,
}

impl DispatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Sent => "sent",
            DispatchStatus::Scheduled => "scheduled",
        }
    }
}

/// Audit record of an outbound broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDispatch {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub channel: DeliveryChannel,
    pub recipients: Vec<Uuid>,
    pub title: String,
    pub message: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub status: DispatchStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(rename = "type")]
    pub channel: DeliveryChannel,
    #[serde(default)]
    pub recipients: Vec<Uuid>,
    /// Address every user who can see this department instead of a fixed list.
    pub department: Option<Department>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub title_ja: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub message_ja: Option<String>,
    pub link: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
}
