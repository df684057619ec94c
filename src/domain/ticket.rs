use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};

pub const DEFAULT_TICKET_CATEGORY: &str = "IT Support";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpTicket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub responses: Vec<TicketResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    /// Store-assigned position in the conversation; zero until persisted.
    pub seq: i64,
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TicketStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "closed")]
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(TicketStatus::Open),
            "in-progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// Closed tickets are frozen. Help-desk staff can move an open ticket to
    /// any state; the requester can only close it. Re-sending the current
    /// state is a no-op for everyone.
    pub fn transition(self, target: TicketStatus, by_staff: bool) -> Result<TicketStatus> {
        if self == TicketStatus::Closed {
            if target == TicketStatus::Closed {
                return Ok(self);
            }
            return Err(AppError::Conflict("Ticket is closed".to_string()));
        }

        if by_staff || target == self || target == TicketStatus::Closed {
            Ok(target)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(TicketPriority::Low),
            "medium" => Some(TicketPriority::Medium),
            "high" => Some(TicketPriority::High),
            "critical" => Some(TicketPriority::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<TicketPriority>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddResponseRequest {
    #[validate(length(min = 1, message = "Response cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: TicketStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use TicketStatus::*;

    #[test]
    fn test_staff_can_move_freely_until_closed() {
        assert_eq!(Open.transition(InProgress, true).unwrap(), InProgress);
        assert_eq!(InProgress.transition(Resolved, true).unwrap(), Resolved);
        assert_eq!(Resolved.transition(Open, true).unwrap(), Open);
        assert_eq!(Resolved.transition(Closed, true).unwrap(), Closed);
    }

    #[test]
    fn test_requester_may_only_close() {
        assert_eq!(Open.transition(Closed, false).unwrap(), Closed);
        assert!(matches!(Open.transition(Resolved, false), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_requester_resending_status_is_noop() {
        assert_eq!(Open.transition(Open, false).unwrap(), Open);
        assert_eq!(InProgress.transition(InProgress, false).unwrap(), InProgress);
        assert!(matches!(InProgress.transition(Open, false), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_closed_is_terminal() {
        assert!(matches!(Closed.transition(Open, true), Err(AppError::Conflict(_))));
        assert_eq!(Closed.transition(Closed, false).unwrap(), Closed);
    }

    #[test]
    fn test_in_progress_wire_name() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(TicketStatus::from_str("in-progress"), Some(InProgress));
    }
}
