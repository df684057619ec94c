use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Department, Priority};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub title_ja: Option<String>,
    pub content: String,
    pub content_ja: Option<String>,
    pub priority: Priority,
    pub department: Department,
    pub status: AnnouncementStatus,
    pub author: String,
    pub author_id: Uuid,
    pub image_url: Option<String>,
    pub is_ai_generated: bool,
    pub ai_overridden: bool,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Moderation gate. `Pending` is the only state a submission starts in;
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl AnnouncementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Pending => "pending",
            AnnouncementStatus::Approved => "approved",
            AnnouncementStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(AnnouncementStatus::Pending),
            "approved" => Some(AnnouncementStatus::Approved),
            "rejected" => Some(AnnouncementStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnnouncementStatus::Pending)
    }

    /// Apply a moderation decision.
    ///
    /// Re-applying the current terminal state is a no-op so repeated
    /// approve/reject clicks are harmless. Flipping a decision or sending a
    /// reviewed announcement back to pending is a conflict.
    pub fn transition(self, target: AnnouncementStatus) -> Result<AnnouncementStatus> {
        use AnnouncementStatus::*;

        match (self, target) {
            (Pending, Approved) | (Pending, Rejected) => Ok(target),
            (Approved, Approved) | (Rejected, Rejected) => Ok(self),
            (_, Pending) => Err(AppError::Conflict(format!(
                "Announcement is already {} and cannot return to pending",
                self.as_str()
            ))),
            (from, to) => Err(AppError::Conflict(format!(
                "Announcement is already {} and cannot be {}",
                from.as_str(),
                to.as_str()
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub title_ja: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub content_ja: Option<String>,
    pub priority: Option<Priority>,
    pub department: Option<Department>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub title_ja: Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    pub content_ja: Option<String>,
    pub priority: Option<Priority>,
    pub department: Option<Department>,
    pub image_url: Option<String>,
    pub status: Option<AnnouncementStatus>,
}

impl UpdateAnnouncementRequest {
    pub fn touches_text(&self) -> bool {
        self.title.is_some()
            || self.title_ja.is_some()
            || self.content.is_some()
            || self.content_ja.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementFilter {
    pub priority: Option<Priority>,
    pub department: Option<Department>,
    pub status: Option<AnnouncementStatus>,
    pub limit: Option<usize>,
}

impl AnnouncementFilter {
    pub fn matches(&self, announcement: &Announcement) -> bool {
        if let Some(priority) = self.priority {
            if announcement.priority != priority {
                return false;
            }
        }
        if let Some(department) = self.department {
            if !department.is_wildcard()
                && announcement.department != department
                && !announcement.department.is_wildcard()
            {
                return false;
            }
        }
        if let Some(status) = self.status {
            if announcement.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AnnouncementStatus::*;

    #[test]
    fn test_pending_can_be_approved_or_rejected() {
        assert_eq!(Pending.transition(Approved).unwrap(), Approved);
        assert_eq!(Pending.transition(Rejected).unwrap(), Rejected);
    }

    #[test]
    fn test_repeated_decision_is_noop() {
        let once = Pending.transition(Approved).unwrap();
        let twice = once.transition(Approved).unwrap();
        assert_eq!(twice, Approved);
        assert_eq!(Rejected.transition(Rejected).unwrap(), Rejected);
    }

    #[test]
    fn test_decisions_are_terminal() {
        assert!(matches!(Approved.transition(Rejected), Err(AppError::Conflict(_))));
        assert!(matches!(Rejected.transition(Approved), Err(AppError::Conflict(_))));
        assert!(matches!(Approved.transition(Pending), Err(AppError::Conflict(_))));
        assert!(matches!(Rejected.transition(Pending), Err(AppError::Conflict(_))));
        assert!(Approved.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_pending_to_pending_is_rejected() {
        // There is no decision to record here.
        assert!(Pending.transition(Pending).is_err());
    }
}
