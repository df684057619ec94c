use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Department, Priority};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub title_ja: Option<String>,
    pub description: String,
    pub description_ja: Option<String>,
    #[serde(rename = "startDate")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_at: DateTime<Utc>,
    pub location: String,
    pub department: Department,
    pub priority: Priority,
    pub is_recurring: bool,
    #[serde(rename = "recurrencePattern")]
    pub recurrence: Option<RecurrencePattern>,
    pub reminder_sent: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Biweekly => "biweekly",
            RecurrencePattern::Monthly => "monthly",
            RecurrencePattern::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(RecurrencePattern::Daily),
            "weekly" => Some(RecurrencePattern::Weekly),
            "biweekly" => Some(RecurrencePattern::Biweekly),
            "monthly" => Some(RecurrencePattern::Monthly),
            "yearly" => Some(RecurrencePattern::Yearly),
            _ => None,
        }
    }
}

/// Events may not end before they start.
pub fn validate_schedule(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Result<()> {
    if end_at < start_at {
        return Err(AppError::BadRequest(
            "Event end date must not be before its start date".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub title_ja: Option<String>,
    #[serde(default)]
    pub description: String,
    pub description_ja: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    pub department: Option<Department>,
    pub priority: Option<Priority>,
    pub recurrence_pattern: Option<RecurrencePattern>,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub title_ja: Option<String>,
    pub description: Option<String>,
    pub description_ja: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub department: Option<Department>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the recurrence.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub recurrence_pattern: Option<Option<RecurrencePattern>>,
}

fn deserialize_some<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub department: Option<Department>,
    #[serde(default)]
    pub upcoming: bool,
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event, now: DateTime<Utc>) -> bool {
        if let Some(department) = self.department {
            if !department.is_wildcard()
                && event.department != department
                && !event.department.is_wildcard()
            {
                return false;
            }
        }
        if self.upcoming && event.start_at < now {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_schedule_validation() {
        let start = Utc::now();
        assert!(validate_schedule(start, start).is_ok());
        assert!(validate_schedule(start, start + Duration::hours(1)).is_ok());
        assert!(matches!(
            validate_schedule(start, start - Duration::minutes(1)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_update_distinguishes_cleared_recurrence() {
        let cleared: UpdateEventRequest =
            serde_json::from_str(r#"{"recurrencePattern": null}"#).unwrap();
        assert_eq!(cleared.recurrence_pattern, Some(None));

        let untouched: UpdateEventRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(untouched.recurrence_pattern, None);

        let weekly: UpdateEventRequest =
            serde_json::from_str(r#"{"recurrencePattern": "weekly"}"#).unwrap();
        assert_eq!(weekly.recurrence_pattern, Some(Some(RecurrencePattern::Weekly)));
    }
}
