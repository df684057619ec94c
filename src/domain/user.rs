use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Department, Language, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Department,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: ThemeMode,
    pub language: Language,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub show_birthday: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
            language: Language::En,
            email_notifications: true,
            push_notifications: true,
            show_birthday: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub role: Role,
    pub department: Department,
    pub job_title: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub theme: Option<ThemeMode>,
    pub language: Option<Language>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub show_birthday: Option<bool>,
}

impl UserPreferences {
    pub fn apply(&mut self, update: UpdatePreferencesRequest) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(email) = update.email_notifications {
            self.email_notifications = email;
        }
        if let Some(push) = update.push_notifications {
            self.push_notifications = push;
        }
        if let Some(show) = update.show_birthday {
            self.show_birthday = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_partial_update() {
        let mut prefs = UserPreferences::default();
        prefs.apply(UpdatePreferencesRequest {
            language: Some(Language::Ja),
            push_notifications: Some(false),
            ..Default::default()
        });

        assert_eq!(prefs.language, Language::Ja);
        assert!(!prefs.push_notifications);
        assert!(prefs.email_notifications);
        assert_eq!(prefs.theme, ThemeMode::System);
    }

    #[test]
    fn test_preferences_camel_case_json() {
        let json = serde_json::to_value(UserPreferences::default()).unwrap();
        assert_eq!(json["emailNotifications"], true);
        assert_eq!(json["theme"], "system");
    }
}
