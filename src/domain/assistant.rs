use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Department, Language, Priority};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatbotRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    #[serde(default)]
    pub language: Language,
    /// Defaults to the asker's own department.
    pub department: Option<Department>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Translate,
    Summarize,
    Announcement,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: GenerationKind,
    #[serde(default)]
    pub target_language: Language,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub generated_content: String,
    pub confidence: f64,
    pub suggested_priority: Priority,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrioritizeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityAssessment {
    pub priority: Priority,
    pub confidence: f64,
    pub reasoning: String,
}
