use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Department;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub size_bytes: Option<i64>,
    pub url: Option<String>,
    pub department: Department,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, DocumentKind::Folder)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Folder,
    Pdf,
    Doc,
    Spreadsheet,
    Presentation,
    Image,
    Other,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Folder => "folder",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Presentation => "presentation",
            DocumentKind::Image => "image",
            DocumentKind::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "folder" => Some(DocumentKind::Folder),
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "spreadsheet" => Some(DocumentKind::Spreadsheet),
            "presentation" => Some(DocumentKind::Presentation),
            "image" => Some(DocumentKind::Image),
            "other" => Some(DocumentKind::Other),
            _ => None,
        }
    }

    /// Guess the kind from a file name's extension.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "doc" | "docx" | "txt" | "md" => DocumentKind::Doc,
            "xls" | "xlsx" | "csv" => DocumentKind::Spreadsheet,
            "ppt" | "pptx" => DocumentKind::Presentation,
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" => DocumentKind::Image,
            _ => DocumentKind::Other,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    pub parent_id: Option<Uuid>,
    /// Inferred from the file name when omitted.
    #[serde(rename = "type")]
    pub kind: Option<DocumentKind>,
    pub size_bytes: Option<i64>,
    pub url: Option<String>,
    pub department: Option<Department>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentQuery {
    pub parent: Option<Uuid>,
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("Handbook.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("budget.xlsx"), DocumentKind::Spreadsheet);
        assert_eq!(DocumentKind::from_file_name("kickoff.pptx"), DocumentKind::Presentation);
        assert_eq!(DocumentKind::from_file_name("logo.svg"), DocumentKind::Image);
        assert_eq!(DocumentKind::from_file_name("README"), DocumentKind::Other);
    }
}
