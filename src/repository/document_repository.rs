use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Department, Document, DocumentKind},
    error::{AppError, Result},
    repository::{parse_column, parse_optional_uuid, parse_uuid, to_utc, DocumentRepository},
};

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    parent_id: Option<String>,
    name: String,
    kind: String,
    size_bytes: Option<i64>,
    url: Option<String>,
    department: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const DOCUMENT_COLUMNS: &str =
    "id, parent_id, name, kind, size_bytes, url, department, created_at, updated_at";

pub struct SqliteDocumentRepository {
    pool: SqlitePool,
}

impl SqliteDocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_document(row: DocumentRow) -> Result<Document> {
        Ok(Document {
            id: parse_uuid(&row.id)?,
            parent_id: parse_optional_uuid(row.parent_id)?,
            name: row.name,
            kind: parse_column(&row.kind, DocumentKind::from_str, "document kind")?,
            size_bytes: row.size_bytes,
            url: row.url,
            department: parse_column(&row.department, Department::from_str, "department")?,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn create(&self, document: Document) -> Result<Document> {
        sqlx::query(
            r#"
            INSERT INTO documents (
                id, parent_id, name, kind, size_bytes, url, department, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(document.id.to_string())
        .bind(document.parent_id.map(|id| id.to_string()))
        .bind(&document.name)
        .bind(document.kind.as_str())
        .bind(document.size_bytes)
        .bind(&document.url)
        .bind(document.department.as_str())
        .bind(document.created_at.naive_utc())
        .bind(document.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(document.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created document".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {} FROM documents WHERE id = ?",
            DOCUMENT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_document).transpose()
    }

    async fn list_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Document>> {
        // Folders first, then files, alphabetical within each group.
        let rows = match parent_id {
            Some(parent) => {
                sqlx::query_as::<_, DocumentRow>(&format!(
                    r#"
                    SELECT {} FROM documents WHERE parent_id = ?
                    ORDER BY kind <> 'folder', name COLLATE NOCASE
                    "#,
                    DOCUMENT_COLUMNS
                ))
                .bind(parent.to_string())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DocumentRow>(&format!(
                    r#"
                    SELECT {} FROM documents WHERE parent_id IS NULL
                    ORDER BY kind <> 'folder', name COLLATE NOCASE
                    "#,
                    DOCUMENT_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(Self::row_to_document).collect()
    }

    async fn list(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {} FROM documents ORDER BY name COLLATE NOCASE",
            DOCUMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_document).collect()
    }

    async fn count_children(&self, id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE parent_id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
