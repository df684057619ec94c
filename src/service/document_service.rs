use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    domain::*,
    error::{AppError, Result},
    policy::{self, Viewer},
    repository::DocumentRepository,
};

pub struct DocumentService {
    repo: Arc<dyn DocumentRepository>,
}

impl DocumentService {
    pub fn new(repo: Arc<dyn DocumentRepository>) -> Self {
        Self { repo }
    }

    /// A folder listing, or a name search across the whole tree when `q` is set.
    pub async fn list(&self, viewer: &Viewer, query: &DocumentQuery) -> Result<Vec<Document>> {
        let documents = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let needle = q.to_lowercase();
                self.repo
                    .list()
                    .await?
                    .into_iter()
                    .filter(|d| d.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => {
                if let Some(parent) = query.parent {
                    self.get(viewer, parent).await?;
                }
                self.repo.list_children(query.parent).await?
            }
        };

        Ok(documents
            .into_iter()
            .filter(|d| policy::can_view(viewer, d.department))
            .collect())
    }

    pub async fn get(&self, viewer: &Viewer, id: Uuid) -> Result<Document> {
        match self.repo.find_by_id(id).await? {
            Some(d) if policy::can_view(viewer, d.department) => Ok(d),
            _ => Err(AppError::NotFound("Document not found".to_string())),
        }
    }

    pub async fn create(&self, viewer: &Viewer, request: CreateDocumentRequest) -> Result<Document> {
        if !policy::can_manage_documents(viewer.role) {
            return Err(AppError::Forbidden);
        }

        let parent_department = match request.parent_id {
            Some(parent_id) => {
                let parent = self.get(viewer, parent_id).await?;
                if !parent.is_folder() {
                    return Err(AppError::BadRequest("Parent is not a folder".to_string()));
                }
                Some(parent.department)
            }
            None => None,
        };

        let kind = request
            .kind
            .unwrap_or_else(|| DocumentKind::from_file_name(&request.name));

        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            parent_id: request.parent_id,
            name: request.name,
            kind,
            size_bytes: if kind == DocumentKind::Folder { None } else { request.size_bytes },
            url: request.url,
            department: request
                .department
                .or(parent_department)
                .unwrap_or(Department::All),
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(document).await?;
        tracing::info!("Document {} ({}) created", created.name, created.kind.as_str());
        Ok(created)
    }

    /// Folders must be emptied before they can be removed.
    pub async fn delete(&self, viewer: &Viewer, id: Uuid) -> Result<()> {
        if !policy::can_manage_documents(viewer.role) {
            return Err(AppError::Forbidden);
        }

        let document = self.get(viewer, id).await?;

        if document.is_folder() && self.repo.count_children(id).await? > 0 {
            return Err(AppError::Conflict("Folder is not empty".to_string()));
        }

        self.repo.delete(id).await
    }
}
