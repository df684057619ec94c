use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    domain::*,
    error::{AppError, Result},
    integrations::{IntegrationEvent, IntegrationManager},
    policy::{self, Viewer},
    repository::{AnnouncementRepository, NotificationRepository},
};

pub struct AnnouncementService {
    repo: Arc<dyn AnnouncementRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    integration_manager: Arc<IntegrationManager>,
}

impl AnnouncementService {
    pub fn new(
        repo: Arc<dyn AnnouncementRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        integration_manager: Arc<IntegrationManager>,
    ) -> Self {
        Self { repo, notification_repo, integration_manager }
    }

    /// Announcements the viewer may see, newest first.
    pub async fn list(&self, viewer: &Viewer, filter: &AnnouncementFilter) -> Result<Vec<Announcement>> {
        let announcements = self.repo.list().await?;

        let visible = announcements
            .into_iter()
            .filter(|a| policy::can_view_announcement(viewer, a))
            .filter(|a| filter.matches(a))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(visible)
    }

    /// Invisible announcements are reported as missing.
    pub async fn get(&self, viewer: &Viewer, id: Uuid) -> Result<Announcement> {
        let announcement = self.find(id).await?;

        if !policy::can_view_announcement(viewer, &announcement) {
            return Err(AppError::NotFound("Announcement not found".to_string()));
        }

        Ok(announcement)
    }

    /// Submissions always enter the moderation queue as pending.
    pub async fn create(&self, author: &User, request: CreateAnnouncementRequest) -> Result<Announcement> {
        let now = Utc::now();
        let announcement = Announcement {
            id: Uuid::new_v4(),
            title: request.title,
            title_ja: request.title_ja,
            content: request.content,
            content_ja: request.content_ja,
            priority: request.priority.unwrap_or_default(),
            department: request.department.unwrap_or(Department::All),
            status: AnnouncementStatus::Pending,
            author: author.name.clone(),
            author_id: author.id,
            image_url: request.image_url,
            is_ai_generated: request.is_ai_generated,
            ai_overridden: false,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(announcement).await?;
        tracing::info!("Announcement {} submitted by {}", created.id, author.email);

        Ok(created)
    }

    pub async fn update(
        &self,
        viewer: &Viewer,
        id: Uuid,
        request: UpdateAnnouncementRequest,
    ) -> Result<Announcement> {
        let mut announcement = self.get(viewer, id).await?;

        if !policy::can_edit_announcement(viewer, &announcement) {
            return Err(AppError::Forbidden);
        }

        // Reviewed content only changes through a moderator.
        if announcement.status.is_terminal() && !policy::can_moderate(viewer.role) {
            return Err(AppError::Conflict(format!(
                "Announcement is already {} and can no longer be edited",
                announcement.status.as_str()
            )));
        }

        if announcement.is_ai_generated && request.touches_text() {
            announcement.ai_overridden = true;
        }

        // Reject a status change up front so it never lands half-applied.
        let status = request.status.filter(|target| *target != announcement.status);
        if let Some(target) = status {
            if !policy::can_moderate(viewer.role) {
                return Err(AppError::Forbidden);
            }
            announcement.status.transition(target)?;
        }

        if let Some(title) = request.title {
            announcement.title = title;
        }
        if let Some(title_ja) = request.title_ja {
            announcement.title_ja = Some(title_ja);
        }
        if let Some(content) = request.content {
            announcement.content = content;
        }
        if let Some(content_ja) = request.content_ja {
            announcement.content_ja = Some(content_ja);
        }
        if let Some(priority) = request.priority {
            announcement.priority = priority;
        }
        if let Some(department) = request.department {
            announcement.department = department;
        }
        if let Some(image_url) = request.image_url {
            announcement.image_url = Some(image_url);
        }

        let updated = self.repo.update(id, announcement).await?;

        match status {
            Some(target) => self.moderate(viewer, id, target).await,
            None => Ok(updated),
        }
    }

    pub async fn delete(&self, viewer: &Viewer, id: Uuid) -> Result<()> {
        let announcement = self.get(viewer, id).await?;

        if !policy::can_edit_announcement(viewer, &announcement) {
            return Err(AppError::Forbidden);
        }

        self.repo.delete(id).await?;
        tracing::info!("Announcement {} deleted", id);
        Ok(())
    }

    pub async fn approve(&self, viewer: &Viewer, id: Uuid) -> Result<Announcement> {
        self.moderate(viewer, id, AnnouncementStatus::Approved).await
    }

    pub async fn reject(&self, viewer: &Viewer, id: Uuid) -> Result<Announcement> {
        self.moderate(viewer, id, AnnouncementStatus::Rejected).await
    }

    /// Apply a moderation decision. Repeating the current decision returns
    /// the announcement unchanged without a second audit entry.
    pub async fn moderate(
        &self,
        viewer: &Viewer,
        id: Uuid,
        target: AnnouncementStatus,
    ) -> Result<Announcement> {
        if !policy::can_moderate(viewer.role) {
            return Err(AppError::Forbidden);
        }

        let mut announcement = self.find(id).await?;
        let next = announcement.status.transition(target)?;

        if next == announcement.status {
            return Ok(announcement);
        }

        announcement.status = next;
        announcement.reviewed_by = Some(viewer.id);
        announcement.reviewed_at = Some(Utc::now());

        let updated = self.repo.update(id, announcement).await?;
        tracing::info!("Announcement {} {} by {}", id, next.as_str(), viewer.id);

        self.notify_author(&updated).await?;

        if next == AnnouncementStatus::Approved {
            self.integration_manager
                .handle_event(IntegrationEvent::AnnouncementApproved(updated.clone()))
                .await;
        }

        Ok(updated)
    }

    /// Moderation queue for admins.
    pub async fn list_by_status(&self, status: AnnouncementStatus) -> Result<Vec<Announcement>> {
        self.repo.list_by_status(status).await
    }

    async fn find(&self, id: Uuid) -> Result<Announcement> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))
    }

    async fn notify_author(&self, announcement: &Announcement) -> Result<()> {
        let (title, title_ja) = match announcement.status {
            AnnouncementStatus::Approved => ("Announcement approved", "お知らせが承認されました"),
            _ => ("Announcement rejected", "お知らせが却下されました"),
        };

        let notification = NewNotification {
            title: title.to_string(),
            title_ja: Some(title_ja.to_string()),
            message: announcement.title.clone(),
            message_ja: announcement.title_ja.clone(),
            notification_type: NotificationType::Announcement,
            link: Some(format!("/announcements/{}", announcement.id)),
        };

        self.notification_repo
            .create(notification.for_user(announcement.author_id))
            .await?;

        Ok(())
    }
}
