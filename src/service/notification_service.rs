use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    domain::*,
    error::{AppError, Result},
    integrations::{IntegrationEvent, IntegrationManager},
    policy::{self, Viewer},
    repository::{NotificationRepository, UserRepository},
};

pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,
    integration_manager: Arc<IntegrationManager>,
}

impl NotificationService {
    pub fn new(
        repo: Arc<dyn NotificationRepository>,
        user_repo: Arc<dyn UserRepository>,
        integration_manager: Arc<IntegrationManager>,
    ) -> Self {
        Self { repo, user_repo, integration_manager }
    }

    /// The viewer's inbox and its unread count.
    pub async fn inbox(&self, user_id: Uuid, unread_only: bool) -> Result<(Vec<Notification>, i64)> {
        let notifications = self.repo.list_for_user(user_id, unread_only).await?;
        let unread = self.repo.unread_count(user_id).await?;
        Ok((notifications, unread))
    }

    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        self.find_owned(user_id, id).await?;
        self.repo.mark_read(id).await
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        self.repo.mark_all_read(user_id).await
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        self.find_owned(user_id, id).await?;
        self.repo.delete(id).await
    }

    /// Broadcast to explicit recipients or to everyone who can see a
    /// department. Immediate sends land in-app right away; scheduled sends
    /// are only recorded.
    pub async fn send(&self, sender: &Viewer, request: SendNotificationRequest) -> Result<NotificationDispatch> {
        if !policy::can_send_notifications(sender.role) {
            return Err(AppError::Forbidden);
        }

        let recipients = self.resolve_recipients(&request).await?;
        if recipients.is_empty() {
            return Err(AppError::BadRequest("No recipients for notification".to_string()));
        }

        let now = Utc::now();
        let scheduled = request.scheduled_for.filter(|at| *at > now);

        let status = if scheduled.is_some() {
            DispatchStatus::Scheduled
        } else {
            DispatchStatus::Sent
        };

        if status == DispatchStatus::Sent {
            let notification = NewNotification {
                title: request.title.clone(),
                title_ja: request.title_ja.clone(),
                message: request.message.clone(),
                message_ja: request.message_ja.clone(),
                notification_type: NotificationType::System,
                link: request.link.clone(),
            };
            let batch = recipients.iter().map(|id| notification.for_user(*id)).collect();
            self.repo.create_many(batch).await?;
        }

        let dispatch = NotificationDispatch {
            id: Uuid::new_v4(),
            channel: request.channel,
            recipients,
            title: request.title,
            message: request.message,
            scheduled_for: scheduled,
            status,
            sent_at: (status == DispatchStatus::Sent).then_some(now),
            created_at: now,
        };

        let dispatch = self.repo.record_dispatch(dispatch).await?;
        tracing::info!(
            "Notification {} {} via {} to {} recipients",
            dispatch.id,
            dispatch.status.as_str(),
            dispatch.channel.as_str(),
            dispatch.recipients.len()
        );

        if status == DispatchStatus::Sent {
            self.integration_manager
                .handle_event(IntegrationEvent::NotificationDispatched(dispatch.clone()))
                .await;
        }

        Ok(dispatch)
    }

    async fn resolve_recipients(&self, request: &SendNotificationRequest) -> Result<Vec<Uuid>> {
        let users = self.user_repo.list().await?;
        let known: HashSet<Uuid> = users.iter().map(|u| u.id).collect();

        let mut seen = HashSet::new();
        let mut recipients = Vec::new();

        for id in &request.recipients {
            if !known.contains(id) {
                return Err(AppError::BadRequest(format!("Unknown recipient: {}", id)));
            }
            if seen.insert(*id) {
                recipients.push(*id);
            }
        }

        if let Some(department) = request.department {
            for user in &users {
                if policy::can_view(&Viewer::from(user), department) && seen.insert(user.id) {
                    recipients.push(user.id);
                }
            }
        }

        Ok(recipients)
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Notification> {
        match self.repo.find_by_id(id).await? {
            Some(n) if n.user_id == user_id => Ok(n),
            _ => Err(AppError::NotFound("Notification not found".to_string())),
        }
    }
}
