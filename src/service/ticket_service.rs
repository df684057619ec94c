use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    domain::*,
    error::{AppError, Result},
    policy::{self, Viewer},
    repository::{NotificationRepository, TicketRepository},
};

pub struct TicketService {
    repo: Arc<dyn TicketRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
}

impl TicketService {
    pub fn new(
        repo: Arc<dyn TicketRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self { repo, notification_repo }
    }

    /// Staff see the whole queue; everyone else sees their own tickets.
    pub async fn list(&self, viewer: &Viewer) -> Result<Vec<HelpTicket>> {
        if policy::is_help_desk_staff(viewer.role) {
            self.repo.list().await
        } else {
            self.repo.list_by_creator(viewer.id).await
        }
    }

    pub async fn get(&self, viewer: &Viewer, id: Uuid) -> Result<HelpTicket> {
        match self.repo.find_by_id(id).await? {
            Some(t) if policy::can_view_ticket(viewer, &t) => Ok(t),
            _ => Err(AppError::NotFound("Ticket not found".to_string())),
        }
    }

    pub async fn create(&self, requester: &User, request: CreateTicketRequest) -> Result<HelpTicket> {
        let now = Utc::now();
        let ticket = HelpTicket {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            category: request
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TICKET_CATEGORY.to_string()),
            status: TicketStatus::Open,
            priority: request.priority.unwrap_or_default(),
            created_by: requester.id,
            created_by_name: requester.name.clone(),
            created_at: now,
            updated_at: now,
            responses: Vec::new(),
        };

        let created = self.repo.create(ticket).await?;
        tracing::info!("Ticket {} opened by {}", created.id, requester.email);
        Ok(created)
    }

    /// Append a reply. A staff reply picks up an open ticket.
    pub async fn respond(&self, author: &User, id: Uuid, request: AddResponseRequest) -> Result<HelpTicket> {
        let viewer = Viewer::from(author);
        let ticket = self.get(&viewer, id).await?;

        if ticket.status == TicketStatus::Closed {
            return Err(AppError::Conflict("Ticket is closed".to_string()));
        }

        let is_staff = policy::is_help_desk_staff(author.role);
        let response = TicketResponse {
            seq: 0,
            id: Uuid::new_v4(),
            author_id: author.id,
            author_name: author.name.clone(),
            content: request.content,
            is_staff,
            created_at: Utc::now(),
        };

        let mut updated = self.repo.add_response(id, response).await?;

        if is_staff && updated.status == TicketStatus::Open {
            updated = self.repo.update_status(id, TicketStatus::InProgress).await?;
        }

        if is_staff && ticket.created_by != author.id {
            let notification = NewNotification {
                title: format!("New reply on ticket: {}", ticket.title),
                title_ja: Some(format!("チケットに返信がありました：{}", ticket.title)),
                message: format!("{} replied to your help request", author.name),
                message_ja: Some(format!("{} さんがお問い合わせに返信しました", author.name)),
                notification_type: NotificationType::System,
                link: Some(format!("/tickets/{}", ticket.id)),
            };
            self.notification_repo
                .create(notification.for_user(ticket.created_by))
                .await?;
        }

        Ok(updated)
    }

    pub async fn update_status(&self, viewer: &Viewer, id: Uuid, target: TicketStatus) -> Result<HelpTicket> {
        let ticket = self.get(viewer, id).await?;
        let next = ticket
            .status
            .transition(target, policy::is_help_desk_staff(viewer.role))?;

        if next == ticket.status {
            return Ok(ticket);
        }

        let updated = self.repo.update_status(id, next).await?;
        tracing::info!("Ticket {} moved to {}", id, next.as_str());
        Ok(updated)
    }
}
