use std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use crate::{
    domain::*,
    error::Result,
    policy::{self, Viewer},
    repository::{AnnouncementRepository, DocumentRepository, EventRepository, TicketRepository, UserRepository},
};

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub announcements: Vec<Announcement>,
    pub events: Vec<Event>,
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department: Department,
    pub announcement_count: usize,
    pub upcoming_event_count: usize,
    pub member_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub ai_generated_count: usize,
    pub upcoming_events: usize,
    pub open_tickets: usize,
    pub users: usize,
}

/// Read-only views that span several stores.
pub struct InsightsService {
    announcement_repo: Arc<dyn AnnouncementRepository>,
    event_repo: Arc<dyn EventRepository>,
    document_repo: Arc<dyn DocumentRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl InsightsService {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        event_repo: Arc<dyn EventRepository>,
        document_repo: Arc<dyn DocumentRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self { announcement_repo, event_repo, document_repo, ticket_repo, user_repo }
    }

    /// Case-insensitive match over both language variants of every text
    /// field. A blank query matches nothing.
    pub async fn search(&self, viewer: &Viewer, query: &str) -> Result<SearchResults> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(SearchResults {
                announcements: Vec::new(),
                events: Vec::new(),
                documents: Vec::new(),
            });
        }

        let hit = |fields: &[Option<&str>]| {
            fields
                .iter()
                .flatten()
                .any(|f| f.to_lowercase().contains(&needle))
        };

        let announcements = self
            .announcement_repo
            .list()
            .await?
            .into_iter()
            .filter(|a| policy::can_view_announcement(viewer, a))
            .filter(|a| {
                hit(&[
                    Some(a.title.as_str()),
                    a.title_ja.as_deref(),
                    Some(a.content.as_str()),
                    a.content_ja.as_deref(),
                ])
            })
            .collect();

        let events = self
            .event_repo
            .list()
            .await?
            .into_iter()
            .filter(|e| policy::can_view(viewer, e.department))
            .filter(|e| {
                hit(&[
                    Some(e.title.as_str()),
                    e.title_ja.as_deref(),
                    Some(e.description.as_str()),
                    e.description_ja.as_deref(),
                ])
            })
            .collect();

        let documents = self
            .document_repo
            .list()
            .await?
            .into_iter()
            .filter(|d| policy::can_view(viewer, d.department))
            .filter(|d| hit(&[Some(d.name.as_str())]))
            .collect();

        Ok(SearchResults { announcements, events, documents })
    }

    /// Per concrete department: approved announcements addressed to it or
    /// to everyone, upcoming events likewise, and head count.
    pub async fn department_summaries(&self) -> Result<Vec<DepartmentSummary>> {
        let now = Utc::now();
        let announcements = self
            .announcement_repo
            .list_by_status(AnnouncementStatus::Approved)
            .await?;
        let events: Vec<Event> = self
            .event_repo
            .list()
            .await?
            .into_iter()
            .filter(|e| e.start_at >= now)
            .collect();
        let users = self.user_repo.list().await?;

        let reaches = |scope: Department, dept: Department| scope.is_wildcard() || scope == dept;

        Ok(Department::CONCRETE
            .iter()
            .map(|&department| DepartmentSummary {
                department,
                announcement_count: announcements
                    .iter()
                    .filter(|a| reaches(a.department, department))
                    .count(),
                upcoming_event_count: events
                    .iter()
                    .filter(|e| reaches(e.department, department))
                    .count(),
                member_count: users.iter().filter(|u| u.department == department).count(),
            })
            .collect())
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        let now = Utc::now();
        let announcements = self.announcement_repo.list().await?;
        let count_status = |status: AnnouncementStatus| {
            announcements.iter().filter(|a| a.status == status).count()
        };

        let upcoming_events = self
            .event_repo
            .list()
            .await?
            .iter()
            .filter(|e| e.start_at >= now)
            .count();

        let open_tickets = self
            .ticket_repo
            .list()
            .await?
            .iter()
            .filter(|t| matches!(t.status, TicketStatus::Open | TicketStatus::InProgress))
            .count();

        Ok(AdminStats {
            pending_count: count_status(AnnouncementStatus::Pending),
            approved_count: count_status(AnnouncementStatus::Approved),
            rejected_count: count_status(AnnouncementStatus::Rejected),
            ai_generated_count: announcements.iter().filter(|a| a.is_ai_generated).count(),
            upcoming_events,
            open_tickets,
            users: self.user_repo.list().await?.len(),
        })
    }
}
