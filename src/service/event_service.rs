use std::sync::Arc;
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use crate::{
    domain::*,
    error::{AppError, Result},
    integrations::{IntegrationEvent, IntegrationManager},
    policy::{self, Viewer},
    repository::{EventRepository, NotificationRepository, UserRepository},
};

pub struct EventService {
    repo: Arc<dyn EventRepository>,
    user_repo: Arc<dyn UserRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    integration_manager: Arc<IntegrationManager>,
    reminder_lead: Duration,
}

impl EventService {
    pub fn new(
        repo: Arc<dyn EventRepository>,
        user_repo: Arc<dyn UserRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        integration_manager: Arc<IntegrationManager>,
        reminder_lead_hours: i64,
    ) -> Self {
        Self {
            repo,
            user_repo,
            notification_repo,
            integration_manager,
            reminder_lead: Duration::hours(reminder_lead_hours),
        }
    }

    /// Events the viewer may see, soonest first.
    pub async fn list(&self, viewer: &Viewer, filter: &EventFilter) -> Result<Vec<Event>> {
        let now = Utc::now();
        let events = self.repo.list().await?;

        Ok(events
            .into_iter()
            .filter(|e| policy::can_view(viewer, e.department))
            .filter(|e| filter.matches(e, now))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect())
    }

    pub async fn get(&self, viewer: &Viewer, id: Uuid) -> Result<Event> {
        let event = self.find(id).await?;

        if !policy::can_view(viewer, event.department) {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(event)
    }

    pub async fn create(&self, creator: &User, request: CreateEventRequest) -> Result<Event> {
        if !policy::can_manage_events(creator.role) {
            return Err(AppError::Forbidden);
        }

        validate_schedule(request.start_date, request.end_date)?;

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: request.title,
            title_ja: request.title_ja,
            description: request.description,
            description_ja: request.description_ja,
            start_at: request.start_date,
            end_at: request.end_date,
            location: request.location,
            department: request.department.unwrap_or(Department::All),
            priority: request.priority.unwrap_or(Priority::Event),
            is_recurring: request.recurrence_pattern.is_some(),
            recurrence: request.recurrence_pattern,
            reminder_sent: false,
            created_by: creator.id,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(event).await?;
        tracing::info!("Event {} scheduled for {}", created.id, created.start_at);

        self.integration_manager
            .handle_event(IntegrationEvent::EventCreated(created.clone()))
            .await;

        Ok(created)
    }

    pub async fn update(&self, viewer: &Viewer, id: Uuid, request: UpdateEventRequest) -> Result<Event> {
        if !policy::can_manage_events(viewer.role) {
            return Err(AppError::Forbidden);
        }

        let mut event = self.find(id).await?;

        let start_at = request.start_date.unwrap_or(event.start_at);
        let end_at = request.end_date.unwrap_or(event.end_at);
        validate_schedule(start_at, end_at)?;

        // A moved event gets a fresh reminder.
        if start_at != event.start_at {
            event.reminder_sent = false;
        }
        event.start_at = start_at;
        event.end_at = end_at;

        if let Some(title) = request.title {
            event.title = title;
        }
        if let Some(title_ja) = request.title_ja {
            event.title_ja = Some(title_ja);
        }
        if let Some(description) = request.description {
            event.description = description;
        }
        if let Some(description_ja) = request.description_ja {
            event.description_ja = Some(description_ja);
        }
        if let Some(location) = request.location {
            event.location = location;
        }
        if let Some(department) = request.department {
            event.department = department;
        }
        if let Some(priority) = request.priority {
            event.priority = priority;
        }
        if let Some(recurrence) = request.recurrence_pattern {
            event.recurrence = recurrence;
            event.is_recurring = recurrence.is_some();
        }

        self.repo.update(id, event).await
    }

    pub async fn delete(&self, viewer: &Viewer, id: Uuid) -> Result<()> {
        if !policy::can_manage_events(viewer.role) {
            return Err(AppError::Forbidden);
        }

        self.find(id).await?;
        self.repo.delete(id).await?;
        tracing::info!("Event {} deleted", id);
        Ok(())
    }

    /// Notify everyone who can see an event starting within the reminder
    /// window. Each event is reminded at most once.
    pub async fn send_reminders(&self, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let due = self.repo.list_due_for_reminder(now, now + self.reminder_lead).await?;
        if due.is_empty() {
            return Ok(due);
        }

        let users = self.user_repo.list().await?;
        let mut reminded = Vec::with_capacity(due.len());

        for event in due {
            let notification = NewNotification {
                title: format!("Reminder: {}", event.title),
                title_ja: Some(format!(
                    "リマインダー：{}",
                    event.title_ja.as_deref().unwrap_or(&event.title)
                )),
                message: format!("{} starts at {}", event.title, event.start_at.format("%Y-%m-%d %H:%M UTC")),
                message_ja: Some(format!(
                    "{} は {} に開始します",
                    event.title_ja.as_deref().unwrap_or(&event.title),
                    event.start_at.format("%Y-%m-%d %H:%M UTC")
                )),
                notification_type: NotificationType::Reminder,
                link: Some(format!("/events/{}", event.id)),
            };

            let batch = users
                .iter()
                .filter(|u| policy::can_view(&Viewer::from(*u), event.department))
                .map(|u| notification.for_user(u.id))
                .collect::<Vec<_>>();

            let sent = self.notification_repo.create_many(batch).await?;
            self.repo.mark_reminder_sent(event.id).await?;
            tracing::info!("Sent {} reminders for event {}", sent, event.id);

            reminded.push(Event { reminder_sent: true, ..event });
        }

        Ok(reminded)
    }

    async fn find(&self, id: Uuid) -> Result<Event> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }
}
