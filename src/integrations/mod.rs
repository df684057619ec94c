use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::domain::{Announcement, Event, NotificationDispatch, TeamsMessage};
use crate::error::Result;

pub mod teams;

#[derive(Debug, Clone)]
pub enum IntegrationEvent {
    AnnouncementApproved(Announcement),
    EventCreated(Event),
    NotificationDispatched(NotificationDispatch),
    ChannelMessagePosted(TeamsMessage),
}

impl IntegrationEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            IntegrationEvent::AnnouncementApproved(_) => "announcement_approved",
            IntegrationEvent::EventCreated(_) => "event_created",
            IntegrationEvent::NotificationDispatched(_) => "notification_dispatched",
            IntegrationEvent::ChannelMessagePosted(_) => "channel_message_posted",
        }
    }
}

#[async_trait]
pub trait Integration: Send + Sync {
    fn name(&self) -> &str;
    fn is_enabled(&self) -> bool;
    async fn health_check(&self) -> Result<()>;
    async fn handle_event(&self, event: &IntegrationEvent) -> Result<()>;
}

pub struct IntegrationManager {
    integrations: RwLock<Vec<Arc<dyn Integration>>>,
}

impl Default for IntegrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationManager {
    pub fn new() -> Self {
        Self {
            integrations: RwLock::new(Vec::new()),
        }
    }

    pub async fn register(&self, integration: Arc<dyn Integration>) {
        if integration.is_enabled() {
            tracing::info!("Registered integration: {}", integration.name());
            self.integrations.write().await.push(integration);
        }
    }

    pub async fn registered(&self) -> Vec<String> {
        self.integrations
            .read()
            .await
            .iter()
            .map(|i| i.name().to_string())
            .collect()
    }

    /// Deliver an event to every enabled integration. A failing integration
    /// is logged and does not stop delivery to the others.
    pub async fn handle_event(&self, event: IntegrationEvent) {
        let integrations = self.integrations.read().await;

        for integration in integrations.iter() {
            if !integration.is_enabled() {
                continue;
            }

            match integration.handle_event(&event).await {
                Ok(_) => {
                    tracing::debug!(
                        "Integration {} handled {} successfully",
                        integration.name(),
                        event.kind()
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Integration {} failed to handle {}: {:?}",
                        integration.name(),
                        event.kind(),
                        e
                    );
                }
            }
        }
    }

    pub async fn health_check_all(&self) -> Vec<(String, Result<()>)> {
        let integrations = self.integrations.read().await;
        let mut results = Vec::new();

        for integration in integrations.iter() {
            let name = integration.name().to_string();
            let result = integration.health_check().await;
            results.push((name, result));
        }

        results
    }
}
