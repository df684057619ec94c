use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    domain::*,
    error::{AppError, Result},
    integrations::{IntegrationEvent, IntegrationManager},
    repository::TeamsRepository,
};

pub const DEFAULT_MESSAGE_LIMIT: usize = 10;

pub struct TeamsService {
    repo: Arc<dyn TeamsRepository>,
    integration_manager: Arc<IntegrationManager>,
}

impl TeamsService {
    pub fn new(repo: Arc<dyn TeamsRepository>, integration_manager: Arc<IntegrationManager>) -> Self {
        Self { repo, integration_manager }
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        self.repo.list_teams().await
    }

    /// Recent channel messages, newest first. `channel` matches a channel
    /// id or any part of its name, ignoring case.
    pub async fn recent_messages(&self, query: &ChannelMessageQuery) -> Result<Vec<TeamsMessage>> {
        let channel = query
            .channel
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        let limit = query.limit.unwrap_or(DEFAULT_MESSAGE_LIMIT);

        Ok(self
            .repo
            .list_messages()
            .await?
            .into_iter()
            .filter(|m| match &channel {
                Some(c) => m.channel_id.to_string() == *c || m.channel_name.to_lowercase().contains(c.as_str()),
                None => true,
            })
            .take(limit)
            .collect())
    }

    pub async fn post_message(&self, sender: &User, request: PostChannelMessageRequest) -> Result<TeamsMessage> {
        let channel = self
            .repo
            .find_channel(request.channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".to_string()))?;

        let message = TeamsMessage {
            id: Uuid::new_v4(),
            channel_id: channel.id,
            channel_name: channel.name,
            content: request.message,
            from: sender.name.clone(),
            timestamp: Utc::now(),
        };

        let stored = self.repo.create_message(message).await?;

        self.integration_manager
            .handle_event(IntegrationEvent::ChannelMessagePosted(stored.clone()))
            .await;

        Ok(stored)
    }
}
