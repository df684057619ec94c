use async_trait::async_trait;
use crate::{
    config::TeamsConfig,
    domain::DeliveryChannel,
    error::{AppError, Result},
    integrations::{Integration, IntegrationEvent},
};

const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Microsoft Graph placeholder. Nothing leaves the process; the integration
/// logs the Graph calls it would make so the fan-out can be observed.
pub struct TeamsIntegration {
    config: TeamsConfig,
}

impl TeamsIntegration {
    pub fn new(config: Option<TeamsConfig>) -> Option<Self> {
        config.and_then(|cfg| {
            if cfg.enabled {
                Some(Self { config: cfg })
            } else {
                None
            }
        })
    }

    /// Microsoft Entra ID authorization endpoint for this tenant.
    pub fn authorize_url(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/authorize",
            self.config.tenant_id
        )
    }

    async fn post_channel_message(&self, channel: &str, body: &str) -> Result<()> {
        tracing::info!(
            "Would POST {}/teams/{}/channels/{}/messages ({} chars)",
            GRAPH_BASE_URL,
            self.config.team_id,
            channel,
            body.chars().count()
        );
        Ok(())
    }

    async fn send_mail(&self, recipients: usize, subject: &str) -> Result<()> {
        tracing::info!(
            "Would POST {}/me/sendMail to {} recipients: {}",
            GRAPH_BASE_URL,
            recipients,
            subject
        );
        Ok(())
    }
}

#[async_trait]
impl Integration for TeamsIntegration {
    fn name(&self) -> &str {
        "Microsoft Teams"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    async fn health_check(&self) -> Result<()> {
        if self.config.tenant_id.is_empty() || self.config.client_id.is_empty() {
            return Err(AppError::Integration(
                "Teams tenant or client id not configured".to_string(),
            ));
        }
        if self.config.client_secret.is_empty() {
            return Err(AppError::Integration("Teams client secret not configured".to_string()));
        }
        tracing::debug!("Teams would authorize against {}", self.authorize_url());
        Ok(())
    }

    async fn handle_event(&self, event: &IntegrationEvent) -> Result<()> {
        match event {
            IntegrationEvent::AnnouncementApproved(announcement) => {
                self.post_channel_message("announcements", &announcement.title).await
            }
            IntegrationEvent::EventCreated(event) => {
                self.post_channel_message("events", &event.title).await
            }
            IntegrationEvent::NotificationDispatched(dispatch) => match dispatch.channel {
                DeliveryChannel::Teams => {
                    self.post_channel_message("notifications", &dispatch.message).await
                }
                DeliveryChannel::Email => {
                    self.send_mail(dispatch.recipients.len(), &dispatch.title).await
                }
                // Web push is not a Graph concern.
                DeliveryChannel::Push => Ok(()),
            },
            IntegrationEvent::ChannelMessagePosted(message) => {
                self.post_channel_message(&message.channel_name, &message.content).await
            }
        }
    }
}
