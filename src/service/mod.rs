pub mod user_service;
pub mod announcement_service;
pub mod event_service;
pub mod notification_service;
pub mod document_service;
pub mod ticket_service;
pub mod teams_service;
pub mod chatbot;
pub mod ai_service;
pub mod insights_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::config::Settings;
use crate::repository::*;
use crate::integrations::IntegrationManager;
use crate::auth::AuthService;
use user_service::UserService;
use announcement_service::AnnouncementService;
use event_service::EventService;
use notification_service::NotificationService;
use document_service::DocumentService;
use ticket_service::TicketService;
use teams_service::TeamsService;
use chatbot::ChatbotService;
use ai_service::AiService;
use insights_service::InsightsService;

pub struct ServiceContext {
    pub user_repo: Arc<dyn UserRepository>,
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub document_repo: Arc<dyn DocumentRepository>,
    pub ticket_repo: Arc<dyn TicketRepository>,
    pub teams_repo: Arc<dyn TeamsRepository>,
    pub integration_manager: Arc<IntegrationManager>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub announcement_service: Arc<AnnouncementService>,
    pub event_service: Arc<EventService>,
    pub notification_service: Arc<NotificationService>,
    pub document_service: Arc<DocumentService>,
    pub ticket_service: Arc<TicketService>,
    pub teams_service: Arc<TeamsService>,
    pub chatbot_service: Arc<ChatbotService>,
    pub ai_service: Arc<AiService>,
    pub insights_service: Arc<InsightsService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    /// Wire the SQLite repositories and every service on top of one pool.
    pub fn new(db_pool: SqlitePool, integration_manager: Arc<IntegrationManager>, settings: &Settings) -> Self {
        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(db_pool.clone()));
        let announcement_repo: Arc<dyn AnnouncementRepository> =
            Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));
        let event_repo: Arc<dyn EventRepository> = Arc::new(SqliteEventRepository::new(db_pool.clone()));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(SqliteNotificationRepository::new(db_pool.clone()));
        let document_repo: Arc<dyn DocumentRepository> =
            Arc::new(SqliteDocumentRepository::new(db_pool.clone()));
        let ticket_repo: Arc<dyn TicketRepository> = Arc::new(SqliteTicketRepository::new(db_pool.clone()));
        let teams_repo: Arc<dyn TeamsRepository> = Arc::new(SqliteTeamsRepository::new(db_pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            db_pool.clone(),
            user_repo.clone(),
            settings.auth.clone(),
        ));

        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let announcement_service = Arc::new(AnnouncementService::new(
            announcement_repo.clone(),
            notification_repo.clone(),
            integration_manager.clone(),
        ));
        let event_service = Arc::new(EventService::new(
            event_repo.clone(),
            user_repo.clone(),
            notification_repo.clone(),
            integration_manager.clone(),
            settings.reminders.lead_hours,
        ));
        let notification_service = Arc::new(NotificationService::new(
            notification_repo.clone(),
            user_repo.clone(),
            integration_manager.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(document_repo.clone()));
        let ticket_service = Arc::new(TicketService::new(ticket_repo.clone(), notification_repo.clone()));
        let teams_service = Arc::new(TeamsService::new(teams_repo.clone(), integration_manager.clone()));
        let chatbot_service = Arc::new(ChatbotService::new(announcement_repo.clone(), event_repo.clone()));
        let ai_service = Arc::new(AiService::new(settings.ai.simulated_delay_ms));
        let insights_service = Arc::new(InsightsService::new(
            announcement_repo.clone(),
            event_repo.clone(),
            document_repo.clone(),
            ticket_repo.clone(),
            user_repo.clone(),
        ));

        Self {
            user_repo,
            announcement_repo,
            event_repo,
            notification_repo,
            document_repo,
            ticket_repo,
            teams_repo,
            integration_manager,
            auth_service,
            user_service,
            announcement_service,
            event_service,
            notification_service,
            document_service,
            ticket_service,
            teams_service,
            chatbot_service,
            ai_service,
            insights_service,
            db_pool,
        }
    }
}
