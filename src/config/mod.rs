use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub integrations: IntegrationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Load the demo directory and content on startup.
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_duration_hours: i64,
    #[serde(default)]
    pub secure_cookies: bool,
    /// Account used by the mock sign-in when no email is given.
    pub demo_user_email: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Artificial latency for the placeholder generation endpoints.
    pub simulated_delay_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { simulated_delay_ms: 1000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReminderConfig {
    pub lead_hours: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { lead_hours: 24 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IntegrationConfig {
    pub teams: Option<TeamsConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamsConfig {
    pub enabled: bool,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub team_id: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("database.url", "sqlite::memory:")?
            .set_default("database.max_connections", 10)?
            .set_default("database.seed_demo_data", true)?
            .set_default("auth.session_duration_hours", 24)?
            .set_default("auth.secure_cookies", false)?
            .set_default("auth.demo_user_email", "john.smith@company.com")?
            .set_default("ai.simulated_delay_ms", 1000)?
            .set_default("reminders.lead_hours", 24)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with ATRIUM prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("ATRIUM").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 10,
                seed_demo_data: true,
            },
            auth: AuthConfig {
                session_duration_hours: 24,
                secure_cookies: false,
                demo_user_email: "john.smith@company.com".to_string(),
            },
            ai: AiConfig::default(),
            reminders: ReminderConfig::default(),
            integrations: IntegrationConfig { teams: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_is_in_memory() {
        let settings = Settings::default();
        assert!(settings.database.is_in_memory());
        assert!(settings.database.seed_demo_data);
        assert_eq!(settings.reminders.lead_hours, 24);
    }

    #[test]
    fn test_file_database_is_not_in_memory() {
        let db = DatabaseConfig {
            url: "sqlite://atrium.db".to_string(),
            max_connections: 5,
            seed_demo_data: false,
        };
        assert!(!db.is_in_memory());
    }
}
