use newsdesk_agent::Crew;
use std::sync::Arc;

pub const DEFAULT_TOPIC: &str = "AI in healthcare";
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

/// Security configuration for the server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes (default: 64KB)
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { max_body_size: DEFAULT_MAX_BODY_SIZE }
    }
}

/// Configuration for the server.
#[derive(Clone)]
pub struct ServerConfig {
    /// The crew run for each submitted topic.
    pub crew: Arc<Crew>,
    /// Topic pre-filled in the form.
    pub default_topic: String,
    /// Name of the crew input the topic is bound to.
    pub input_name: String,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn new(crew: Arc<Crew>) -> Self {
        Self {
            crew,
            default_topic: DEFAULT_TOPIC.to_string(),
            input_name: "topic".to_string(),
            security: SecurityConfig::default(),
        }
    }

    pub fn with_default_topic(mut self, topic: impl Into<String>) -> Self {
        self.default_topic = topic.into();
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }
}
