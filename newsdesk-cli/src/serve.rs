use crate::config::AppConfig;
use crate::news_crew::build_default_crew;
use anyhow::Result;
use newsdesk_agent::Crew;
use newsdesk_server::{SecurityConfig, ServerConfig};
use std::sync::Arc;

/// Form and request-size settings for the web front end.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub port: u16,
    pub default_topic: String,
    pub max_body_size: usize,
}

pub fn server_config(crew: Crew, options: &ServeOptions) -> ServerConfig {
    ServerConfig::new(Arc::new(crew))
        .with_default_topic(options.default_topic.clone())
        .with_security(SecurityConfig { max_body_size: options.max_body_size })
}

/// Build the news crew and serve the topic form.
pub async fn run_serve(config: &AppConfig, options: &ServeOptions) -> Result<()> {
    let crew = build_default_crew(config)?;
    tracing::info!(
        port = options.port,
        model = %config.model,
        output = %config.output_file.display(),
        "Starting web front end"
    );

    newsdesk_server::serve(server_config(crew, options), options.port).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::Credentials;

    #[test]
    fn test_server_config_takes_form_settings() {
        let config = AppConfig::new(Credentials::new("g-key", "s-key"), "post.md");
        let crew = build_default_crew(&config).unwrap();
        let options = ServeOptions {
            port: 8501,
            default_topic: "robotics".to_string(),
            max_body_size: 1024,
        };

        let server = server_config(crew, &options);

        assert_eq!(server.default_topic, "robotics");
        assert_eq!(server.security.max_body_size, 1024);
        assert_eq!(server.input_name, "topic");
    }
}
