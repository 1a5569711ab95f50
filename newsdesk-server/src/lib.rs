//! # newsdesk-server
//!
//! Web front end for the article generator.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | Topic form |
//! | `POST /generate` | Run the crew for a form-submitted topic, render the article |
//! | `POST /api/generate` | JSON: `{"topic"}` in, `{"article"}` or `{"error"}` out |
//! | `GET /api/health` | Liveness check |

mod config;
mod handlers;
pub mod page;

pub use config::{DEFAULT_MAX_BODY_SIZE, DEFAULT_TOPIC, SecurityConfig, ServerConfig};
pub use handlers::{AppState, ArticleResponse, TopicForm};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Build the application router.
pub fn create_app(config: ServerConfig) -> Router {
    let max_body_size = config.security.max_body_size;
    let state = AppState::new(config);

    let api_router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/generate", post(handlers::generate_api));

    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", post(handlers::generate_page))
        .nest("/api", api_router)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_size))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

/// Serve the app on `0.0.0.0:{port}` until Ctrl+C.
pub async fn serve(config: ServerConfig, port: u16) -> std::io::Result<()> {
    let app = create_app(config);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "Newsdesk server listening");
    println!("📰 Newsdesk running on http://localhost:{}", port);
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
