use std::sync::Arc;

use contact_relay::app;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (silently ignore if missing)
    dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config from environment
    let config = app::config::Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    if config.smtp.host.is_none() {
        tracing::warn!("SMTP_HOST is not set, contact emails will only be logged");
    }

    // Transports are resolved per request from these settings
    let mail: Arc<dyn app::mail::TransportResolver> =
        Arc::new(app::mail::SmtpResolver::new(config.smtp.clone()));

    let addr = config.bind_addr();
    let state = app::AppState {
        config: Arc::new(config),
        mail,
    };
    let router = contact_relay::create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("{} listening on http://{}", app::APP_NAME, addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
