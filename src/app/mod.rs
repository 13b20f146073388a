use std::sync::Arc;

use axum::Router;

/// Human-readable application name, used in logs.
pub const APP_NAME: &str = "contact-relay";

/// Shared state available to all handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub mail: Arc<dyn mail::TransportResolver>,
}

/// App routes (health, contact).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(features::health::routes())
        .merge(features::contact::routes())
}

pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod mail;
