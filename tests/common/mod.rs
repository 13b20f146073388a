#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::body::Body;
use contact_relay::{
    app::{
        config::Config,
        mail::{resolve_transport, Delivery, MailError, MailTransport, TransportResolver},
        AppState,
    },
    create_router,
};
use http_body_util::BodyExt;
use lettre::Message;
use tower::ServiceExt;

/// How the fake SMTP server behaves.
#[derive(Debug, Clone, Copy)]
pub enum Smtp {
    Healthy,
    VerifyFails,
    SendFails,
}

struct FakeSmtp {
    mode: Smtp,
    sends: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl MailTransport for FakeSmtp {
    fn name(&self) -> &'static str {
        "fake-smtp"
    }

    async fn verify(&self) -> Result<(), MailError> {
        match self.mode {
            Smtp::VerifyFails => Err(MailError::Smtp("535 authentication failed".to_string())),
            _ => Ok(()),
        }
    }

    async fn send(&self, _message: Message) -> Result<Delivery, MailError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Smtp::SendFails => Err(MailError::Smtp("421 service not available".to_string())),
            _ => Ok(Delivery::Queued("250 queued as ABC123".to_string())),
        }
    }
}

/// Resolver that counts how often it is asked for a transport.
pub struct CountingResolver {
    mode: Smtp,
    pub resolves: AtomicUsize,
    pub sends: Arc<AtomicUsize>,
}

impl CountingResolver {
    pub fn new(mode: Smtp) -> Arc<Self> {
        Arc::new(Self {
            mode,
            resolves: AtomicUsize::new(0),
            sends: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn resolves(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TransportResolver for CountingResolver {
    async fn resolve(&self) -> Result<Box<dyn MailTransport>, MailError> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        let primary = FakeSmtp {
            mode: self.mode,
            sends: self.sends.clone(),
        };
        Ok(resolve_transport(Box::new(primary)).await)
    }
}

pub fn test_router(resolver: Arc<CountingResolver>) -> axum::Router {
    test_router_with_config(resolver, Config::for_tests())
}

pub fn test_router_with_config(resolver: Arc<CountingResolver>, config: Config) -> axum::Router {
    let state = AppState {
        config: Arc::new(config),
        mail: resolver,
    };
    create_router(state)
}

pub fn valid_json() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Sara",
        "lastName": "Ali",
        "email": "sara@example.com",
        "phone": "0500000000",
        "projectType": "landing",
        "message": "Hello",
    })
}

pub fn contact_form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn post_json(app: axum::Router, body: &serde_json::Value) -> (http::StatusCode, serde_json::Value) {
    let request = http::Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: axum::Router, body: String) -> (http::StatusCode, serde_json::Value) {
    let request = http::Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: axum::Router, request: http::Request<Body>) -> (http::StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
