//! Notification HTTP endpoint
//!
//! POST `{ "response": "Yes", "timestamp": "..." }` and an email goes out.
//! Anything that isn't a POST with a usable `response` is rejected before
//! the mailer is touched.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::any;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use super::mail::{Mailer, SmtpMailer, SmtpSettings, compose};
use super::{DEFAULT_ENDPOINT, Notification};

/// Longest answer label accepted
pub const MAX_RESPONSE_LEN: usize = 64;

/// Server configuration, read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub smtp: SmtpSettings,
    /// Name used in the email body
    pub player_name: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => bail!("{key} must be set"),
            }
        };

        let port = match lookup("PORT") {
            Some(p) => p.parse::<u16>().with_context(|| format!("invalid PORT {p:?}"))?,
            None => 8080,
        };

        Ok(Self {
            port,
            smtp: SmtpSettings {
                host: lookup("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                user: required("EMAIL_USER")?,
                pass: required("EMAIL_PASS")?,
                to: required("NOTIFICATION_EMAIL")?,
            },
            player_name: lookup("PLAYER_NAME").unwrap_or_else(|| "Rachel".to_string()),
        })
    }
}

/// Request failures, each with its status code
#[derive(Debug)]
pub enum NotifyError {
    MethodNotAllowed,
    BadRequest(&'static str),
    Delivery(anyhow::Error),
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        match self {
            NotifyError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
            }
            NotifyError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
            NotifyError::Delivery(err) => {
                log::error!("Error sending email: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to send notification" })),
                )
                    .into_response()
            }
        }
    }
}

/// Shared handler state
struct AppState<M> {
    mailer: Arc<M>,
    player_name: Arc<str>,
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            player_name: Arc::clone(&self.player_name),
        }
    }
}

/// Validate a request body
pub fn parse_request(body: &[u8]) -> Result<Notification, NotifyError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| NotifyError::BadRequest("Invalid JSON body"))?;

    let response = match value.get("response") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return Err(NotifyError::BadRequest("Missing response")),
    };
    if response.chars().count() > MAX_RESPONSE_LEN {
        return Err(NotifyError::BadRequest("Response too long"));
    }

    let timestamp = value
        .get("timestamp")
        .and_then(Value::as_str)
        .unwrap_or("unknown time")
        .to_string();

    Ok(Notification {
        response,
        timestamp,
    })
}

async fn handle_notification<M: Mailer>(
    State(app): State<AppState<M>>,
    method: Method,
    body: Bytes,
) -> Result<Json<Value>, NotifyError> {
    if method != Method::POST {
        return Err(NotifyError::MethodNotAllowed);
    }
    let request = parse_request(&body)?;
    log::info!(
        "Received proposal response: {} at {}",
        request.response,
        request.timestamp
    );

    let email = compose(&app.player_name, &request.response, &request.timestamp);
    app.mailer.send(email).await.map_err(NotifyError::Delivery)?;

    log::info!("Notification sent for {}", request.response);
    Ok(Json(json!({ "message": "Notification sent successfully!" })))
}

/// The endpoint, mounted at `/` and at the default client path
pub fn router<M: Mailer>(mailer: M, player_name: impl Into<String>) -> Router {
    let state = AppState {
        mailer: Arc::new(mailer),
        player_name: Arc::from(player_name.into()),
    };
    Router::new()
        .route("/", any(handle_notification::<M>))
        .route(DEFAULT_ENDPOINT, any(handle_notification::<M>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    let mailer = SmtpMailer::new(&config.smtp)?;
    let app = router(mailer, config.player_name.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    log::info!(
        "Notification endpoint listening on http://0.0.0.0:{} (relay {})",
        config.port,
        config.smtp.host
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down");
        })
        .await?;
    Ok(())
}
