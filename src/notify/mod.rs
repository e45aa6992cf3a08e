//! Proposal answer notification
//!
//! The page POSTs the answer as JSON; the server turns it into an email.

#[cfg(not(target_arch = "wasm32"))]
pub mod mail;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

use serde::{Deserialize, Serialize};

use crate::sim::Answer;

/// Endpoint used when `NOTIFY_ENDPOINT` isn't set at build time
pub const DEFAULT_ENDPOINT: &str = "/valentineResponse";

/// Where the page sends answers
pub fn endpoint() -> &'static str {
    option_env!("NOTIFY_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
}

/// JSON body of the notification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Answer label ("Yes" / "No")
    pub response: String,
    /// ISO-8601 time the answer was given
    pub timestamp: String,
}

impl Notification {
    pub fn new(answer: Answer, timestamp: impl Into<String>) -> Self {
        Self {
            response: answer.label().to_string(),
            timestamp: timestamp.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
