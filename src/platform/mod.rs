//! Browser platform layer
//!
//! - `dom`: overlay panels, phrase text and canvas sizing
//! - `fetch`: the outbound answer notification

pub mod dom;
pub mod fetch;

pub use dom::DomPanels;
pub use fetch::send_notification;

/// Current time as an ISO-8601 string
pub fn iso_timestamp() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}
