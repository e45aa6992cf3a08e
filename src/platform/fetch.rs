//! Answer notification over `fetch`

use anyhow::{Result, anyhow, bail};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::notify::{Notification, endpoint};

async fn post(notification: &Notification) -> Result<u16> {
    let body = notification.to_json()?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&body.into());

    let request = Request::new_with_str_and_init(endpoint(), &opts)
        .map_err(|e| anyhow!("bad request: {e:?}"))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| anyhow!("bad header: {e:?}"))?;

    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow!("network error: {e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| anyhow!("fetch did not return a Response"))?;

    if !response.ok() {
        bail!("server answered {}", response.status());
    }
    Ok(response.status())
}

/// Fire and forget; the outcome is only logged
pub fn send_notification(notification: Notification) {
    wasm_bindgen_futures::spawn_local(async move {
        match post(&notification).await {
            Ok(status) => log::info!(
                "Notification sent ({}): {}",
                status,
                notification.response
            ),
            Err(e) => log::warn!("Failed to send notification: {e:#}"),
        }
    });
}
