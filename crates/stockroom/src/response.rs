// File: src/response.rs
// Purpose: HTMX-aware HTML responses - fragments with toasts, client events, and OOB swaps

use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use maud::{html, Markup};
use serde_json::{Map, Value as JsonValue};

/// Client-side event that hides the product modal
pub const CLOSE_MODAL_EVENT: &str = "closeModal";

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) {
    if let (Ok(name), Ok(val)) = (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        headers.insert(name, val);
    }
}

/// Build the HX-Trigger payload: `{"showToast":{"message":..},"closeModal":true,..}`
fn trigger_header(toast: Option<&str>, events: &[String]) -> Option<HeaderValue> {
    if toast.is_none() && events.is_empty() {
        return None;
    }

    let mut payload = Map::new();
    if let Some(message) = toast {
        payload.insert("showToast".to_string(), serde_json::json!({ "message": message }));
    }
    for event in events {
        payload.insert(event.clone(), JsonValue::Bool(true));
    }

    HeaderValue::from_str(&JsonValue::Object(payload).to_string()).ok()
}

// ============================================================================
// Fragment
// ============================================================================

/// Successful HTML fragment with optional toast, client events, and out-of-band swaps.
///
/// ```ignore
/// Fragment::new(rows).oob("stats", cards).toast("Saved").close_modal()
/// ```
#[derive(Debug)]
pub struct Fragment {
    content: Markup,
    headers: HeaderMap,
    toast_message: Option<String>,
    events: Vec<String>,
    oob_updates: Vec<(String, Markup)>,
    status: StatusCode,
}

impl Fragment {
    pub fn new(content: Markup) -> Self {
        Self {
            content,
            headers: HeaderMap::new(),
            toast_message: None,
            events: Vec::new(),
            oob_updates: Vec::new(),
            status: StatusCode::OK,
        }
    }

    /// An empty body, e.g. to clear the modal container
    pub fn empty() -> Self {
        Self::new(html! {})
    }

    /// Add a toast notification via HX-Trigger header.
    pub fn toast(mut self, message: impl Into<String>) -> Self {
        self.toast_message = Some(message.into());
        self
    }

    /// Fire a named client event via HX-Trigger.
    pub fn trigger(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }

    pub fn close_modal(self) -> Self {
        self.trigger(CLOSE_MODAL_EVENT)
    }

    /// Replace the element with id `target` out of band.
    pub fn oob(mut self, target: impl Into<String>, content: Markup) -> Self {
        self.oob_updates.push((target.into(), content));
        self
    }

    /// Override where HTMX swaps the main body.
    pub fn retarget(self, selector: &str) -> Self {
        self.header("HX-Retarget", selector)
    }

    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        insert_header(&mut self.headers, key.as_ref(), value.as_ref());
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Render the body, including OOB swaps, without building a response
    pub fn body(&self) -> String {
        let oob = html! {
            @for (target, content) in &self.oob_updates {
                div id=(target) hx-swap-oob="true" { (content) }
            }
        };
        format!("{}{}", self.content.0, oob.0)
    }
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        let body = self.body();
        let mut headers = self.headers;
        if let Some(value) = trigger_header(self.toast_message.as_deref(), &self.events) {
            headers.insert("HX-Trigger", value);
        }
        (self.status, headers, Html(body)).into_response()
    }
}

// ============================================================================
// Failure
// ============================================================================

/// Error response rendered as an escaped message block
#[derive(Debug)]
pub struct Failure {
    message: String,
    status: StatusCode,
}

impl Failure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = html! {
            div class="error" role="alert" { (self.message) }
        };
        (self.status, Html(body.into_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger(resp: &Response) -> JsonValue {
        let raw = resp.headers().get("hx-trigger").unwrap().to_str().unwrap();
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_plain_fragment_has_no_trigger() {
        let resp = Fragment::new(html! { p { "rows" } }).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key("hx-trigger"));
    }

    #[test]
    fn test_toast_and_close_modal_share_one_header() {
        let resp = Fragment::empty()
            .toast(r#"Saved "Desk Lamp""#)
            .close_modal()
            .into_response();
        let payload = trigger(&resp);
        assert_eq!(payload["showToast"]["message"], r#"Saved "Desk Lamp""#);
        assert_eq!(payload[CLOSE_MODAL_EVENT], true);
    }

    #[test]
    fn test_oob_is_appended_with_swap_attr() {
        let fragment = Fragment::new(html! { tr { "row" } }).oob("stats", html! { span { "42" } });
        let body = fragment.body();
        assert!(body.starts_with("<tr>row</tr>"));
        assert!(body.contains(r#"<div id="stats" hx-swap-oob="true"><span>42</span></div>"#));
    }

    #[test]
    fn test_retarget_and_status() {
        let resp = Fragment::empty()
            .retarget("#modal")
            .status(StatusCode::UNPROCESSABLE_ENTITY)
            .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(resp.headers().get("hx-retarget").unwrap(), "#modal");
    }

    #[test]
    fn test_failure_not_found_status() {
        let resp = Failure::not_found("<b>gone</b>").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
