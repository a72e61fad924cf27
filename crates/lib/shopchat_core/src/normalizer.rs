//! Reply normalization.
//!
//! The webhook has no fixed response schema. [`classify`] maps whatever it
//! returns onto [`Reply`], checking shapes in a fixed order where the first
//! match wins:
//!
//! 1. `products` array → [`Reply::Products`]
//! 2. `html`, then `data` string → [`Reply::Html`]
//! 3. `message`, then `output` string → [`Reply::Message`]
//! 4. the payload itself is a string → [`Reply::Message`]
//! 5. anything else → [`Reply::Fallback`]
//!
//! Relay failures become [`Reply::Error`] in [`normalize`].

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::models::Product;
use crate::relay::{RawReply, RelayError};

pub const PRODUCTS_DEFAULT_TEXT: &str = "Here are some products I found for you:";
pub const FALLBACK_TEXT: &str = "I received your message. How can I help you further?";
pub const CONNECTION_ERROR_TEXT: &str = "Unable to connect to the server. Please try again later.";
pub const CONNECTION_APOLOGY_TEXT: &str =
    "I'm having trouble connecting right now. Please check your connection and try again.";

/// A webhook reply in one of the recognized display shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Reply {
    Products {
        message: String,
        products: Vec<Product>,
    },
    Html {
        html: String,
    },
    Message {
        message: String,
    },
    Fallback {
        message: String,
    },
    Error {
        /// Shown in a transient notification.
        error: String,
        /// Shown in the message log.
        message: String,
    },
}

impl Reply {
    pub fn fallback() -> Self {
        Reply::Fallback {
            message: FALLBACK_TEXT.to_string(),
        }
    }

    pub fn connection_error() -> Self {
        Reply::Error {
            error: CONNECTION_ERROR_TEXT.to_string(),
            message: CONNECTION_APOLOGY_TEXT.to_string(),
        }
    }

    /// Text that goes into the message log.
    pub fn display_text(&self) -> &str {
        match self {
            Reply::Products { message, .. }
            | Reply::Message { message }
            | Reply::Fallback { message }
            | Reply::Error { message, .. } => message,
            Reply::Html { html } => html,
        }
    }

    pub fn products(&self) -> Option<&[Product]> {
        match self {
            Reply::Products { products, .. } => Some(products.as_slice()),
            _ => None,
        }
    }

    /// Notification text for failed round trips.
    pub fn error(&self) -> Option<&str> {
        match self {
            Reply::Error { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}

/// Classify a decoded JSON payload.
pub fn classify(payload: &Value) -> Reply {
    if let Some(items) = payload.get("products").and_then(Value::as_array) {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(PRODUCTS_DEFAULT_TEXT);
        return Reply::Products {
            message: message.to_string(),
            products: items.iter().map(Product::from_value).collect(),
        };
    }

    if let Some(html) = string_field(payload, &["html", "data"]) {
        return Reply::Html { html };
    }

    if let Some(message) = string_field(payload, &["message", "output"]) {
        return Reply::Message { message };
    }

    if let Some(message) = payload.as_str() {
        return Reply::Message {
            message: message.to_string(),
        };
    }

    Reply::fallback()
}

/// Turn the outcome of one relay call into a displayable reply.
pub fn normalize(outcome: Result<RawReply, RelayError>) -> Reply {
    match outcome {
        Ok(RawReply::Json(value)) => classify(&value),
        Ok(RawReply::Text(text)) if text.trim().is_empty() => Reply::fallback(),
        Ok(RawReply::Text(text)) => Reply::Message { message: text },
        Err(e) => {
            warn!("Error sending message to webhook: {e}");
            Reply::connection_error()
        }
    }
}

/// First of `keys` whose value is a JSON string.
fn string_field(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_array_keeps_length_and_order() {
        let reply = classify(&json!({
            "message": "Top picks",
            "products": [
                { "name": "A", "price": "1", "image": "a.png", "detailLink": "https://a" },
                { "name": "B", "price": "2", "image": "b.png", "details": "https://b" },
                { "name": "C", "price": "3", "image": "c.png" }
            ]
        }));
        let products = reply.products().expect("products");
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "A");
        assert_eq!(products[0].detail_url, "https://a");
        assert_eq!(products[1].detail_url, "https://b");
        assert_eq!(products[2].detail_url, "");
        assert_eq!(products[2].description, "");
        assert_eq!(reply.display_text(), "Top picks");
    }

    #[test]
    fn product_list_without_message_uses_default_text() {
        let reply = classify(&json!({ "products": [{ "name": "A" }] }));
        assert_eq!(reply.display_text(), PRODUCTS_DEFAULT_TEXT);

        let reply = classify(&json!({ "message": "", "products": [] }));
        assert_eq!(reply.display_text(), PRODUCTS_DEFAULT_TEXT);
        assert_eq!(reply.products().map(<[_]>::len), Some(0));
    }

    #[test]
    fn products_take_priority_over_html_and_message() {
        let reply = classify(&json!({
            "html": "<p>ignored</p>",
            "output": "ignored",
            "products": [{ "name": "A" }]
        }));
        assert!(matches!(reply, Reply::Products { .. }));
    }

    #[test]
    fn products_that_are_not_an_array_are_ignored() {
        let reply = classify(&json!({ "products": "none", "message": "nothing found" }));
        assert_eq!(
            reply,
            Reply::Message {
                message: "nothing found".into()
            }
        );
    }

    #[test]
    fn html_is_kept_verbatim() {
        let html = "<div style=\"margin-bottom: 20px\"><h3>A &amp; B</h3></div>";
        let reply = classify(&json!({ "html": html }));
        assert_eq!(reply, Reply::Html { html: html.into() });
        assert_eq!(reply.display_text(), html);
    }

    #[test]
    fn data_string_is_html() {
        let reply = classify(&json!({ "data": "<p>hi</p>", "message": "later" }));
        assert_eq!(
            reply,
            Reply::Html {
                html: "<p>hi</p>".into()
            }
        );
    }

    #[test]
    fn html_wins_over_data() {
        let reply = classify(&json!({ "data": "<i>d</i>", "html": "<b>h</b>" }));
        assert_eq!(reply.display_text(), "<b>h</b>");
    }

    #[test]
    fn plain_message() {
        let reply = classify(&json!({ "message": "hi" }));
        assert_eq!(
            reply,
            Reply::Message {
                message: "hi".into()
            }
        );
        assert!(reply.products().is_none());
    }

    #[test]
    fn message_wins_over_output() {
        let reply = classify(&json!({ "output": "second", "message": "first" }));
        assert_eq!(reply.display_text(), "first");
    }

    #[test]
    fn output_used_when_message_missing() {
        let reply = classify(&json!({ "output": "from agent" }));
        assert_eq!(reply.display_text(), "from agent");
    }

    #[test]
    fn non_string_message_falls_through() {
        let reply = classify(&json!({ "message": 42, "output": "text" }));
        assert_eq!(reply.display_text(), "text");
    }

    #[test]
    fn bare_string_payload() {
        let reply = classify(&json!("hello there"));
        assert_eq!(
            reply,
            Reply::Message {
                message: "hello there".into()
            }
        );
    }

    #[test]
    fn unknown_shapes_fall_back() {
        for payload in [
            json!({}),
            json!({ "status": "ok" }),
            json!([1, 2]),
            json!(7),
            json!(null),
        ] {
            assert_eq!(classify(&payload), Reply::fallback(), "payload: {payload}");
        }
    }

    #[test]
    fn normalize_text_body() {
        let reply = normalize(Ok(RawReply::Text("plain words".into())));
        assert_eq!(reply.display_text(), "plain words");
    }

    #[test]
    fn normalize_blank_text_body_falls_back() {
        assert_eq!(normalize(Ok(RawReply::Text("  \n".into()))), Reply::fallback());
    }

    #[test]
    fn normalize_error_uses_fixed_texts() {
        let reply = normalize(Err(RelayError::EmptyMessage));
        assert!(reply.is_error());
        assert_eq!(reply.display_text(), CONNECTION_APOLOGY_TEXT);
        assert_eq!(reply.error(), Some(CONNECTION_ERROR_TEXT));
        assert_ne!(reply.error(), Some(reply.display_text()));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let v = serde_json::to_value(classify(&json!({ "message": "hi" }))).expect("serialize");
        assert_eq!(v, json!({ "kind": "message", "message": "hi" }));

        let v = serde_json::to_value(Reply::connection_error()).expect("serialize");
        assert_eq!(v["kind"], "error");
        assert_eq!(v["error"], CONNECTION_ERROR_TEXT);
    }
}
