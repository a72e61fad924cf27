//! Product entries attached to bot replies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One product card. Identity is its position in the owning message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "detailLink")]
    pub detail_url: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Build a product from one element of a webhook `products` array.
    ///
    /// Missing or null fields become empty strings. The detail link is read
    /// from `detailLink`, then `details`.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: text_field(value, "name"),
            price: text_field(value, "price"),
            image_url: text_field(value, "image"),
            detail_url: first_non_empty(value, &["detailLink", "details"]),
            description: text_field(value, "description"),
        }
    }

    pub fn has_detail_link(&self) -> bool {
        !self.detail_url.is_empty()
    }
}

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        // Numbers and booleans keep their JSON spelling ("1200", "true").
        Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string(),
        Some(_) => String::new(),
    }
}

fn first_non_empty(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text_field(value, key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_value_reads_all_fields() {
        let p = Product::from_value(&json!({
            "name": "Laptop",
            "price": "$999",
            "image": "https://img/laptop.png",
            "detailLink": "https://shop/laptop",
            "description": "14 inch"
        }));
        assert_eq!(p.name, "Laptop");
        assert_eq!(p.price, "$999");
        assert_eq!(p.image_url, "https://img/laptop.png");
        assert_eq!(p.detail_url, "https://shop/laptop");
        assert_eq!(p.description, "14 inch");
    }

    #[test]
    fn detail_link_falls_back_to_details() {
        let p = Product::from_value(&json!({ "name": "Mouse", "details": "https://shop/mouse" }));
        assert_eq!(p.detail_url, "https://shop/mouse");
    }

    #[test]
    fn empty_detail_link_falls_through_to_details() {
        let p = Product::from_value(&json!({ "detailLink": "", "details": "https://shop/x" }));
        assert_eq!(p.detail_url, "https://shop/x");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let p = Product::from_value(&json!({}));
        assert_eq!(p, Product::default());
        assert!(!p.has_detail_link());
    }

    #[test]
    fn numeric_price_keeps_json_text() {
        let p = Product::from_value(&json!({ "name": "Cable", "price": 12.5 }));
        assert_eq!(p.price, "12.5");
    }

    #[test]
    fn serializes_with_webhook_field_names() {
        let p = Product {
            name: "Phone".into(),
            price: "100".into(),
            image_url: "i".into(),
            detail_url: "d".into(),
            description: String::new(),
        };
        let v = serde_json::to_value(&p).expect("serialize");
        assert_eq!(v["image"], "i");
        assert_eq!(v["detailLink"], "d");
    }
}
