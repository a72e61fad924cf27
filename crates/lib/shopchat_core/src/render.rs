//! Plain-text rendering of log entries and product cards.

use std::fmt::Write;

use chrono::Local;

use crate::models::{ChatMessage, Product, Role};

/// Shown in place of a product image that the webhook left empty.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=300&h=300&fit=crop&crop=center";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Drop emoji from message text before display.
    pub strip_emoji: bool,
}

/// Render one log entry, including any product cards it carries.
///
/// Html bodies are printed exactly as received.
pub fn render_message(message: &ChatMessage, options: RenderOptions) -> String {
    let who = match message.role() {
        Role::User => "You",
        Role::Bot => "Bot",
    };
    let time = message.created_at().with_timezone(&Local).format("%H:%M");

    let text = if options.strip_emoji {
        strip_emojis(message.text())
    } else {
        message.text().to_string()
    };

    let mut out = format!("[{time}] {who}: {text}");
    if let Some(products) = message.products() {
        for (index, product) in products.iter().enumerate() {
            out.push('\n');
            out.push_str(&render_product(index + 1, product));
        }
    }
    out
}

/// Render one product card as an indented block.
pub fn render_product(position: usize, product: &Product) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "  {position}. {}", product.name);
    if !product.description.is_empty() {
        let _ = writeln!(out, "     {}", product.description);
    }
    let _ = writeln!(out, "     Price: {}", product.price);
    let image = if product.image_url.is_empty() {
        PLACEHOLDER_IMAGE_URL
    } else {
        product.image_url.as_str()
    };
    let _ = write!(out, "     Image: {image}");
    if product.has_detail_link() {
        let _ = write!(out, "\n     Details: {}", product.detail_url);
    }
    out
}

/// Remove pictographic emoji and trim the result.
pub fn strip_emojis(text: &str) -> String {
    text.chars()
        .filter(|c| !is_emoji(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F // emoticons
            | 0x1F300..=0x1F5FF // symbols & pictographs
            | 0x1F680..=0x1F6FF // transport & map
            | 0x1F1E0..=0x1F1FF // flags
            | 0x2600..=0x26FF // misc symbols
            | 0x2700..=0x27BF // dingbats
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product {
            name: "Laptop".into(),
            price: "$999".into(),
            image_url: "https://img/laptop.png".into(),
            detail_url: "https://shop/laptop".into(),
            description: "14 inch".into(),
        }
    }

    #[test]
    fn user_and_bot_headers() {
        let user = render_message(&ChatMessage::user("hi"), RenderOptions::default());
        assert!(user.contains("] You: hi"), "{user}");
        let bot = render_message(&ChatMessage::bot("hello"), RenderOptions::default());
        assert!(bot.contains("] Bot: hello"), "{bot}");
    }

    #[test]
    fn html_is_not_escaped() {
        let out = render_message(
            &ChatMessage::bot_html("<b>A &amp; B</b>"),
            RenderOptions::default(),
        );
        assert!(out.ends_with("<b>A &amp; B</b>"), "{out}");
    }

    #[test]
    fn product_cards_follow_text() {
        let message = ChatMessage::bot_with_products("Found:", vec![laptop(), Product::default()]);
        let out = render_message(&message, RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].ends_with("Bot: Found:"));
        assert_eq!(lines[1], "  1. Laptop");
        assert!(out.contains("     Details: https://shop/laptop"));
        assert!(out.contains("  2. "));
    }

    #[test]
    fn product_card_layout() {
        assert_eq!(
            render_product(1, &laptop()),
            "  1. Laptop\n     14 inch\n     Price: $999\n     Image: https://img/laptop.png\n     Details: https://shop/laptop"
        );
    }

    #[test]
    fn empty_image_uses_placeholder_and_no_details_line() {
        let out = render_product(2, &Product::default());
        assert!(out.contains(PLACEHOLDER_IMAGE_URL));
        assert!(!out.contains("Details:"));
    }

    #[test]
    fn strips_emoji_ranges() {
        assert_eq!(strip_emojis("Great choice! 😀🚀"), "Great choice!");
        assert_eq!(strip_emojis("☀ sunny ✨ day"), "sunny  day");
        assert_eq!(strip_emojis("no emoji"), "no emoji");
    }

    #[test]
    fn strip_emoji_option_applies_to_text() {
        let out = render_message(
            &ChatMessage::bot("Hi 👋"),
            RenderOptions { strip_emoji: true },
        );
        // 👋 (U+1F44B) is in the pictographs block.
        assert!(out.ends_with("Bot: Hi"), "{out}");
    }
}
