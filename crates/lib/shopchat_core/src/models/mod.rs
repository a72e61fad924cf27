//! Value types shared across the chat pipeline.

pub mod message;
pub mod product;

pub use message::{ChatMessage, Role, TextFormat};
pub use product::Product;
