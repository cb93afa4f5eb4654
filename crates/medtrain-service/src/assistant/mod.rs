//! AI training assistant.
//!
//! Questions about a card are forwarded to an OpenAI-compatible
//! chat-completion endpoint (Groq by default) with a fixed persona prompt
//! and the card's metadata in the user turn.

pub mod client;
pub mod types;

pub use client::{AssistantClient, AssistantError};
pub use types::CardContext;
