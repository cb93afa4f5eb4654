//! Chat-completion wire types and prompt construction.

use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every question.
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on answer length.
pub const MAX_TOKENS: u32 = 1024;

/// Fixed system prompt for the training assistant persona.
pub const SYSTEM_PROMPT: &str = "\
You are a helpful medical device training assistant for healthcare workers in Madagascar \
district hospitals. Provide clear, practical answers about medical equipment usage, \
maintenance, and troubleshooting.

IMPORTANT LANGUAGE GUIDELINES:
- When responding in Korean, use ONLY Hangul (한글) characters
- Do NOT mix Chinese characters (漢字/한자) with Korean unless absolutely necessary for technical medical terms that have no Korean equivalent
- Use pure Korean vocabulary whenever possible
- Avoid Sino-Korean words written in Chinese characters
- Write in clear, simple Korean that healthcare workers can easily understand

When responding in other languages:
- English: Use simple, clear English
- Swahili: Use standard Swahili vocabulary
- Always prioritize clarity and practical information over complex terminology";

/// The card a question is about, as sent by the client.
///
/// Every field is optional; unknown fields are ignored so clients can send a
/// whole card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardContext {
    /// Card title.
    pub title: Option<String>,
    /// Category display name.
    pub category_name: Option<String>,
    /// Content provider.
    pub content_provider: Option<String>,
    /// Intended audience.
    pub target_audience: Option<String>,
    /// Difficulty label.
    pub difficulty_level: Option<String>,
    /// Markdown body.
    pub markdown_text: Option<String>,
}

fn or_default<'a>(value: Option<&'a String>, default: &'a str) -> &'a str {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

impl CardContext {
    /// Build the user turn: card metadata followed by the question.
    #[must_use]
    pub fn user_prompt(&self, question: &str) -> String {
        format!(
            "You are a helpful medical device training assistant.\n\
             You are answering questions about: {title}.\n\
             \n\
             Device Category: {category}\n\
             Content Provider: {provider}\n\
             Target Audience: {audience}\n\
             Difficulty Level: {difficulty}\n\
             \n\
             Additional Information:\n\
             {body}\n\
             \n\
             User Question: {question}\n\
             \n\
             Please provide a clear, concise, and helpful answer about this medical device. \
             Focus on practical, actionable information for healthcare workers in Madagascar \
             district hospitals.",
            title = or_default(self.title.as_ref(), "a medical device"),
            category = or_default(self.category_name.as_ref(), "N/A"),
            provider = or_default(self.content_provider.as_ref(), "N/A"),
            audience = or_default(self.target_audience.as_ref(), "Healthcare workers"),
            difficulty = or_default(self.difficulty_level.as_ref(), "N/A"),
            body = self.markdown_text.as_deref().unwrap_or_default(),
        )
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Answer length limit.
    pub max_tokens: u32,
}

/// Chat-completion response body (only the parts we read).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate answers.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One candidate answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The answer message.
    pub message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_uses_defaults() {
        let prompt = CardContext::default().user_prompt("How do I clean it?");
        assert!(prompt.contains("You are answering questions about: a medical device."));
        assert!(prompt.contains("Device Category: N/A"));
        assert!(prompt.contains("Target Audience: Healthcare workers"));
        assert!(prompt.contains("User Question: How do I clean it?"));
    }

    #[test]
    fn context_fields_are_interpolated() {
        let context: CardContext = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "LED Headlamp",
            "category_name": "Lighting",
            "difficulty_level": "Beginner",
            "markdown_text": "Charge nightly.",
            "view_count": 12
        }))
        .unwrap();

        let prompt = context.user_prompt("Battery life?");
        assert!(prompt.contains("about: LED Headlamp."));
        assert!(prompt.contains("Device Category: Lighting"));
        assert!(prompt.contains("Difficulty Level: Beginner"));
        assert!(prompt.contains("Additional Information:\nCharge nightly.\n"));
    }
}
