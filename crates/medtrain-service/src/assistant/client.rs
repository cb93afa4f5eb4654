//! Chat-completion API client.

use std::time::Duration;

use reqwest::Client;

use super::types::{
    CardContext, ChatMessage, ChatRequest, ChatResponse, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE,
};

/// Error type for assistant calls.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The endpoint did not answer within the configured timeout.
    #[error("assistant request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status.
    #[error("assistant API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The response did not carry an answer.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AssistantClient {
    /// Create a new assistant client.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full chat-completion URL
    /// * `api_key` - Bearer key
    /// * `model` - Model name sent with every request
    /// * `timeout` - Bound on one whole request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AssistantError::Http)?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Ask a question about a card and return the answer text.
    ///
    /// # Errors
    ///
    /// - `AssistantError::Timeout` if no answer arrives in time.
    /// - `AssistantError::Api` if the endpoint returns a non-success status.
    /// - `AssistantError::MalformedResponse` if the body has no answer.
    pub async fn ask(&self, question: &str, context: &CardContext) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(context.user_prompt(question)),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.model, "Sending assistant request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssistantError::MalformedResponse("no choices returned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        let client = AssistantClient::new(
            "http://localhost:9/v1/chat/completions",
            "key",
            "test-model",
            Duration::from_secs(1),
        );
        assert!(client.is_ok());
    }
}
