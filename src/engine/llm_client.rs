use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::engine::error::StoryError;
use crate::model::message::ChatMessage;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Seam between the turn controller and the story service, so the
/// controller can be driven by a scripted client in tests.
pub trait StoryClient {
    /// Send one completion request and return the raw completion text.
    /// Single attempt; retry policy lives with the caller.
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, StoryError>;
}

/// Blocking client for the Groq chat-completions endpoint.
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Read `GROQ_API_KEY` once at startup. Failing here means no network
    /// call is ever attempted with a missing key.
    pub fn from_env() -> Result<Self, StoryError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            StoryError::Authentication("GROQ_API_KEY environment variable not set".into())
        })?;
        if api_key.trim().is_empty() {
            return Err(StoryError::Authentication(
                "GROQ_API_KEY environment variable is empty".into(),
            ));
        }
        let mut client = Self::new(api_key);
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            client = client.with_model(model);
        }
        Ok(client)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl StoryClient for GroqClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, StoryError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.7,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| StoryError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response.text().unwrap_or_default();
            return Err(StoryError::Authentication(format!(
                "the story service rejected the API key: {message}"
            )));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(StoryError::RateLimit);
        }
        if !status.is_success() {
            return Err(StoryError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .map_err(|e| StoryError::EmptyCompletion(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| StoryError::EmptyCompletion("completion listed no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases in one test: env vars are process-global and the test
    // harness runs tests in parallel.
    #[test]
    fn from_env_requires_the_api_key() {
        std::env::remove_var("GROQ_API_KEY");
        let err = GroqClient::from_env().err().expect("missing key must fail");
        assert!(matches!(err, StoryError::Authentication(_)), "{err}");

        std::env::set_var("GROQ_API_KEY", "gsk_test");
        assert!(GroqClient::from_env().is_ok());
        std::env::remove_var("GROQ_API_KEY");
    }

    #[test]
    fn request_body_matches_the_wire_format() {
        let messages = vec![ChatMessage::system("rules"), ChatMessage::user("go")];
        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL,
            messages: &messages,
            temperature: 0.7,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "go");
    }
}
