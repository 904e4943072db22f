use crate::config::ApiKey;
use crate::traits::{ChatModel, ChatRequest};
use crate::{ChatError, ChatSettings, ConversationTurn};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChatClient {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, PartialEq)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl OpenAiChatClient {
    pub fn new(base_url: impl AsRef<str>, api_key: ApiKey, settings: &ChatSettings) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat/completions", base_url.as_ref().trim_end_matches('/')),
            api_key,
            model: settings.model.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: wire_messages(request.system_instruction, request.history, request.prompt),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|error| ChatError::Request(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(ChatError::Request(format!(
                "{} returned {status}: {}",
                self.endpoint,
                details.trim()
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|error| ChatError::Request(format!("unreadable completion: {error}")))?;

        parse_reply(&parsed)
    }
}

fn wire_messages<'a>(
    system_instruction: &'a str,
    history: &'a [ConversationTurn],
    prompt: &'a str,
) -> Vec<WireMessage<'a>> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(WireMessage {
        role: "system",
        content: system_instruction,
    });
    messages.extend(history.iter().map(|turn| WireMessage {
        role: turn.role.as_str(),
        content: &turn.content,
    }));
    messages.push(WireMessage {
        role: "user",
        content: prompt,
    });
    messages
}

fn parse_reply(payload: &Value) -> Result<String, ChatError> {
    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ChatError::Request("completion response has no message content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_reply, wire_messages, OpenAiChatClient, WireMessage};
    use crate::config::ApiKey;
    use crate::{ChatError, ChatSettings, ConversationTurn};
    use serde_json::json;

    #[test]
    fn messages_are_system_history_then_prompt() {
        let history = vec![
            ConversationTurn::user("Hi"),
            ConversationTurn::assistant("Hello, how can I help?"),
        ];

        let messages = wire_messages("be precise", &history, "Explain clause 4");
        assert_eq!(
            messages,
            vec![
                WireMessage { role: "system", content: "be precise" },
                WireMessage { role: "user", content: "Hi" },
                WireMessage { role: "assistant", content: "Hello, how can I help?" },
                WireMessage { role: "user", content: "Explain clause 4" },
            ]
        );
    }

    #[test]
    fn reply_is_first_choice_content() -> Result<(), ChatError> {
        let payload = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "It is a lease." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(parse_reply(&payload)?, "It is a lease.");
        Ok(())
    }

    #[test]
    fn missing_choices_are_a_request_error() {
        let payload = json!({ "error": { "message": "rate limited" } });
        assert!(matches!(parse_reply(&payload), Err(ChatError::Request(_))));

        let payload = json!({ "choices": [] });
        assert!(matches!(parse_reply(&payload), Err(ChatError::Request(_))));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = OpenAiChatClient::new(
            "http://localhost:8080/v1/",
            ApiKey::new("sk-test"),
            &ChatSettings::default(),
        );
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
