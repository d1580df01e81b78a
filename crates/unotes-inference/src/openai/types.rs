//! OpenAI API request and response types.

use serde::{Deserialize, Serialize};
use unotes_core::{ImageDetail, Message, MessageContent, ModelInvocation, Role};

// =============================================================================
// CHAT COMPLETION TYPES
// =============================================================================

/// Request body for chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub stream: bool,
}

/// A single outbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: ChatContent,
}

/// Message content: a plain string, or an array of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One typed content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference inside a content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

impl From<&MessageContent> for ChatContent {
    fn from(content: &MessageContent) -> Self {
        match content {
            MessageContent::Text(text) => ChatContent::Text(text.clone()),
            MessageContent::Composite { text, image } => ChatContent::Parts(vec![
                ContentPart::Text { text: text.clone() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.url.clone(),
                        detail: Some(image.detail),
                    },
                },
            ]),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: ChatContent::from(&message.content),
        }
    }
}

impl From<&ModelInvocation> for ChatCompletionRequest {
    /// System instructions go first as their own message.
    fn from(invocation: &ModelInvocation) -> Self {
        let mut messages = Vec::with_capacity(invocation.messages.len() + 1);
        if !invocation.system.is_empty() {
            messages.push(ChatMessage {
                role: Role::System.as_str().to_string(),
                content: ChatContent::Text(invocation.system.clone()),
            });
        }
        messages.extend(invocation.messages.iter().map(ChatMessage::from));

        Self {
            model: invocation.model.clone(),
            messages,
            temperature: Some(invocation.params.temperature),
            max_tokens: Some(invocation.params.max_tokens),
            stream: false,
        }
    }
}

/// Response from chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

/// Single chat completion choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: usize,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

/// Assistant message in a completion. `content` is null on refusals.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

/// Token usage for chat completion request.
#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error response from OpenAI API.
#[derive(Debug, Deserialize)]
pub struct OpenAIErrorResponse {
    pub error: OpenAIError,
}

/// Detailed error information.
#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub message: String,
    /// Null on some OpenRouter responses.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use unotes_core::{GenerationParams, ImageRef, ModelVariant};

    fn invocation(messages: Vec<Message>) -> ModelInvocation {
        ModelInvocation {
            system: "You are helpful.".into(),
            messages,
            variant: ModelVariant::Vision,
            model: "gpt-4-vision-preview".into(),
            params: GenerationParams {
                max_tokens: 1500,
                temperature: 0.7,
            },
        }
    }

    #[test]
    fn test_text_message_serializes_as_string() {
        let request =
            ChatCompletionRequest::from(&invocation(vec![Message::user_text("Hello")]));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4-vision-preview");
        assert_eq!(json["max_tokens"], 1500);
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are helpful.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Hello");
    }

    #[test]
    fn test_composite_message_serializes_as_parts() {
        let msg = Message::user_with_image("Explain", ImageRef::high("https://x/slide.png"));
        let request = ChatCompletionRequest::from(&invocation(vec![msg]));
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "Explain");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "https://x/slide.png");
        assert_eq!(parts[1]["image_url"]["detail"], "high");
    }

    #[test]
    fn test_empty_system_is_omitted() {
        let mut inv = invocation(vec![Message::user_text("Hi")]);
        inv.system.clear();
        let request = ChatCompletionRequest::from(&inv);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
    }

    #[test]
    fn test_temperature_is_sent() {
        let request = ChatCompletionRequest::from(&invocation(vec![Message::user_text("Hi")]));
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"temperature\":0.7"));
    }

    #[test]
    fn test_chat_completion_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.choices[0].message.content.as_deref(), Some("Hello!"));
        assert_eq!(response.choices[0].finish_reason, Some("stop".to_string()));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_null_content_deserializes() {
        let json = r#"{
            "id": "x",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}, "finish_reason": "content_filter"}]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
        assert!(response.usage.is_none());
    }

    #[test]
    fn test_openai_error_with_null_type() {
        let json = r#"{"error": {"message": "Provider returned error", "type": null, "code": null}}"#;
        let response: OpenAIErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "Provider returned error");
        assert!(response.error.error_type.is_none());
        assert!(response.error.code.is_none());
    }

    #[test]
    fn test_openai_error_response_deserialization() {
        let json = r#"{
            "error": {
                "message": "Invalid API key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        }"#;

        let response: OpenAIErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "Invalid API key");
        assert_eq!(
            response.error.error_type.as_deref(),
            Some("invalid_request_error")
        );
        assert_eq!(response.error.code, Some("invalid_api_key".to_string()));
    }
}
