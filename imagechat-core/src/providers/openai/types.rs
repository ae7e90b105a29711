//! OpenAI API types
//!
//! These types match the OpenAI API format and are used for serialization/deserialization
//! when communicating with OpenAI's servers. Only the fields imagechat reads or
//! writes are modelled.

use crate::protocol::types::{CompletionMessage, GeneratedImage};
use serde::{Deserialize, Serialize};

/// OpenAI chat completion request
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIChatRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// OpenAI chat completion response
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIChatResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

/// OpenAI response choice
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIChoice {
    #[serde(default)]
    pub index: u32,
    pub message: OpenAIResponseMessage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIResponseMessage {
    pub role: String,

    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAIChatResponse {
    /// Text of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// OpenAI image generation request
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

/// OpenAI image generation response
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIImageResponse {
    #[serde(default)]
    pub created: Option<u64>,

    #[serde(default)]
    pub data: Vec<OpenAIImageData>,
}

/// One generated image entry
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl OpenAIImageResponse {
    /// Classify the first entry; inline payload wins over URL
    pub fn first_image(&self) -> GeneratedImage {
        let Some(entry) = self.data.first() else {
            return GeneratedImage::Unrecognized;
        };

        match (&entry.b64_json, &entry.url) {
            (Some(b64), _) if !b64.is_empty() => GeneratedImage::Inline { b64: b64.clone() },
            (_, Some(url)) if !url.is_empty() => GeneratedImage::Remote { url: url.clone() },
            _ => GeneratedImage::Unrecognized,
        }
    }
}

/// OpenAI text-to-speech request
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAISpeechRequest {
    pub model: String,
    pub voice: String,
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_image_prefers_inline() {
        let response: OpenAIImageResponse = serde_json::from_value(json!({
            "created": 1,
            "data": [{"b64_json": "aGk=", "url": "https://img.example/a.png"}]
        }))
        .unwrap();
        assert_eq!(
            response.first_image(),
            GeneratedImage::Inline {
                b64: "aGk=".to_string()
            }
        );
    }

    #[test]
    fn test_first_image_url_and_unknown() {
        let response: OpenAIImageResponse = serde_json::from_value(json!({
            "data": [{"url": "https://img.example/a.png", "revised_prompt": "a cat"}]
        }))
        .unwrap();
        assert!(matches!(response.first_image(), GeneratedImage::Remote { .. }));

        let response: OpenAIImageResponse =
            serde_json::from_value(json!({"data": [{"revised_prompt": "x"}]})).unwrap();
        assert_eq!(response.first_image(), GeneratedImage::Unrecognized);

        let response: OpenAIImageResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.first_image(), GeneratedImage::Unrecognized);
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = OpenAIChatRequest {
            model: "gpt-4.1-mini".to_string(),
            messages: vec![CompletionMessage::system("s"), CompletionMessage::user("u")],
            temperature: Some(0.2),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "u");
    }
}
