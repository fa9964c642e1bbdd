// src/types/chat.rs
//! Chat-completion wire format

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// System persona followed by the user prompt
    pub fn new(model: &'a str, system: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

// Only `choices[0].message.content` is read; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub content: String,
}

impl ChatResponse {
    pub fn into_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest::new("sonar-pro", "persona", "prompt");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "sonar-pro",
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "prompt"}
                ]
            })
        );
    }

    #[test]
    fn test_response_reads_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "abc",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ],
            "citations": []
        }))
        .unwrap();
        assert_eq!(response.into_content().as_deref(), Some("first"));
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(response.into_content().is_none());
    }
}
