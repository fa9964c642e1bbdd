// src/models.rs
//! Selectable chat-completion models

use serde::Serialize;

/// Identifier actually sent upstream, whatever the form selected.
pub const REQUEST_MODEL: &str = "sonar-pro";

pub const DEFAULT_MODEL: &str = "sonar-pro";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub context_length: &'static str,
}

pub const MODELS: [ModelInfo; 6] = [
    ModelInfo {
        id: "sonar-pro",
        context_length: "200k",
    },
    ModelInfo {
        id: "sonar",
        context_length: "128k",
    },
    ModelInfo {
        id: "sonar-deep-research",
        context_length: "60k",
    },
    ModelInfo {
        id: "sonar-reasoning-pro",
        context_length: "128k",
    },
    ModelInfo {
        id: "sonar-reasoning",
        context_length: "128k",
    },
    ModelInfo {
        id: "r1-1776",
        context_length: "128k",
    },
];

/// Look up a model by identifier
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|model| model.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_model() {
        assert_eq!(find_model("sonar").map(|m| m.context_length), Some("128k"));
        assert_eq!(
            find_model("sonar-deep-research").map(|m| m.context_length),
            Some("60k")
        );
        assert!(find_model("gpt-4").is_none());
    }

    #[test]
    fn test_request_model_is_in_catalog() {
        assert!(find_model(REQUEST_MODEL).is_some());
        assert_eq!(MODELS[0].id, DEFAULT_MODEL);
    }
}
