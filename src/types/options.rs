//! Completion request options

use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// Sampling options sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.0,
            max_tokens: 512,
        }
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }
}

impl From<&Settings> for CompletionOptions {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.model.clone())
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens)
    }
}
