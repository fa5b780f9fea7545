//! Request Builder
//!
//! Turns a validated prompt into a chat-completion request. Pure: no I/O and
//! no failure modes.

use prompt_to_app_core::Prompt;
use prompt_to_app_llm::{ChatMessage, GenerationRequest, ProviderConfig, COMPLETION_TEXT_PATH};

/// Wrap the user's description in the instructions that pin the model to a
/// single self-contained `App` component.
pub fn scaffold_prompt(prompt: &Prompt) -> String {
    format!(
        r#"Convert the following UI description into valid JSX code.
Wrap the final output ONLY inside:

export default function App() {{
  return (
    /* JSX here */
  );
}}

Make sure:
- The JSX is self-contained
- All React hooks are fully defined (e.g., useState, useEffect)
- Add 'import React from "react";' if needed
- The code is meant to run inside the live preview so avoid unimported React APIs
- Output only valid code, with no explanations before or after it

Prompt: "{}""#,
        prompt.as_str()
    )
}

/// Builds `GenerationRequest`s against one provider configuration.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint: String,
    credential: String,
    model: String,
    temperature: Option<f64>,
}

impl RequestBuilder {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            credential: config.credential().to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Build the request for `prompt`.
    pub fn build(&self, prompt: &Prompt) -> GenerationRequest {
        GenerationRequest {
            endpoint: self.endpoint.clone(),
            api_key: self.credential.clone(),
            model: self.model.clone(),
            messages: vec![ChatMessage::user(scaffold_prompt(prompt))],
            temperature: self.temperature,
            extraction_path: COMPLETION_TEXT_PATH.to_string(),
        }
    }
}
