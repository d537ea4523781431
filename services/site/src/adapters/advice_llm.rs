//! services/site/src/adapters/advice_llm.rs
//!
//! This module contains the adapter for the travel-advice LLM.
//! It implements the `AdviceService` port from the `core` crate against Gemini's
//! OpenAI-compatible chat-completions endpoint.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use najm_core::{
    domain::Language,
    ports::{AdviceService, PortError, PortResult},
};
use tracing::debug;

const SYSTEM_INSTRUCTIONS: &str = r#"You are the AI assistant for "Najm Company", a premium tourism agency in Kyrgyzstan.
Your primary goal is to assist guests from Arabic countries (GCC region mostly).
Kyrgyzstan is very friendly to Muslims, so emphasize:
1. Halal food availability (it's everywhere).
2. Prayer facilities (Masjids and prayer rooms).
3. Family-oriented activities (privacy, spacious nature).
4. Cooler weather compared to the Middle East.

Always respond in {language}.
Be polite, welcoming, and professional.
Focus on Kyrgyzstan destinations like Issyk-Kul, Bishkek, Ala-Archa, and Karakol."#;

/// The persona and scope instruction, pinned to the visitor's language.
pub fn system_instructions(language: Language) -> String {
    SYSTEM_INSTRUCTIONS.replace("{language}", language.display_name())
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AdviceService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct GeminiAdviceAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiAdviceAdapter {
    /// Creates a new `GeminiAdviceAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `AdviceService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AdviceService for GeminiAdviceAdapter {
    /// Answers a visitor's travel question in the requested language.
    async fn get_travel_advice(&self, prompt: &str, language: Language) -> PortResult<String> {
        debug!("Advice request ({}): {}", language, prompt);

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_instructions(language))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.7)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unavailable(e.to_string()))?;

        // An empty answer is passed through; the chat session substitutes its own reply.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_pin_reply_language() {
        let ar = system_instructions(Language::Ar);
        assert!(ar.contains("Always respond in Arabic."));
        assert!(ar.contains("Halal food"));
        assert!(system_instructions(Language::En).contains("Always respond in English."));
        assert!(!ar.contains("{language}"));
    }
}
