use crate::{Error, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use serde::Deserialize;
use serde_json::Value;

/// A single user question, optionally tied to the condition the classifier reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub message: String,
    pub disease_context: Option<String>,
}

impl ChatPrompt {
    /// Trims both parts and rejects a blank message.
    pub fn new(message: &str, disease_context: Option<&str>) -> Result<Self> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::validation("Empty message"));
        }

        let disease_context = disease_context
            .map(str::trim)
            .filter(|context| !context.is_empty())
            .map(str::to_string);

        Ok(Self {
            message: message.to_string(),
            disease_context,
        })
    }

    pub fn user_content(&self) -> String {
        match &self.disease_context {
            Some(context) => format!(
                "The scalp image was classified as: {}.\n\nQuestion: {}",
                context, self.message
            ),
            None => self.message.clone(),
        }
    }

    pub fn to_request(
        &self,
        model: &str,
        system_prompt: Option<&str>,
    ) -> Result<CreateChatCompletionRequest> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);

        if let Some(system_prompt) = system_prompt {
            let system = ChatCompletionRequestSystemMessageArgs::default()
                .content(ChatCompletionRequestSystemMessageContent::Text(
                    system_prompt.to_string(),
                ))
                .build()?;
            messages.push(system.into());
        }

        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                self.user_content(),
            ))
            .build()?;
        messages.push(user.into());

        Ok(CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?)
    }
}

/// The relayed answer plus whatever metadata the upstream reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub model: Option<String>,
    pub created: Option<Value>,
}

/// Lenient view of an OpenAI-compatible completion body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    pub fn into_completion(self) -> Result<Completion> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| Error::transport("Upstream response contained no completion content"))?;

        Ok(Completion {
            content,
            model: self.model.filter(|model| !model.is_empty()),
            created: self.created.filter(|created| !created.is_null()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_prompt_rejects_blank_message() {
        let error = ChatPrompt::new(" \n\t ", Some("Psoriasis")).unwrap_err();

        assert_eq!(error.kind(), "ValidationError");
        assert_eq!(error.to_string(), "Empty message");
    }

    #[test]
    fn test_prompt_trims_and_drops_blank_context() {
        let prompt = ChatPrompt::new("  Is it contagious?  ", Some("   ")).unwrap();

        assert_eq!(prompt.message, "Is it contagious?");
        assert_eq!(prompt.disease_context, None);
        assert_eq!(prompt.user_content(), "Is it contagious?");
    }

    #[test]
    fn test_user_content_includes_context() {
        let prompt = ChatPrompt::new("Is it contagious?", Some("Head Lice")).unwrap();
        let content = prompt.user_content();

        assert!(content.contains("Head Lice"));
        assert!(content.ends_with("Question: Is it contagious?"));
    }

    #[test]
    fn test_request_serializes_openai_shape() {
        let prompt = ChatPrompt::new("How long does it last?", Some("Telogen Effluvium")).unwrap();
        let request = prompt
            .to_request("deepseek-chat", Some("Be concise."))
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be concise.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(
            body["messages"][1]["content"]
                .as_str()
                .unwrap()
                .contains("Telogen Effluvium")
        );
    }

    #[test]
    fn test_request_without_system_prompt_is_single_turn() {
        let prompt = ChatPrompt::new("hello", None).unwrap();
        let body = serde_json::to_value(prompt.to_request("m", None).unwrap()).unwrap();

        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_extracts_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "deepseek-chat",
            "created": 1718000000,
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();

        let completion = response.into_completion().unwrap();
        assert_eq!(completion.content, "first");
        assert_eq!(completion.model.as_deref(), Some("deepseek-chat"));
        assert_eq!(completion.created, Some(json!(1718000000)));
    }

    #[test]
    fn test_response_without_metadata() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "X"}}],
            "created": null
        }))
        .unwrap();

        let completion = response.into_completion().unwrap();
        assert_eq!(completion.model, None);
        assert_eq!(completion.created, None);
    }

    #[test]
    fn test_response_without_choices_is_transport_error() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();

        let error = response.into_completion().unwrap_err();
        assert_eq!(error.kind(), "TransportError");
    }
}
