use reqwest::Client;

use crate::{
    Res, config,
    session::TextGenerator,
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
    utils,
};

pub struct OpenAiGenerator {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Builds a generator from `OPENAI_API_URL`, `OPENAI_API_KEY` and
    /// `OPENAI_MODEL`.
    ///
    /// # Errors
    ///
    /// Fails if no API key is configured.
    pub fn from_config() -> Res<Self> {
        Ok(Self::new(
            config::openai_apiurl(),
            config::openai_api_key()?,
            config::openai_model(),
        ))
    }

    async fn create_completion(&self, prompt: &str) -> Res<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!(
                "{uri}/chat/completions",
                uri = self.api_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let res = response.json::<ChatCompletionResponse>().await?;
        completion_text(res)
    }
}

/// Content of the first choice. A response without choices or with a null
/// message content is an error.
pub fn completion_text(response: ChatCompletionResponse) -> Res<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| "completion response contained no message".into())
}

impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, prompt: &str) -> Res<String> {
        let pb = utils::spinner("Thinking of a recommendation...");
        let result = self.create_completion(prompt).await;
        pb.finish_and_clear();
        result
    }
}
