//! Request routing: classify, dispatch, shape the response

use super::describe::DescriptionGenerator;
use super::respond::ConversationResponder;
use super::CompletionSettings;
use crate::config::AppConfig;
use crate::http::HttpClient;
use crate::intent::{Intent, IntentClassifier};
use crate::protocol::types::{ChatRequest, ChatResponse, ImageResult};
use crate::providers::adapter::{ImageFetcher, ImageGeneration, TextCompletion};
use crate::providers::error::ProviderResult;
use crate::providers::fallback::ImageFallback;
use crate::providers::openai::OpenAIProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Reply sent for a blank message
pub const EMPTY_MESSAGE_REPLY: &str = "Please send a message.";

/// Orchestrates one chat request end to end
///
/// Holds no mutable state; one instance is shared by all concurrent requests.
#[derive(Clone)]
pub struct RequestRouter {
    classifier: IntentClassifier,
    images: ImageFallback,
    describer: DescriptionGenerator,
    responder: ConversationResponder,
}

impl RequestRouter {
    pub fn new(
        images: ImageFallback,
        describer: DescriptionGenerator,
        responder: ConversationResponder,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            images,
            describer,
            responder,
        }
    }

    /// Wire every component from configuration and the given capabilities
    pub fn from_config(
        config: &AppConfig,
        completion: Arc<dyn TextCompletion>,
        generator: Arc<dyn ImageGeneration>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        let settings = CompletionSettings::from_config(config);
        let images = ImageFallback::new(config.image_models.clone(), generator, fetcher)
            .with_size(config.image_size.clone())
            .with_fetch_timeout(Duration::from_secs(config.fetch_timeout_secs));

        Self::new(
            images,
            DescriptionGenerator::new(completion.clone(), settings.clone()),
            ConversationResponder::new(completion, settings),
        )
    }

    /// Wire the router against the OpenAI API
    pub fn openai(config: &AppConfig) -> ProviderResult<Self> {
        let provider = Arc::new(OpenAIProvider::from_config(config)?);
        let fetcher: Arc<HttpClient> = Arc::new(provider.http_client().clone());

        Ok(Self::from_config(config, provider.clone(), provider, fetcher))
    }

    /// Handle one chat request
    pub async fn handle(&self, request: ChatRequest) -> ChatResponse {
        let message = request.message.trim();
        if message.is_empty() {
            return ChatResponse::text(EMPTY_MESSAGE_REPLY);
        }

        let intent = self.classifier.classify(message);
        info!(
            intent = ?intent,
            history = request.history.len(),
            "Routing chat request"
        );

        match intent {
            Intent::Image => match self.images.generate_image(message).await {
                ImageResult::Failure { error } => ChatResponse::error(error),
                ImageResult::Success {
                    encoded_image,
                    model_used,
                } => {
                    let description = self.describer.describe(message, &request.history).await;
                    ChatResponse::ImageResponse {
                        encoded_image,
                        description,
                        model_used,
                    }
                }
            },
            Intent::Text => {
                ChatResponse::text(self.responder.respond(message, &request.history).await)
            }
        }
    }
}
