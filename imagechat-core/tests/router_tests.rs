//! Tests for the request router
//!
//! Remote capabilities are replaced with in-process fakes so every branch of
//! the pipeline can be observed: blank input, text replies, image success with
//! and without a working description, and exhausted image fallback.

mod common;

use common::{FakeCompletion, FakeFetcher, FakeImages};
use imagechat_core::chat::{
    CompletionSettings, ConversationResponder, DescriptionGenerator, RequestRouter,
    CONVERSATION_HISTORY_LIMIT, DESCRIPTION_HISTORY_LIMIT, EMPTY_MESSAGE_REPLY,
};
use imagechat_core::config::AppConfig;
use imagechat_core::protocol::types::{ChatRequest, ChatResponse, ChatTurn, MessageRole};
use imagechat_core::providers::{ImageFallback, ProviderError};
use proptest::prelude::*;
use std::sync::Arc;

struct Harness {
    router: RequestRouter,
    completion: Arc<FakeCompletion>,
    images: Arc<FakeImages>,
}

fn harness(completion: FakeCompletion, images: FakeImages) -> Harness {
    let completion = Arc::new(completion);
    let images = Arc::new(images);
    let mut config = AppConfig::new("sk-test-1234567890");
    config.image_models = vec!["dall-e-3".to_string(), "gpt-image-1".to_string()];

    let router = RequestRouter::from_config(
        &config,
        completion.clone(),
        images.clone(),
        Arc::new(FakeFetcher::new()),
    );

    Harness {
        router,
        completion,
        images,
    }
}

fn history(n: usize) -> Vec<ChatTurn> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                ChatTurn::user(format!("turn {i}"))
            } else {
                ChatTurn::assistant(format!("turn {i}"))
            }
        })
        .collect()
}

#[tokio::test]
async fn test_blank_message_short_circuits() {
    for message in ["", "   ", "\n\t "] {
        let h = harness(
            FakeCompletion::replying("should not be used"),
            FakeImages::new().inline("dall-e-3", "eA=="),
        );

        let response = h.router.handle(ChatRequest::new(message, history(3))).await;

        assert_eq!(response, ChatResponse::text(EMPTY_MESSAGE_REPLY));
        assert_eq!(h.completion.call_count(), 0);
        assert!(h.images.models_called().is_empty());
    }
}

#[tokio::test]
async fn test_text_message_gets_reply() {
    let h = harness(
        FakeCompletion::replying("Paris."),
        FakeImages::new().inline("dall-e-3", "eA=="),
    );

    let response = h
        .router
        .handle(ChatRequest::new("  What is the capital of France?  ", vec![]))
        .await;

    assert_eq!(response, ChatResponse::text("Paris."));
    assert!(h.images.models_called().is_empty());

    let calls = h.completion.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "gpt-4.1-mini");
    assert_eq!(calls[0].temperature, 0.2);

    let last = calls[0].messages.last().unwrap();
    assert_eq!(last.role, MessageRole::User);
    assert_eq!(last.content, "What is the capital of France?");
    assert_eq!(calls[0].messages[0].role, MessageRole::System);
}

#[tokio::test]
async fn test_text_failure_degrades_to_apology() {
    let h = harness(
        FakeCompletion::failing(ProviderError::RateLimit {
            message: "slow down".to_string(),
            retry_after_secs: None,
        }),
        FakeImages::new(),
    );

    let response = h.router.handle(ChatRequest::new("hello", vec![])).await;

    match response {
        ChatResponse::TextResponse { response } => {
            assert!(response.starts_with("Sorry, chat generation failed:"));
            assert!(response.contains("slow down"));
        }
        other => panic!("Expected text response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_image_request_returns_image_and_description() {
    let h = harness(
        FakeCompletion::replying("A calm harbor at dawn."),
        FakeImages::new()
            .failing("dall-e-3", ProviderError::Authentication("403".to_string()))
            .inline("gpt-image-1", "aGFyYm9y"),
    );

    let response = h
        .router
        .handle(ChatRequest::new("image: a harbor at dawn", history(2)))
        .await;

    match response {
        ChatResponse::ImageResponse {
            encoded_image,
            description,
            model_used,
        } => {
            assert_eq!(encoded_image, "aGFyYm9y");
            assert_eq!(description, "A calm harbor at dawn.");
            assert_eq!(model_used, "gpt-image-1");
        }
        other => panic!("Expected image response, got {:?}", other),
    }

    // image generation happens before the description is requested
    assert_eq!(h.images.models_called(), vec!["dall-e-3", "gpt-image-1"]);
    let calls = h.completion.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .messages
        .last()
        .unwrap()
        .content
        .ends_with("description for this image: image: a harbor at dawn"));
}

#[tokio::test]
async fn test_image_with_failed_description_still_succeeds() {
    let h = harness(
        FakeCompletion::failing(ProviderError::Network("connection reset".to_string())),
        FakeImages::new().inline("dall-e-3", "Y2F0"),
    );

    let response = h
        .router
        .handle(ChatRequest::new("please generate a portrait of my dog", vec![]))
        .await;

    match response {
        ChatResponse::ImageResponse {
            encoded_image,
            description,
            ..
        } => {
            assert!(!encoded_image.is_empty());
            assert!(!description.is_empty());
            assert!(description.starts_with("(Could not generate description:"));
            assert!(description.contains("connection reset"));
        }
        other => panic!("Expected image response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_image_with_empty_description_uses_placeholder() {
    let h = harness(
        FakeCompletion::replying("   "),
        FakeImages::new().inline("dall-e-3", "Y2F0"),
    );

    let response = h.router.handle(ChatRequest::new("picture of a sunset", vec![])).await;

    match response {
        ChatResponse::ImageResponse { description, .. } => {
            assert!(description.starts_with("(Could not generate description:"))
        }
        other => panic!("Expected image response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_image_failure_returns_error_without_description() {
    let h = harness(
        FakeCompletion::replying("unused"),
        FakeImages::new()
            .failing("dall-e-3", ProviderError::ServiceUnavailable("down".to_string()))
            .failing("gpt-image-1", ProviderError::ModelNotFound("gpt-image-1".to_string())),
    );

    let response = h.router.handle(ChatRequest::new("draw a dragon", vec![])).await;

    match response {
        ChatResponse::ErrorResponse { message } => {
            assert!(message.contains("All image model attempts failed"));
            assert!(message.contains("gpt-image-1"));
        }
        other => panic!("Expected error response, got {:?}", other),
    }
    assert_eq!(h.completion.call_count(), 0);
}

#[tokio::test]
async fn test_responder_forwards_last_twenty_turns() {
    let h = harness(FakeCompletion::replying("ok"), FakeImages::new());

    h.router
        .handle(ChatRequest::new("and then?", history(50)))
        .await;

    let messages = &h.completion.calls()[0].messages;
    // system + 20 history turns + new message
    assert_eq!(messages.len(), CONVERSATION_HISTORY_LIMIT + 2);
    assert_eq!(messages[1].content, "turn 30");
    assert_eq!(messages[1].role, MessageRole::User);
    assert_eq!(messages[20].content, "turn 49");
    assert_eq!(messages[20].role, MessageRole::Assistant);
}

#[tokio::test]
async fn test_describer_forwards_last_six_turns() {
    let h = harness(
        FakeCompletion::replying("A fox."),
        FakeImages::new().inline("dall-e-3", "Zm94"),
    );

    h.router
        .handle(ChatRequest::new("image: a fox", history(50)))
        .await;

    let messages = &h.completion.calls()[0].messages;
    assert_eq!(messages.len(), DESCRIPTION_HISTORY_LIMIT + 2);
    assert_eq!(messages[1].content, "turn 44");
    assert_eq!(messages[6].content, "turn 49");
}

proptest! {
    #[test]
    fn prop_history_is_bounded(n in 0usize..80) {
        let turns = history(n);

        let reply = ConversationResponder::build_messages("hi", &turns);
        prop_assert_eq!(reply.len(), n.min(CONVERSATION_HISTORY_LIMIT) + 2);

        let caption = DescriptionGenerator::build_messages("a cat", &turns);
        prop_assert_eq!(caption.len(), n.min(DESCRIPTION_HISTORY_LIMIT) + 2);

        if n > 0 {
            let expected_last = format!("turn {}", n - 1);
            prop_assert_eq!(&reply[reply.len() - 2].content, &expected_last);
            prop_assert_eq!(&caption[caption.len() - 2].content, &expected_last);
        }
    }
}

#[tokio::test]
async fn test_components_can_be_wired_by_hand() {
    let completion = Arc::new(FakeCompletion::replying("hand-wired"));
    let settings = CompletionSettings::new("custom-model", 0.0);
    let images = ImageFallback::new(
        vec!["only".to_string()],
        Arc::new(FakeImages::new()),
        Arc::new(FakeFetcher::new()),
    );
    let router = RequestRouter::new(
        images,
        DescriptionGenerator::new(completion.clone(), settings.clone()),
        ConversationResponder::new(completion.clone(), settings),
    );

    let response = router.handle(ChatRequest::new("hey", vec![])).await;

    assert_eq!(response, ChatResponse::text("hand-wired"));
    assert_eq!(completion.calls()[0].model, "custom-model");
}
