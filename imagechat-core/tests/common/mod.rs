//! In-process fakes for the provider capabilities

#![allow(dead_code)]

use async_trait::async_trait;
use imagechat_core::protocol::types::{CompletionMessage, GeneratedImage};
use imagechat_core::providers::{
    ImageFetcher, ImageGeneration, ProviderError, ProviderResult, TextCompletion,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded completion call
#[derive(Debug, Clone)]
pub struct CompletionCall {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub temperature: f32,
}

/// Text completion that returns a canned result and records every call
pub struct FakeCompletion {
    result: ProviderResult<String>,
    calls: Mutex<Vec<CompletionCall>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextCompletion for FakeCompletion {
    async fn complete(
        &self,
        model: &str,
        messages: &[CompletionMessage],
        temperature: f32,
    ) -> ProviderResult<String> {
        self.calls.lock().unwrap().push(CompletionCall {
            model: model.to_string(),
            messages: messages.to_vec(),
            temperature,
        });
        self.result.clone()
    }
}

/// Image generator scripted per model; unknown models are "not found"
#[derive(Default)]
pub struct FakeImages {
    outcomes: HashMap<String, ProviderResult<GeneratedImage>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, model: &str, outcome: ProviderResult<GeneratedImage>) -> Self {
        self.outcomes.insert(model.to_string(), outcome);
        self
    }

    pub fn inline(self, model: &str, b64: &str) -> Self {
        self.with(
            model,
            Ok(GeneratedImage::Inline {
                b64: b64.to_string(),
            }),
        )
    }

    pub fn remote(self, model: &str, url: &str) -> Self {
        self.with(
            model,
            Ok(GeneratedImage::Remote {
                url: url.to_string(),
            }),
        )
    }

    pub fn failing(self, model: &str, error: ProviderError) -> Self {
        self.with(model, Err(error))
    }

    /// Models requested, in call order
    pub fn models_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(model, _, _)| model.clone())
            .collect()
    }

    /// (model, prompt, size) for every call
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGeneration for FakeImages {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        size: &str,
    ) -> ProviderResult<GeneratedImage> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string(), size.to_string()));

        self.outcomes
            .get(model)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::ModelNotFound(model.to_string())))
    }
}

/// URL fetcher serving fixed bodies
#[derive(Default)]
pub struct FakeFetcher {
    bodies: HashMap<String, ProviderResult<Vec<u8>>>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), Ok(body.to_vec()));
        self
    }

    pub fn failing(mut self, url: &str, message: &str) -> Self {
        self.bodies.insert(
            url.to_string(),
            Err(ProviderError::Fetch {
                url: url.to_string(),
                message: message.to_string(),
            }),
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> ProviderResult<Vec<u8>> {
        self.calls.lock().unwrap().push((url.to_string(), timeout));
        self.bodies.get(url).cloned().unwrap_or_else(|| {
            Err(ProviderError::Fetch {
                url: url.to_string(),
                message: "HTTP 404".to_string(),
            })
        })
    }
}
