//! In-process gateway for tests: records prompts and answers from a closure.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{GatewayError, LlmGateway};

type Responder = Box<dyn Fn(&str) -> Result<String, GatewayError> + Send + Sync>;

pub struct StubGateway {
    responder: Responder,
    prompts: Mutex<Vec<String>>,
}

impl StubGateway {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, GatewayError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn canned(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fails with an API error.
    pub fn failing() -> Self {
        Self::new(|_| {
            Err(GatewayError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt)
    }
}
