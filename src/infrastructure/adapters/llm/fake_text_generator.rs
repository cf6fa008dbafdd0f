//! Fake Text Generator - 用于测试的文本生成器
//!
//! 不调用任何模型服务，按提示词返回预设文本，并记录收到的提示词

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::application::ports::{GenerationError, TextGeneratorPort};

type Responder = dyn Fn(&str) -> Result<String, GenerationError> + Send + Sync;

/// Fake Text Generator
pub struct FakeTextGenerator {
    responder: Box<Responder>,
    prompts: Mutex<Vec<String>>,
    /// 模拟模型延迟
    delay: Option<Duration>,
}

impl FakeTextGenerator {
    /// 由闭包决定每个提示词的响应
    pub fn new(
        responder: impl Fn(&str) -> Result<String, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// 始终返回同一段文本
    pub fn fixed(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// 按顺序返回预设响应，用完后返回 EmptyResponse
    pub fn scripted(responses: Vec<Result<String, GenerationError>>) -> Self {
        let queue = StdMutex::new(VecDeque::from(responses));
        Self::new(move |_| {
            queue
                .lock()
                .ok()
                .and_then(|mut q| q.pop_front())
                .unwrap_or(Err(GenerationError::EmptyResponse))
        })
    }

    /// 始终失败
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(GenerationError::Service(message.clone())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 目前为止收到的全部提示词
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextGeneratorPort for FakeTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().await.push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        tracing::debug!(prompt_len = prompt.len(), "FakeTextGenerator: returning canned response");

        let text = (self.responder)(prompt)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let fake = FakeTextGenerator::scripted(vec![
            Ok("first".to_string()),
            Err(GenerationError::Timeout),
        ]);

        assert_eq!(fake.generate("a").await.unwrap(), "first");
        assert!(matches!(fake.generate("b").await, Err(GenerationError::Timeout)));
        assert!(matches!(fake.generate("c").await, Err(GenerationError::EmptyResponse)));
        assert_eq!(fake.prompts().await, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_blank_response_is_empty() {
        let fake = FakeTextGenerator::fixed("   ");
        assert!(matches!(fake.generate("x").await, Err(GenerationError::EmptyResponse)));
    }
}
