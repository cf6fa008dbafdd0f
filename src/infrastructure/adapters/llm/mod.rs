//! LLM Adapter - 文本生成模型客户端

mod fake_text_generator;
mod gemini_client;

pub use fake_text_generator::FakeTextGenerator;
pub use gemini_client::*;
