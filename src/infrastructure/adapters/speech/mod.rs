//! Speech Adapter - 语音转写客户端

mod http_transcriber;

pub use http_transcriber::*;
