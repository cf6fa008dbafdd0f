//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod analysis_handlers;
mod branch_handlers;
mod speech_handlers;
mod story_handlers;

pub use analysis_handlers::*;
pub use branch_handlers::*;
pub use speech_handlers::*;
pub use story_handlers::*;
