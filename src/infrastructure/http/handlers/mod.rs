//! HTTP Handlers

mod analysis;
mod branch;
mod ping;
mod speech;
mod story;

pub use analysis::*;
pub use branch::*;
pub use ping::*;
pub use speech::*;
pub use story::*;
