//! paperlens-gemini
//!
//! Gemini `generateContent` invocation, typed response decoding, and the
//! two prompt-driven steps built on it: paper summarization and HTML
//! formatting.

pub mod client;
pub mod error;
pub mod html;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod summary;

pub use crate::client::GeminiClient;
pub use crate::error::GeminiError;
