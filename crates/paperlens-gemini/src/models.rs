//! Model identifiers used by each step.
//!
//! Summaries favour the cheaper model; HTML formatting needs the stronger
//! instruction follower to produce valid standalone markup.

/// Model used to summarize search results.
pub const SUMMARY_MODEL: &str = "gemini-2.0-flash";

/// Model used to turn a conversation into a styled HTML page.
pub const HTML_MODEL: &str = "gemini-2.5-flash";
