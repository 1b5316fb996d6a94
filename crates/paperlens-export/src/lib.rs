//! paperlens-export
//!
//! Conversation → HTML → PDF. The HTML step asks the model for a styled
//! page and falls back to a local Tera template; the PDF step prints that
//! page with a short-lived headless Chrome.

pub mod chrome;
pub mod error;
pub mod exporter;
pub mod html;
pub mod pdf;
pub mod render;
pub mod styles;

use std::future::Future;
use std::pin::Pin;

pub use crate::error::ExportError;
pub use crate::exporter::Exporter;

/// Boxed future used by the dyn-compatible traits in this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
