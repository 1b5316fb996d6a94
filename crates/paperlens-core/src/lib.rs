//! paperlens-core
//!
//! Pure domain types shared by every paperlens crate: conversations, paper
//! bundles, paper metadata, the export payload, and collection names.
//! No database or HTTP dependency lives here.

pub mod collections;
pub mod env;
pub mod error;
pub mod lenient;
pub mod models;
