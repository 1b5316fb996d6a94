//! paperlens-storage
//!
//! MongoDB access: the process-wide connection cache, conversation lookup,
//! and user find-or-create. Thin wrapper around the MongoDB driver.

pub mod cache;
pub mod conversations;
pub mod error;
pub mod mongo;
pub mod users;

pub use crate::cache::{ConnectionCache, ConnectionStatus, Connector, Readiness};
pub use crate::error::StorageError;
