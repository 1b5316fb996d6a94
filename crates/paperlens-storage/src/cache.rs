//! Process-wide database connection state.
//!
//! One connection per process, created on first use. Callers that arrive
//! while a connect is in flight await the same attempt; a failed attempt
//! leaves the cache empty so the next caller starts over.

use std::sync::{Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

use crate::error::StorageError;

/// Opens a connection and verifies it is usable.
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    fn connect(&self) -> BoxFuture<'static, Result<Self::Handle, StorageError>>;
}

/// Something the request pipeline can wait on before touching the database.
pub trait Readiness: Send + Sync {
    fn ensure_ready(&self) -> BoxFuture<'_, Result<(), StorageError>>;
}

/// Observable cache state, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Uninitialized,
    Connecting,
    Ready,
}

// Errors are flattened to strings so the shared output is `Clone`.
type SharedConnect<H> = Shared<BoxFuture<'static, Result<H, String>>>;

enum CacheState<H> {
    Uninitialized,
    Connecting(SharedConnect<H>),
    Ready(H),
}

pub struct ConnectionCache<K: Connector> {
    connector: K,
    state: Mutex<CacheState<K::Handle>>,
}

impl<K: Connector> ConnectionCache<K> {
    pub fn new(connector: K) -> Self {
        Self {
            connector,
            state: Mutex::new(CacheState::Uninitialized),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        match &*self.lock() {
            CacheState::Uninitialized => ConnectionStatus::Uninitialized,
            CacheState::Connecting(_) => ConnectionStatus::Connecting,
            CacheState::Ready(_) => ConnectionStatus::Ready,
        }
    }

    /// Return the cached handle, joining or starting a connect as needed.
    pub async fn get(&self) -> Result<K::Handle, StorageError> {
        let attempt = {
            let mut state = self.lock();
            match &*state {
                CacheState::Ready(handle) => {
                    debug!("using cached database connection");
                    return Ok(handle.clone());
                }
                CacheState::Connecting(pending) => {
                    debug!("waiting for pending database connection");
                    pending.clone()
                }
                CacheState::Uninitialized => {
                    info!("connecting to database");
                    let connect = self.connector.connect();
                    let pending = async move { connect.await.map_err(|e| e.to_string()) }
                        .boxed()
                        .shared();
                    *state = CacheState::Connecting(pending.clone());
                    pending
                }
            }
        };

        let outcome = attempt.clone().await;

        let mut state = self.lock();
        let owns_state = matches!(&*state, CacheState::Connecting(p) if p.ptr_eq(&attempt));
        match outcome {
            Ok(handle) => {
                if owns_state {
                    info!("database connected");
                    *state = CacheState::Ready(handle.clone());
                }
                Ok(handle)
            }
            Err(message) => {
                if owns_state {
                    warn!(error = %message, "database connection failed");
                    *state = CacheState::Uninitialized;
                }
                Err(StorageError::Connection(message))
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState<K::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Connector> Readiness for ConnectionCache<K> {
    fn ensure_ready(&self) -> BoxFuture<'_, Result<(), StorageError>> {
        async move { self.get().await.map(|_| ()) }.boxed()
    }
}
