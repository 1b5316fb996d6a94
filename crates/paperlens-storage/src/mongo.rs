use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::debug;

use paperlens_core::collections::DEFAULT_DATABASE;

use crate::cache::{ConnectionCache, Connector};
use crate::error::StorageError;

/// Small pool and a short server-selection window; the process may be a
/// single serverless instance.
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_POOL_SIZE: u32 = 1;

const APP_NAME: &str = "paperlens";

/// The cache type the server holds for the process lifetime.
pub type MongoCache = ConnectionCache<MongoConnector>;

/// Connects with the `MONGOO_DB_URL` connection string and pings.
#[derive(Clone)]
pub struct MongoConnector {
    uri: String,
}

impl std::fmt::Debug for MongoConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URI usually embeds credentials.
        f.debug_struct("MongoConnector").finish_non_exhaustive()
    }
}

impl MongoConnector {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl Connector for MongoConnector {
    type Handle = Database;

    fn connect(&self) -> BoxFuture<'static, Result<Database, StorageError>> {
        let uri = self.uri.clone();
        async move {
            let mut options = ClientOptions::parse(&uri).await?;
            options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
            options.max_pool_size = Some(MAX_POOL_SIZE);
            if options.app_name.is_none() {
                options.app_name = Some(APP_NAME.to_string());
            }

            let client = Client::with_options(options)?;
            let database = client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

            database.run_command(doc! { "ping": 1 }).await?;
            debug!(database = database.name(), "ping ok");
            Ok(database)
        }
        .boxed()
    }
}
