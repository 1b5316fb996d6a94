use std::sync::Arc;

use axum::http::HeaderValue;

use paperlens_auth::JwtKeys;
use paperlens_core::env::RuntimeEnv;
use paperlens_export::chrome::{ChromeLauncher, LaunchConfig};
use paperlens_export::html::{HtmlAgent, HtmlStep};
use paperlens_export::pdf::PdfRenderer;
use paperlens_export::Exporter;
use paperlens_gemini::GeminiClient;
use paperlens_storage::conversations::{ConversationStore, MongoConversations};
use paperlens_storage::mongo::MongoCache;
use paperlens_storage::users::{MongoUsers, UserStore};
use paperlens_storage::Readiness;

use crate::config::AppConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub env: RuntimeEnv,
    pub readiness: Arc<dyn Readiness>,
    pub conversations: Arc<dyn ConversationStore>,
    pub users: Arc<dyn UserStore>,
    pub exporter: Exporter,
    pub gemini: Option<GeminiClient>,
    /// `None` when `JWT_SECRET` is unset; authenticated routes then fail.
    pub jwt: Option<JwtKeys>,
    pub allowed_origins: Arc<[HeaderValue]>,
}

impl AppState {
    /// Production wiring: MongoDB behind `cache`, Gemini when a key is
    /// configured, and a local headless Chrome for PDFs.
    pub fn from_config(config: &AppConfig, cache: Arc<MongoCache>) -> eyre::Result<Self> {
        let gemini = GeminiClient::from_optional_key(config.gemini_api_key.as_deref())?;
        let agent = gemini
            .clone()
            .map(|client| Arc::new(client) as Arc<dyn HtmlAgent>);

        let pdf = PdfRenderer::new(
            Arc::new(ChromeLauncher),
            LaunchConfig::for_env(config.env, config.chrome_executable.as_deref()),
        );

        let jwt = config
            .jwt_secret
            .as_deref()
            .map(JwtKeys::from_secret)
            .transpose()?;

        Ok(Self {
            env: config.env,
            readiness: cache.clone(),
            conversations: Arc::new(MongoConversations::new(cache.clone())),
            users: Arc::new(MongoUsers::new(cache)),
            exporter: Exporter::new(HtmlStep::new(agent), pdf),
            gemini,
            jwt,
            allowed_origins: config.allowed_origins().into(),
        })
    }
}
