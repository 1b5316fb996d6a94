//! Shared fakes and request helpers for router tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tower::ServiceExt;

use paperlens_auth::JwtKeys;
use paperlens_core::env::RuntimeEnv;
use paperlens_core::models::conversation::Conversation;
use paperlens_core::models::user::SignInProfile;
use paperlens_export::chrome::LaunchConfig;
use paperlens_export::html::HtmlStep;
use paperlens_export::pdf::{BrowserLauncher, BrowserSession, PdfRenderer};
use paperlens_export::styles::PageLayout;
use paperlens_export::{ExportError, Exporter};
use paperlens_gemini::GeminiClient;
use paperlens_server::{build_router, AppState};
use paperlens_storage::conversations::ConversationStore;
use paperlens_storage::users::UserStore;
use paperlens_storage::{Readiness, StorageError};

pub const SECRET: &str = "test-secret";
pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const USER_ID: &str = "65f0c0ffee65f0c0ffee65f0";

pub struct FakeReadiness {
    pub healthy: bool,
    pub checks: AtomicUsize,
}

impl Readiness for FakeReadiness {
    fn ensure_ready(&self) -> BoxFuture<'_, Result<(), StorageError>> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let healthy = self.healthy;
        async move {
            if healthy {
                Ok(())
            } else {
                Err(StorageError::Connection("server selection timed out".to_string()))
            }
        }
        .boxed()
    }
}

/// Conversations keyed by id, each with an owner.
#[derive(Default)]
pub struct FakeConversations {
    pub by_id: HashMap<String, (String, Conversation)>,
}

impl FakeConversations {
    pub fn with(mut self, id: &str, owner: &str, conversation: Value) -> Self {
        let conversation = serde_json::from_value(conversation).unwrap();
        self.by_id.insert(id.to_string(), (owner.to_string(), conversation));
        self
    }
}

impl ConversationStore for FakeConversations {
    fn find_owned<'a>(
        &'a self,
        id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Conversation>, StorageError>> {
        let found = self
            .by_id
            .get(id)
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, c)| c.clone());
        async move { Ok(found) }.boxed()
    }
}

#[derive(Default)]
pub struct FakeUsers {
    pub profiles: Mutex<Vec<SignInProfile>>,
}

impl UserStore for FakeUsers {
    fn find_or_create(&self, profile: SignInProfile) -> BoxFuture<'_, Result<String, StorageError>> {
        self.profiles.lock().unwrap().push(profile);
        async move { Ok(USER_ID.to_string()) }.boxed()
    }
}

/// Browser that "prints" the loaded HTML as the PDF body.
pub struct EchoLauncher {
    pub launches: Arc<AtomicUsize>,
    pub empty: bool,
}

impl BrowserLauncher for EchoLauncher {
    fn launch<'a>(
        &'a self,
        _config: &'a LaunchConfig,
    ) -> paperlens_export::BoxFuture<'a, Result<Box<dyn BrowserSession>, ExportError>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        let empty = self.empty;
        Box::pin(async move {
            Ok(Box::new(EchoSession {
                html: String::new(),
                empty,
            }) as Box<dyn BrowserSession>)
        })
    }
}

struct EchoSession {
    html: String,
    empty: bool,
}

impl BrowserSession for EchoSession {
    fn set_content<'a>(
        &'a mut self,
        html: &'a str,
    ) -> paperlens_export::BoxFuture<'a, Result<(), ExportError>> {
        self.html = html.to_string();
        Box::pin(async { Ok(()) })
    }

    fn print_pdf<'a>(
        &'a mut self,
        _layout: &'a PageLayout,
    ) -> paperlens_export::BoxFuture<'a, Result<Vec<u8>, ExportError>> {
        let bytes = if self.empty {
            Vec::new()
        } else {
            format!("%PDF-1.7\n{}", self.html).into_bytes()
        };
        Box::pin(async move { Ok(bytes) })
    }

    fn close(self: Box<Self>) -> paperlens_export::BoxFuture<'static, Result<(), ExportError>> {
        Box::pin(async { Ok(()) })
    }
}

pub struct Harness {
    pub env: RuntimeEnv,
    pub readiness: Arc<dyn Readiness>,
    pub conversations: FakeConversations,
    pub users: Arc<FakeUsers>,
    pub launches: Arc<AtomicUsize>,
    pub empty_pdf: bool,
    pub gemini: Option<GeminiClient>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            env: RuntimeEnv::Development,
            readiness: Arc::new(FakeReadiness {
                healthy: true,
                checks: AtomicUsize::new(0),
            }),
            conversations: FakeConversations::default(),
            users: Arc::new(FakeUsers::default()),
            launches: Arc::new(AtomicUsize::new(0)),
            empty_pdf: false,
            gemini: None,
        }
    }
}

impl Harness {
    pub fn router(self) -> Router {
        let launcher = EchoLauncher {
            launches: self.launches.clone(),
            empty: self.empty_pdf,
        };
        let pdf = PdfRenderer::new(Arc::new(launcher), LaunchConfig::for_env(self.env, None));

        let state = AppState {
            env: self.env,
            readiness: self.readiness,
            conversations: Arc::new(self.conversations),
            users: self.users,
            exporter: Exporter::new(HtmlStep::new(None), pdf),
            gemini: self.gemini,
            jwt: Some(keys()),
            allowed_origins: Arc::from(vec![HeaderValue::from_static(ALLOWED_ORIGIN)]),
        };
        build_router(state)
    }
}

pub fn keys() -> JwtKeys {
    JwtKeys::from_secret(SECRET).unwrap()
}

pub fn session_cookie() -> String {
    format!("token={}", keys().issue(USER_ID).unwrap())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn raw_body(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}
