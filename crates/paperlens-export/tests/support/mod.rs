//! Test doubles for the browser and agent seams.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use paperlens_core::models::payload::ExportPayload;
use paperlens_export::chrome::LaunchConfig;
use paperlens_export::html::HtmlAgent;
use paperlens_export::pdf::{BrowserLauncher, BrowserSession};
use paperlens_export::styles::PageLayout;
use paperlens_export::{BoxFuture, ExportError};
use paperlens_gemini::GeminiError;

/// Where a fake browser should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    Launch,
    ContentLoad,
    HangOnContentLoad,
    Render,
    EmptyPdf,
    Close,
}

#[derive(Default)]
pub struct Counters {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub loaded_html: Mutex<Option<String>>,
    pub layout: Mutex<Option<PageLayout>>,
}

pub struct FakeLauncher {
    pub fault: Fault,
    pub counters: Arc<Counters>,
}

impl FakeLauncher {
    pub fn new(fault: Fault) -> (Arc<Self>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (
            Arc::new(Self {
                fault,
                counters: counters.clone(),
            }),
            counters,
        )
    }
}

impl BrowserLauncher for FakeLauncher {
    fn launch<'a>(
        &'a self,
        _config: &'a LaunchConfig,
    ) -> BoxFuture<'a, Result<Box<dyn BrowserSession>, ExportError>> {
        Box::pin(async move {
            self.counters.launches.fetch_add(1, Ordering::SeqCst);
            if self.fault == Fault::Launch {
                return Err(ExportError::Browser("executable not found".to_string()));
            }
            Ok(Box::new(FakeSession {
                fault: self.fault,
                counters: self.counters.clone(),
                html: String::new(),
            }) as Box<dyn BrowserSession>)
        })
    }
}

struct FakeSession {
    fault: Fault,
    counters: Arc<Counters>,
    html: String,
}

impl BrowserSession for FakeSession {
    fn set_content<'a>(&'a mut self, html: &'a str) -> BoxFuture<'a, Result<(), ExportError>> {
        Box::pin(async move {
            match self.fault {
                Fault::ContentLoad => Err(ExportError::Browser("page crashed".to_string())),
                Fault::HangOnContentLoad => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                }
                _ => {
                    self.html = html.to_string();
                    *self.counters.loaded_html.lock().unwrap() = Some(html.to_string());
                    Ok(())
                }
            }
        })
    }

    fn print_pdf<'a>(&'a mut self, layout: &'a PageLayout) -> BoxFuture<'a, Result<Vec<u8>, ExportError>> {
        Box::pin(async move {
            *self.counters.layout.lock().unwrap() = Some(layout.clone());
            match self.fault {
                Fault::Render => Err(ExportError::Browser("printToPDF failed".to_string())),
                Fault::EmptyPdf => Ok(Vec::new()),
                _ => {
                    let mut bytes = b"%PDF-1.7\n".to_vec();
                    bytes.extend_from_slice(self.html.as_bytes());
                    Ok(bytes)
                }
            }
        })
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, Result<(), ExportError>> {
        Box::pin(async move {
            self.counters.closes.fetch_add(1, Ordering::SeqCst);
            if self.fault == Fault::Close {
                return Err(ExportError::Browser("process already gone".to_string()));
            }
            Ok(())
        })
    }
}

/// How a fake HTML agent answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Html(String),
    Empty,
    Timeout,
    ApiError,
}

pub struct FakeAgent {
    pub reply: Reply,
    pub calls: AtomicUsize,
    pub last_payload: Mutex<Option<ExportPayload>>,
}

impl FakeAgent {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HtmlAgent for FakeAgent {
    fn format_html<'a>(
        &'a self,
        payload: &'a ExportPayload,
        deadline: Duration,
    ) -> BoxFuture<'a, Result<String, ExportError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.clone());
            match &self.reply {
                Reply::Html(html) => Ok(html.clone()),
                Reply::Empty => Ok("   ".to_string()),
                Reply::Timeout => Err(GeminiError::Timeout { deadline }.into()),
                Reply::ApiError => Err(GeminiError::Api {
                    status: 500,
                    body: "internal".to_string(),
                }
                .into()),
            }
        })
    }
}
