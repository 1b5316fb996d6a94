//! Headless Chrome implementation of the browser seam.
//!
//! `headless_chrome` is blocking, so every call runs on the blocking pool.
//! Dropping the `Browser` kills the process.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};

use paperlens_core::env::RuntimeEnv;

use crate::error::ExportError;
use crate::pdf::{BrowserLauncher, BrowserSession};
use crate::styles::PageLayout;
use crate::BoxFuture;

/// Default Chrome location on a developer Linux box.
pub const LOCAL_CHROME_PATH: &str = "/usr/bin/google-chrome";

/// Where the serverless Chromium build is unpacked at runtime.
pub const SERVERLESS_CHROMIUM_PATH: &str = "/tmp/chromium";

/// Flags for constrained runtimes: one process, no zygote, no GPU, no
/// sandbox, and no reliance on a large /dev/shm.
pub const SERVERLESS_ARGS: &[&str] = &[
    "--single-process",
    "--no-zygote",
    "--disable-setuid-sandbox",
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--no-first-run",
    "--hide-scrollbars",
    "--mute-audio",
    "--font-render-hinting=none",
];

/// How to start the browser.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub executable: PathBuf,
    pub args: Vec<String>,
    /// Per-call timeout applied inside the browser driver.
    pub page_timeout: Duration,
    /// The driver shuts the browser down after this long without traffic.
    pub idle_timeout: Duration,
}

impl LaunchConfig {
    /// Outside production use `CHROME_EXECUTABLE_PATH` or the local Chrome;
    /// in production use the bundled serverless Chromium.
    pub fn for_env(env: RuntimeEnv, executable_override: Option<&str>) -> Self {
        let executable = if env.is_production() {
            PathBuf::from(SERVERLESS_CHROMIUM_PATH)
        } else {
            executable_override
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(LOCAL_CHROME_PATH))
        };

        Self {
            executable,
            args: SERVERLESS_ARGS.iter().map(|a| a.to_string()).collect(),
            page_timeout: Duration::from_secs(25),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

/// Launches a fresh headless Chrome per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeLauncher;

impl BrowserLauncher for ChromeLauncher {
    fn launch<'a>(
        &'a self,
        config: &'a LaunchConfig,
    ) -> BoxFuture<'a, Result<Box<dyn BrowserSession>, ExportError>> {
        let config = config.clone();
        Box::pin(async move {
            let session = run_blocking(move || {
                let args: Vec<&OsStr> = config.args.iter().map(OsStr::new).collect();
                let options = LaunchOptions::default_builder()
                    .path(Some(config.executable.clone()))
                    .headless(true)
                    .sandbox(false)
                    .enable_gpu(false)
                    .args(args)
                    .idle_browser_timeout(config.idle_timeout)
                    .build()
                    .map_err(|e| format!("invalid launch options: {e}"))?;

                let browser = Browser::new(options).map_err(|e| format!("{e:#}"))?;
                let tab = browser.new_tab().map_err(|e| format!("{e:#}"))?;
                tab.set_default_timeout(config.page_timeout);

                Ok(ChromeSession { browser, tab })
            })
            .await?;

            Ok(Box::new(session) as Box<dyn BrowserSession>)
        })
    }
}

pub struct ChromeSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession for ChromeSession {
    fn set_content<'a>(&'a mut self, html: &'a str) -> BoxFuture<'a, Result<(), ExportError>> {
        let tab = Arc::clone(&self.tab);
        let html = html.to_string();
        Box::pin(async move {
            run_blocking(move || {
                // Returns once the markup is parsed; sub-resources load in the background.
                let tree = tab
                    .call_method(Page::GetFrameTree(None))
                    .map_err(|e| format!("frame tree: {e:#}"))?;
                tab.call_method(Page::SetDocumentContent {
                    frame_id: tree.frame_tree.frame.id,
                    html,
                })
                .map_err(|e| format!("{e:#}"))?;
                Ok(())
            })
            .await
        })
    }

    fn print_pdf<'a>(&'a mut self, layout: &'a PageLayout) -> BoxFuture<'a, Result<Vec<u8>, ExportError>> {
        let tab = Arc::clone(&self.tab);
        let options = print_options(layout);
        Box::pin(async move {
            run_blocking(move || tab.print_to_pdf(Some(options)).map_err(|e| format!("{e:#}"))).await
        })
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, Result<(), ExportError>> {
        let ChromeSession { browser, tab } = *self;
        Box::pin(async move {
            run_blocking(move || {
                let closed = tab
                    .close(false)
                    .map(|_| ())
                    .map_err(|e| format!("tab close: {e:#}"));
                drop(tab);
                drop(browser);
                closed
            })
            .await
        })
    }
}

/// Portrait pages of `layout.paper` with uniform margins. CSS `@page`
/// sizes are ignored.
pub fn print_options(layout: &PageLayout) -> PrintToPdfOptions {
    let margin = layout.margin_inches();
    PrintToPdfOptions {
        landscape: Some(false),
        print_background: Some(layout.print_background),
        paper_width: Some(layout.paper.width_in),
        paper_height: Some(layout.paper.height_in),
        margin_top: Some(margin),
        margin_bottom: Some(margin),
        margin_left: Some(margin),
        margin_right: Some(margin),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ExportError>
where
    F: FnOnce() -> Result<T, String> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ExportError::Browser(format!("browser task failed: {e}")))?
        .map_err(ExportError::Browser)
}
