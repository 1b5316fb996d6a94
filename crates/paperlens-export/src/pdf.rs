//! HTML → PDF through a headless browser.
//!
//! One browser per call, never pooled: launch, load the page, print, and
//! close. [`PdfRenderer::render`] owns the deadlines and the teardown, so
//! every [`BrowserLauncher`] gets the same guarantees.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::chrome::LaunchConfig;
use crate::error::ExportError;
use crate::styles::PageLayout;
use crate::BoxFuture;

/// Starts browser processes.
pub trait BrowserLauncher: Send + Sync {
    fn launch<'a>(
        &'a self,
        config: &'a LaunchConfig,
    ) -> BoxFuture<'a, Result<Box<dyn BrowserSession>, ExportError>>;
}

/// A running browser with one page open.
pub trait BrowserSession: Send {
    /// Replace the page content with `html`. Resolves once the document is
    /// parsed; sub-resources are not awaited.
    fn set_content<'a>(&'a mut self, html: &'a str) -> BoxFuture<'a, Result<(), ExportError>>;

    fn print_pdf<'a>(&'a mut self, layout: &'a PageLayout) -> BoxFuture<'a, Result<Vec<u8>, ExportError>>;

    /// Terminate the browser process.
    fn close(self: Box<Self>) -> BoxFuture<'static, Result<(), ExportError>>;
}

/// Per-stage deadlines.
#[derive(Debug, Clone, Copy)]
pub struct PdfDeadlines {
    pub launch: Duration,
    pub content_load: Duration,
    pub render: Duration,
}

impl Default for PdfDeadlines {
    fn default() -> Self {
        Self {
            launch: Duration::from_secs(30),
            content_load: Duration::from_secs(20),
            render: Duration::from_secs(25),
        }
    }
}

#[derive(Clone)]
pub struct PdfRenderer {
    launcher: Arc<dyn BrowserLauncher>,
    launch: LaunchConfig,
    layout: PageLayout,
    deadlines: PdfDeadlines,
}

impl PdfRenderer {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, launch: LaunchConfig) -> Self {
        Self {
            launcher,
            launch,
            layout: PageLayout::default(),
            deadlines: PdfDeadlines::default(),
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_deadlines(mut self, deadlines: PdfDeadlines) -> Self {
        self.deadlines = deadlines;
        self
    }

    pub fn launch_config(&self) -> &LaunchConfig {
        &self.launch
    }

    /// Print `html` to PDF bytes.
    ///
    /// Once the browser is up it is closed on every path; a failure to
    /// close is logged and does not mask the render outcome.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        info!(
            executable = %self.launch.executable.display(),
            "launching browser"
        );

        let mut session = within(self.deadlines.launch, self.launcher.launch(&self.launch))
            .await
            .map_err(|e| stage_failure("browser launch", e))?;

        let outcome = self.print(session.as_mut(), html).await;

        match session.close().await {
            Ok(()) => debug!("browser closed"),
            Err(e) => error!(error = %e, "failed to close browser"),
        }

        let bytes = outcome?;
        info!(bytes = bytes.len(), "PDF generated");
        Ok(bytes)
    }

    async fn print(&self, session: &mut dyn BrowserSession, html: &str) -> Result<Vec<u8>, ExportError> {
        within(self.deadlines.content_load, session.set_content(html))
            .await
            .map_err(|e| stage_failure("content load", e))?;

        debug!("page content loaded");

        within(self.deadlines.render, session.print_pdf(&self.layout))
            .await
            .map_err(|e| stage_failure("render", e))
    }
}

async fn within<T>(
    deadline: Duration,
    fut: impl Future<Output = Result<T, ExportError>>,
) -> Result<T, ExportError> {
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| ExportError::Browser(format!("timed out after {deadline:?}")))?
}

fn stage_failure(stage: &str, err: ExportError) -> ExportError {
    ExportError::Pdf(format!("{stage} failed: {err}"))
}
