use tracing::info;

use paperlens_core::models::conversation::Conversation;

use crate::error::ExportError;
use crate::html::HtmlStep;
use crate::pdf::PdfRenderer;

/// HTML step followed by PDF step.
#[derive(Clone)]
pub struct Exporter {
    html: HtmlStep,
    pdf: PdfRenderer,
}

impl Exporter {
    pub fn new(html: HtmlStep, pdf: PdfRenderer) -> Self {
        Self { html, pdf }
    }

    /// Render a conversation to PDF bytes.
    ///
    /// An empty document from either step is an error of its own, distinct
    /// from a step failing outright. Nothing partial is ever returned.
    pub async fn export(&self, conversation: &Conversation) -> Result<Vec<u8>, ExportError> {
        info!("generating HTML");
        let html = self.html.generate(conversation).await?;
        if html.trim().is_empty() {
            return Err(ExportError::EmptyOutput("HTML"));
        }

        info!(bytes = html.len(), "generating PDF");
        let pdf = self.pdf.render(&html).await?;
        if pdf.is_empty() {
            return Err(ExportError::EmptyOutput("PDF"));
        }

        Ok(pdf)
    }
}
