use thiserror::Error;

use paperlens_gemini::GeminiError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("HTML agent failed: {0}")]
    Agent(#[from] GeminiError),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("{0} generation produced no output")]
    EmptyOutput(&'static str),
}

impl ExportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExportError::Agent(e) if e.is_timeout())
    }
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}
