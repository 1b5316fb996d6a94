use serde::Serialize;
use tera::{Context, Tera};

use paperlens_core::models::payload::ExportPayload;

use crate::error::ExportError;

/// The `.html` suffix turns on Tera's autoescaping.
const FALLBACK_NAME: &str = "fallback.html";

const FALLBACK_TEMPLATE: &str = include_str!("../templates/fallback.html");

#[derive(Serialize)]
struct FallbackView<'a> {
    query: &'a str,
    answer: &'a str,
    papers: &'a [String],
    summary: &'a str,
    validity: &'static str,
    validation: Vec<ValidationEntry>,
}

#[derive(Serialize)]
struct ValidationEntry {
    key: String,
    value: String,
}

/// Render the deterministic, model-free HTML page for a conversation.
pub fn render_fallback(payload: &ExportPayload) -> Result<String, ExportError> {
    let validity = match payload.validation.is_valid() {
        Some(true) => "valid",
        Some(false) => "invalid",
        None => "unknown",
    };

    let view = FallbackView {
        query: &payload.query,
        answer: &payload.answer,
        papers: &payload.papers,
        summary: payload.summary.trim(),
        validity,
        validation: payload
            .validation
            .display_entries()
            .into_iter()
            .map(|(key, value)| ValidationEntry { key, value })
            .collect(),
    };

    render_template(FALLBACK_NAME, FALLBACK_TEMPLATE, &view)
}

/// Render a raw Tera template against any serializable context.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    data: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context =
        Context::from_serialize(data).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
