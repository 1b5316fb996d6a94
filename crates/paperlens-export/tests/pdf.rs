mod support;

use std::sync::atomic::Ordering;
use std::time::Duration;

use paperlens_core::env::RuntimeEnv;
use paperlens_export::chrome::{LaunchConfig, LOCAL_CHROME_PATH, SERVERLESS_CHROMIUM_PATH};
use paperlens_export::pdf::{PdfDeadlines, PdfRenderer};
use paperlens_export::styles::A4;
use paperlens_export::ExportError;

use support::{Fault, FakeLauncher};

fn renderer(fault: Fault) -> (PdfRenderer, std::sync::Arc<support::Counters>) {
    let (launcher, counters) = FakeLauncher::new(fault);
    let renderer = PdfRenderer::new(launcher, LaunchConfig::for_env(RuntimeEnv::Test, None));
    (renderer, counters)
}

#[tokio::test]
async fn successful_render_closes_browser_once() {
    let (renderer, counters) = renderer(Fault::None);

    let bytes = renderer.render("<html><body>hi</body></html>").await.unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(counters.launches.load(Ordering::SeqCst), 1);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
    assert_eq!(
        counters.loaded_html.lock().unwrap().as_deref(),
        Some("<html><body>hi</body></html>")
    );
}

#[tokio::test]
async fn render_uses_a4_with_twenty_pixel_margins_and_backgrounds() {
    let (renderer, counters) = renderer(Fault::None);

    renderer.render("<p>x</p>").await.unwrap();

    let layout = counters.layout.lock().unwrap().clone().unwrap();
    assert_eq!(layout.paper, A4);
    assert_eq!(layout.margin_px, 20.0);
    assert!((layout.margin_inches() - 20.0 / 96.0).abs() < 1e-9);
    assert!(layout.print_background);
}

#[tokio::test]
async fn content_load_failure_still_closes_browser() {
    let (renderer, counters) = renderer(Fault::ContentLoad);

    let err = renderer.render("<p>x</p>").await.unwrap_err();

    assert!(matches!(err, ExportError::Pdf(_)));
    assert!(err.to_string().contains("content load"));
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn render_failure_still_closes_browser() {
    let (renderer, counters) = renderer(Fault::Render);

    let err = renderer.render("<p>x</p>").await.unwrap_err();

    assert!(err.to_string().contains("render failed"));
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn content_load_deadline_still_closes_browser() {
    let (renderer, counters) = renderer(Fault::HangOnContentLoad);
    let renderer = renderer.with_deadlines(PdfDeadlines {
        launch: Duration::from_secs(1),
        content_load: Duration::from_millis(50),
        render: Duration::from_secs(1),
    });

    let err = renderer.render("<p>x</p>").await.unwrap_err();

    assert!(err.to_string().contains("timed out"));
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn launch_failure_is_reported_without_a_session() {
    let (renderer, counters) = renderer(Fault::Launch);

    let err = renderer.render("<p>x</p>").await.unwrap_err();

    assert!(err.to_string().contains("browser launch failed"));
    assert_eq!(counters.closes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn close_failure_does_not_mask_the_pdf() {
    let (renderer, counters) = renderer(Fault::Close);

    let bytes = renderer.render("<p>x</p>").await.unwrap();

    assert!(!bytes.is_empty());
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn executable_path_depends_on_environment() {
    let dev = LaunchConfig::for_env(RuntimeEnv::Development, None);
    assert_eq!(dev.executable.to_str(), Some(LOCAL_CHROME_PATH));

    let overridden = LaunchConfig::for_env(RuntimeEnv::Development, Some("/opt/chrome/chrome"));
    assert_eq!(overridden.executable.to_str(), Some("/opt/chrome/chrome"));

    let prod = LaunchConfig::for_env(RuntimeEnv::Production, Some("/opt/chrome/chrome"));
    assert_eq!(prod.executable.to_str(), Some(SERVERLESS_CHROMIUM_PATH));
    assert!(prod.args.iter().any(|a| a == "--single-process"));
    assert!(prod.args.iter().any(|a| a == "--disable-gpu"));
}

#[tokio::test]
async fn multi_megabyte_document_reaches_the_page_verbatim() {
    let (renderer, counters) = renderer(Fault::None);
    let row = "<tr><td>Attention is all you need</td><td>Transformer summary</td></tr>\n";
    let html = format!("<html><body><table>{}</table></body></html>", row.repeat(50_000));
    assert!(html.len() > 3 * 1024 * 1024);

    let bytes = renderer.render(&html).await.unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    let loaded = counters.loaded_html.lock().unwrap().clone().unwrap();
    assert_eq!(loaded.len(), html.len());
    assert!(loaded.starts_with("<html><body><table>"));
}
