mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use common::{json_body, send, Harness, ALLOWED_ORIGIN};

#[tokio::test]
async fn preflight_from_allowed_origin_allows_credentials() {
    let app = Harness::default().router();

    let response = send(
        &app,
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/summarize")
            .header(header::ORIGIN, ALLOWED_ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn simple_request_from_allowed_origin_is_echoed() {
    let app = Harness::default().router();

    let response = send(
        &app,
        Request::get("/health")
            .header(header::ORIGIN, ALLOWED_ORIGIN)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn disallowed_origin_is_forbidden() {
    let app = Harness::default().router();

    let response = send(
        &app,
        Request::get("/health")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let body = json_body(response).await;
    assert_eq!(body["type"], "CorsError");
}
