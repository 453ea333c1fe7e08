mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header::LOCATION},
    response::Response,
};
use cms_pages::application::content::ContentError;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cms_pages::infra::http::build_router;

use common::{MemorySource, SITE_TITLE, bare_article, pricing_article, router, state};

async fn get(source: MemorySource, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    router(source)
        .oneshot(request)
        .await
        .expect("router should respond")
}

async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}

fn catalogue() -> MemorySource {
    MemorySource::with_articles(vec![pricing_article(), bare_article("faq", "FAQ")])
}

#[tokio::test]
async fn root_redirects_to_listing() {
    let response = get(catalogue(), "/").await;

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[LOCATION], "/articles");
}

#[tokio::test]
async fn listing_links_every_article() {
    let response = get(catalogue(), "/articles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(&format!("<title>{SITE_TITLE}</title>")));
    assert!(html.contains("<h2>Articles:</h2>"));
    assert!(html.contains(r#"<a href="/articles/pricing">Pricing</a>"#));
    assert!(html.contains(r#"<a href="/articles/faq">FAQ</a>"#));
}

#[tokio::test]
async fn article_page_renders_structured_text() {
    let response = get(catalogue(), "/articles/pricing").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h1>Pricing</h1>"));
    assert!(html.contains(r##"<a href="#plans-pricing"><h2 id="plans-pricing">"##));
    assert!(html.contains(r#"<div class="fake-paragraph">See <a href="/articles/faq">the FAQ</a>.</div>"#));
    assert!(html.contains("<td>✅ 24/7</td>"));
    assert!(html.contains(r#"<a class="button button-primary" href="https://example.com/signup">Sign up</a>"#));
    assert!(!html.contains("CarouselRecord"));
}

#[tokio::test]
async fn unknown_article_is_not_found_page() {
    let response = get(catalogue(), "/articles/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("Page Not Found"));
    assert!(html.contains(r#"href="/articles""#));
}

#[tokio::test]
async fn unmatched_path_falls_back_to_not_found() {
    let response = get(catalogue(), "/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dump_defaults_to_first_article() {
    let response = get(catalogue(), "/article").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h1>Test</h1>"));
    assert!(html.contains("Plans &#38; Pricing"));
    assert!(!html.contains("Plans & Pricing"));
}

#[tokio::test]
async fn dump_honours_slug_query() {
    let html = body_text(get(catalogue(), "/article?slug=faq").await).await;
    assert!(html.contains("FAQ"));
    assert!(!html.contains("Plans"));
}

#[tokio::test]
async fn dump_is_not_routed_when_disabled() {
    let request = Request::builder()
        .uri("/article?slug=pricing")
        .body(Body::empty())
        .expect("request should build");
    let response = build_router(state(catalogue()).with_dump_route(false))
        .oneshot(request)
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("Page Not Found"));
    assert!(!html.contains("Plans"));
}

#[tokio::test]
async fn health_is_no_content() {
    let response = get(catalogue(), "/_health").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let source = MemorySource::failing(|| ContentError::Status {
        status: 500,
        body: "upstream down".into(),
    });
    let response = get(source, "/articles").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let html = body_text(response).await;
    assert!(html.contains("Content service unavailable"));
    assert!(!html.contains("upstream down"));
}

#[tokio::test]
async fn upstream_timeout_is_gateway_timeout() {
    let source = MemorySource::failing(|| ContentError::Timeout);
    let response = get(source, "/articles/pricing").await;
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}
