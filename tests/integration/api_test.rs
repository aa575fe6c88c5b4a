// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use super::helpers::{MockShop, TestContext};
use pricewatch::presentation::middleware::auth_middleware::AuthState;
use pricewatch::presentation::routes;

const TOKEN: &str = "integration-token";

fn token_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-token"),
        HeaderValue::from_static(TOKEN),
    )
}

fn server(ctx: &TestContext) -> TestServer {
    TestServer::new(routes::routes(ctx.service.clone(), AuthState::new(TOKEN))).unwrap()
}

#[tokio::test]
async fn test_health_check_is_public() {
    let shop = MockShop::start().await;
    let ctx = TestContext::new(shop.base_url()).await;

    let response = server(&ctx).get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "healthy", "service": "pricewatch" })
    );
}

#[tokio::test]
async fn test_scrape_requires_token() {
    let shop = MockShop::start().await;
    let ctx = TestContext::new(shop.base_url()).await;
    let server = server(&ctx);

    let missing = server.post("/scrape").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.json::<Value>(),
        json!({ "detail": "Invalid API token" })
    );

    let wrong = server
        .post("/scrape")
        .add_header(
            HeaderName::from_static("x-token"),
            HeaderValue::from_static("wrong"),
        )
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

    let products = server.get("/products").await;
    assert_eq!(products.status_code(), StatusCode::UNAUTHORIZED);
    assert!(shop.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scrape_then_list_products() {
    let shop = MockShop::start().await;
    shop.two_pages().await;
    let ctx = TestContext::new(shop.base_url()).await;
    let server = server(&ctx);
    let (name, value) = token_header();

    let response = server
        .post("/scrape")
        .add_query_param("page_limit", 2)
        .add_header(name.clone(), value.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "success",
            "message": "Scraping completed successfully",
            "stats": { "total": 2, "updated": 2 }
        })
    );

    let listed = server.get("/products").add_header(name, value).await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    let body = listed.json::<Value>();
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 2);
    assert_eq!(body["products"][0]["product_title"], "Drill A");
    assert_eq!(body["products"][0]["product_price"], 100.0);
    assert_eq!(body["products"][1]["product_title"], "Scaler B");
}

#[tokio::test]
async fn test_page_limit_zero_is_rejected() {
    let shop = MockShop::start().await;
    let ctx = TestContext::new(shop.base_url()).await;
    let (name, value) = token_header();

    let response = server(&ctx)
        .post("/scrape")
        .add_query_param("page_limit", 0)
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(shop.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_run_returns_detail() {
    let shop = MockShop::start().await;
    shop.failing("/shop/", 500).await;
    let ctx = TestContext::new(shop.base_url()).await;
    let (name, value) = token_header();

    let response = server(&ctx)
        .post("/scrape")
        .add_header(name, value)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = response.json::<Value>()["detail"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(detail.starts_with("Failed to fetch"));
}
