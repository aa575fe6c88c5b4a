// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::helpers::{listing_html, MockShop, TestContext, IMAGE_BYTES};
use pricewatch::domain::models::scrape::ScrapeStats;
use pricewatch::domain::repositories::price_cache::PriceCache;
use pricewatch::engines::traits::EngineError;
use pricewatch::utils::errors::ScrapeError;
use rust_decimal_macros::dec;

/// 端到端：新商品写入仓库，缓存中价格未变的商品不写入
#[tokio::test]
async fn test_end_to_end_store_receives_only_changed_product() {
    let shop = MockShop::start().await;
    shop.two_pages().await;
    let ctx = TestContext::new(shop.base_url()).await;
    ctx.cache.set("Scaler B", dec!(50)).await;

    let stats = ctx.service.run(None, None).await.unwrap();

    assert_eq!(stats, ScrapeStats { total: 2, updated: 1 });

    let image_path = ctx.images_dir.join("Drill A.jpg");
    let expected = format!(
        "[\n  {{\n    \"product_title\": \"Drill A\",\n    \"product_price\": 100.0,\n    \"path_to_image\": \"{}\"\n  }}\n]",
        image_path.to_string_lossy()
    );
    assert_eq!(ctx.store_content().await, expected);
    assert_eq!(tokio::fs::read(&image_path).await.unwrap(), IMAGE_BYTES);
    assert_eq!(ctx.cache.get("Drill A").await, Some(dec!(100)));
}

#[tokio::test]
async fn test_second_run_leaves_store_untouched() {
    let shop = MockShop::start().await;
    shop.two_pages().await;
    let ctx = TestContext::new(shop.base_url()).await;

    let first = ctx.service.run(None, None).await.unwrap();
    assert_eq!(first.updated, 2);
    let after_first = ctx.store_content().await;
    let modified = tokio::fs::metadata(&ctx.store_path)
        .await
        .unwrap()
        .modified()
        .unwrap();

    let second = ctx.service.run(None, None).await.unwrap();

    assert_eq!(second, ScrapeStats { total: 2, updated: 0 });
    assert_eq!(ctx.store_content().await, after_first);
    assert_eq!(
        tokio::fs::metadata(&ctx.store_path)
            .await
            .unwrap()
            .modified()
            .unwrap(),
        modified
    );
}

#[tokio::test]
async fn test_changed_price_is_rewritten() {
    let shop = MockShop::start().await;
    shop.two_pages().await;
    let ctx = TestContext::new(shop.base_url()).await;
    ctx.cache.set("Drill A", dec!(120)).await;
    ctx.cache.set("Scaler B", dec!(50.00)).await;

    let stats = ctx.service.run(None, None).await.unwrap();

    assert_eq!(stats.updated, 1);
    let stored = ctx.service.get_stored_products().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Drill A");
    assert_eq!(stored[0].price, dec!(100));
}

#[tokio::test]
async fn test_failing_page_is_skipped_and_siblings_survive() {
    let shop = MockShop::start().await;
    let index = listing_html(3, &[]);
    shop.page("/shop/", index).await;
    shop.page(
        "/shop/page/1/",
        listing_html(3, &[("Drill A", "100", "/img/a.jpg")]),
    )
    .await;
    shop.failing("/shop/page/2/", 500).await;
    shop.page(
        "/shop/page/3/",
        listing_html(3, &[("Mirror C", "1,250/-", "/img/c.jpg")]),
    )
    .await;
    shop.image("/img/a.jpg").await;
    shop.image("/img/c.jpg").await;
    let ctx = TestContext::new(shop.base_url()).await;

    let stats = ctx.service.run(None, None).await.unwrap();

    assert_eq!(stats, ScrapeStats { total: 2, updated: 2 });
    let stored = ctx.service.get_stored_products().await.unwrap();
    let titles: Vec<&str> = stored.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Drill A", "Mirror C"]);
    assert_eq!(stored[1].price, dec!(1250));
}

#[tokio::test]
async fn test_missing_image_drops_product() {
    let shop = MockShop::start().await;
    let page = listing_html(
        1,
        &[("Drill A", "100", "/img/a.jpg"), ("Ghost", "5", "/img/missing.jpg")],
    );
    shop.page("/shop/", page.clone()).await;
    shop.page("/shop/page/1/", page).await;
    shop.image("/img/a.jpg").await;
    shop.failing("/img/missing.jpg", 404).await;
    let ctx = TestContext::new(shop.base_url()).await;

    let stats = ctx.service.run(None, None).await.unwrap();

    assert_eq!(stats, ScrapeStats { total: 1, updated: 1 });
    assert!(!tokio::fs::try_exists(ctx.images_dir.join("Ghost.jpg"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_index_failure_fails_run_without_persisting() {
    let shop = MockShop::start().await;
    shop.failing("/shop/", 503).await;
    let ctx = TestContext::new(shop.base_url()).await;

    let err = ctx.service.run(None, None).await.unwrap_err();

    match err {
        ScrapeError::Fetch(EngineError::Exhausted { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(ctx.store_content().await, "[]");
}

#[tokio::test]
async fn test_invalid_proxy_fails_run() {
    let shop = MockShop::start().await;
    shop.two_pages().await;
    let ctx = TestContext::new(shop.base_url()).await;

    let err = ctx
        .service
        .run(None, Some("not a proxy url"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Fetch(EngineError::InvalidProxy(_))));
    assert!(shop.server.received_requests().await.unwrap().is_empty());
}
