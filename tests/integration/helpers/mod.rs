// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pricewatch::domain::services::scraping_service::ScrapingService;
use pricewatch::engines::image_retriever::ImageRetriever;
use pricewatch::engines::listing_parser::WooCommerceParser;
use pricewatch::engines::reqwest_engine::ReqwestEngineFactory;
use pricewatch::engines::traits::FetchConfig;
use pricewatch::infrastructure::cache::memory_cache::InMemoryPriceCache;
use pricewatch::infrastructure::repositories::product_repo_impl::JsonFileProductRepository;
use pricewatch::infrastructure::services::console_notifier::ConsoleNotifier;
use pricewatch::infrastructure::storage::LocalImageStorage;
use pricewatch::utils::retry_policy::RetryPolicy;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 假图片内容
pub const IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg";

/// 生成一个WooCommerce列表页
pub fn listing_html(total_pages: u32, items: &[(&str, &str, &str)]) -> String {
    let pagination: String = (1..=total_pages)
        .map(|n| format!(r#"<li><a class="page-numbers" href="/shop/page/{n}/">{n}</a></li>"#))
        .collect();
    let cards: String = items
        .iter()
        .map(|(title, price, image)| {
            format!(
                r#"<li class="product type-product">
                    <div class="mf-product-thumbnail"><a href="/p"><img src="data:image/svg+xml" data-lazy-src="{image}" /></a></div>
                    <div class="mf-product-details">
                        <h2 class="woo-loop-product__title"><a href="/p">{title}</a></h2>
                        <div class="mf-product-price-box"><span class="price"><span class="woocommerce-Price-amount amount"><bdi><span class="woocommerce-Price-currencySymbol">₹</span>{price}</bdi></span></span></div>
                    </div>
                </li>"#
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html><html><body>
            <ul class="products columns-4">{cards}</ul>
            <nav class="woocommerce-pagination"><ul class="page-numbers">{pagination}</ul></nav>
        </body></html>"#
    )
}

/// 模拟的店铺站点
pub struct MockShop {
    pub server: MockServer,
}

impl MockShop {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/shop/", self.server.uri())
    }

    pub async fn page(&self, page_path: &str, html: String) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(html),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn failing(&self, page_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn image(&self, image_path: &str) {
        Mock::given(method("GET"))
            .and(path(image_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(IMAGE_BYTES.to_vec()),
            )
            .mount(&self.server)
            .await;
    }

    /// 两页的店铺：第1页 "Drill A" 100，第2页 "Scaler B" 50
    pub async fn two_pages(&self) {
        let page1 = listing_html(2, &[("Drill A", "100", "/img/drill-a.jpg")]);
        let page2 = listing_html(2, &[("Scaler B", "50", "/img/scaler-b.jpg")]);
        self.page("/shop/", page1.clone()).await;
        self.page("/shop/page/1/", page1).await;
        self.page("/shop/page/2/", page2).await;
        self.image("/img/drill-a.jpg").await;
        self.image("/img/scaler-b.jpg").await;
    }
}

pub fn fetch_config() -> FetchConfig {
    FetchConfig {
        retry: RetryPolicy::linear(1, Duration::from_millis(10)),
        connect_timeout: Duration::from_secs(2),
        timeout: Duration::from_secs(5),
        accept_invalid_certs: true,
        user_agent: "pricewatch-test".to_string(),
        referer: None,
    }
}

/// 基于临时目录的完整抓取服务
pub struct TestContext {
    pub service: Arc<ScrapingService>,
    pub cache: Arc<InMemoryPriceCache>,
    pub store_path: PathBuf,
    pub images_dir: PathBuf,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new(base_url: String) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("storage").join("products.json");
        let images_dir = dir.path().join("storage").join("images");

        let cache = Arc::new(InMemoryPriceCache::default());
        let store = Arc::new(JsonFileProductRepository::new(&store_path).await.unwrap());
        let service = ScrapingService::new(
            base_url,
            Arc::new(ReqwestEngineFactory::new(fetch_config())),
            Arc::new(WooCommerceParser::new().unwrap()),
            ImageRetriever::new(Arc::new(LocalImageStorage::new(&images_dir))),
            cache.clone(),
            store,
            Arc::new(ConsoleNotifier::new()),
        );

        Self {
            service: Arc::new(service),
            cache,
            store_path,
            images_dir,
            _dir: dir,
        }
    }

    pub async fn store_content(&self) -> String {
        tokio::fs::read_to_string(&self.store_path).await.unwrap()
    }
}
