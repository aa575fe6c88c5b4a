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

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pricewatch::config::settings::Settings;
use pricewatch::domain::repositories::price_cache::PriceCache;
use pricewatch::domain::services::scraping_service::ScrapingService;
use pricewatch::engines::image_retriever::ImageRetriever;
use pricewatch::engines::listing_parser::WooCommerceParser;
use pricewatch::engines::reqwest_engine::ReqwestEngineFactory;
use pricewatch::engines::traits::FetchConfig;
use pricewatch::infrastructure::cache::memory_cache::InMemoryPriceCache;
use pricewatch::infrastructure::cache::redis_client::RedisPriceCache;
use pricewatch::infrastructure::repositories::product_repo_impl::JsonFileProductRepository;
use pricewatch::infrastructure::services::console_notifier::ConsoleNotifier;
use pricewatch::infrastructure::services::email_notifier::EmailNotifier;
use pricewatch::infrastructure::storage::LocalImageStorage;
use pricewatch::presentation::middleware::auth_middleware::AuthState;
use pricewatch::presentation::routes;
use pricewatch::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting pricewatch...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.metrics.enabled {
        pricewatch::infrastructure::metrics::init_metrics(&settings.metrics.address)?;
    }

    // 3. Price cache
    let cache: Arc<dyn PriceCache> = if settings.redis.enabled {
        Arc::new(RedisPriceCache::new(&settings.redis).await?)
    } else {
        info!("Redis disabled, using in-process price cache");
        Arc::new(InMemoryPriceCache::new(std::time::Duration::from_secs(
            settings.redis.ttl_secs,
        )))
    };

    // 4. Storage
    let store = Arc::new(JsonFileProductRepository::new(&settings.storage.products_path).await?);
    let images = ImageRetriever::new(Arc::new(LocalImageStorage::new(
        &settings.storage.images_path,
    )));
    info!("Product store at {}", store.file_path().display());

    // 5. Engines
    let fetchers = Arc::new(ReqwestEngineFactory::new(FetchConfig::from_settings(
        &settings.scraper,
    )));
    let parser = Arc::new(WooCommerceParser::new()?);

    // 6. Orchestrator
    let mut service = ScrapingService::new(
        settings.scraper.base_url.clone(),
        fetchers,
        parser,
        images,
        cache,
        store,
        Arc::new(ConsoleNotifier::new()),
    )
    .with_merge_on_save(settings.storage.merge_on_save);
    if settings.notification.email.enabled {
        service = service.with_email(Arc::new(EmailNotifier::new(
            settings.notification.email.clone(),
        )));
    }

    // 7. Start HTTP server
    let app = routes::routes(
        Arc::new(service),
        AuthState::new(settings.auth.api_token.as_str()),
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
