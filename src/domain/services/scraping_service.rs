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

use futures::future::join_all;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};
use url::Url;
use uuid::Uuid;

use crate::domain::models::product::{Product, RawProduct};
use crate::domain::models::scrape::{ScrapeState, ScrapeStats};
use crate::domain::repositories::price_cache::PriceCache;
use crate::domain::repositories::product_repository::ProductRepository;
use crate::domain::services::notification_service::NotificationService;
use crate::engines::image_retriever::ImageRetriever;
use crate::engines::listing_parser::ListingParser;
use crate::engines::traits::{FetcherFactory, PageFetcher};
use crate::utils::errors::ScrapeError;

/// 成功运行后发送到邮件通道的正文
pub const EMAIL_SUCCESS_MESSAGE: &str = "Scraping completed successfully!";

/// 运行状态跟踪
struct RunState {
    state: ScrapeState,
}

impl RunState {
    fn new() -> Self {
        Self {
            state: ScrapeState::Idle,
        }
    }

    fn advance(&mut self, next: ScrapeState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "State transition");
        self.state = next;
    }
}

/// 抓取服务
///
/// 驱动一次完整的抓取运行：发现分页、并发抓取各页、
/// 与价格缓存比对、保存变化的商品并发送通知
pub struct ScrapingService {
    base_url: String,
    fetchers: Arc<dyn FetcherFactory>,
    parser: Arc<dyn ListingParser>,
    images: ImageRetriever,
    cache: Arc<dyn PriceCache>,
    store: Arc<dyn ProductRepository>,
    console: Arc<dyn NotificationService>,
    email: Option<Arc<dyn NotificationService>>,
    merge_on_save: bool,
}

impl ScrapingService {
    /// 创建新的抓取服务实例
    ///
    /// # 参数
    ///
    /// * `base_url` - 列表首页地址，第N页为 `{base_url}page/{N}/`
    /// * `fetchers` - 抓取引擎工厂，每次运行创建一个引擎
    /// * `parser` - 列表页解析器
    /// * `images` - 图片下载器
    /// * `cache` - 价格缓存
    /// * `store` - 商品仓库
    /// * `console` - 控制台通知
    pub fn new(
        base_url: impl Into<String>,
        fetchers: Arc<dyn FetcherFactory>,
        parser: Arc<dyn ListingParser>,
        images: ImageRetriever,
        cache: Arc<dyn PriceCache>,
        store: Arc<dyn ProductRepository>,
        console: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            fetchers,
            parser,
            images,
            cache,
            store,
            console,
            email: None,
            merge_on_save: false,
        }
    }

    /// 启用邮件通知通道
    pub fn with_email(mut self, email: Arc<dyn NotificationService>) -> Self {
        self.email = Some(email);
        self
    }

    /// 保存时按标题与已有商品合并，而不是只写入变化的商品
    pub fn with_merge_on_save(mut self, merge_on_save: bool) -> Self {
        self.merge_on_save = merge_on_save;
        self
    }

    /// 执行一次抓取运行
    ///
    /// # 参数
    ///
    /// * `page_limit` - 最多抓取的页数
    /// * `proxy` - 本次运行使用的代理地址
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeStats)` - 抓取总数与更新数
    /// * `Err(ScrapeError)` - 运行失败，失败信息已发送到控制台通道
    pub async fn run(
        &self,
        page_limit: Option<u32>,
        proxy: Option<&str>,
    ) -> Result<ScrapeStats, ScrapeError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("scrape_run", %run_id);
        let started = Instant::now();
        let mut state = RunState::new();

        let result = self
            .execute(&mut state, page_limit, proxy)
            .instrument(span.clone())
            .await;
        histogram!("pricewatch_scrape_duration_seconds").record(started.elapsed().as_secs_f64());

        match result {
            Ok(stats) => Ok(stats),
            Err(e) => {
                state.advance(ScrapeState::Failed);
                error!(%run_id, "Scraping failed: {}", e);
                let message = format!("Scraping failed: {}", e);
                if let Err(notify_err) = self.console.notify(&message).instrument(span).await {
                    error!(%run_id, "Console notification failed: {}", notify_err);
                }
                Err(e)
            }
        }
    }

    /// 返回商品仓库中的全部商品
    pub async fn get_stored_products(&self) -> Result<Vec<Product>, ScrapeError> {
        Ok(self.store.load_all().await?)
    }

    async fn execute(
        &self,
        state: &mut RunState,
        page_limit: Option<u32>,
        proxy: Option<&str>,
    ) -> Result<ScrapeStats, ScrapeError> {
        state.advance(ScrapeState::FetchingIndex);
        let fetcher = self.fetchers.create(proxy)?;
        debug!("Using fetch engine {}", fetcher.name());
        let index_html = fetcher.fetch_page(&self.base_url).await?;

        state.advance(ScrapeState::ParsingIndex);
        let discovered = self.parser.total_pages(&index_html);
        let total_pages = page_limit.map_or(discovered, |limit| discovered.min(limit));
        info!("Starting scrape of {} pages", total_pages);

        state.advance(ScrapeState::ScrapingPages);
        let pages = join_all((1..=total_pages).map(|page| self.scrape_page(fetcher.as_ref(), page)))
            .await;

        state.advance(ScrapeState::Aggregating);
        let products: Vec<Product> = pages.into_iter().flatten().collect();
        info!("Successfully scraped {} products", products.len());

        state.advance(ScrapeState::Diffing);
        let (updates, stats) = self.diff(products).await;

        state.advance(ScrapeState::Persisting);
        self.persist(&updates).await?;

        state.advance(ScrapeState::Notifying);
        self.notify(&stats).await?;

        state.advance(ScrapeState::Done);
        Ok(stats)
    }

    /// 抓取单个列表页，任何页级错误都只记录日志并返回空列表
    async fn scrape_page(&self, fetcher: &dyn PageFetcher, page: u32) -> Vec<Product> {
        let url = self.parser.page_url(&self.base_url, page);

        let html = match fetcher.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                counter!("pricewatch_page_failures_total").increment(1);
                error!("Error scraping page {}: {}", url, e);
                return Vec::new();
            }
        };

        let raw_products = self.parser.parse_products(&html);
        let mut products = Vec::with_capacity(raw_products.len());
        for raw in raw_products {
            if let Some(product) = self.attach_image(fetcher, &url, raw).await {
                products.push(product);
            }
        }

        counter!("pricewatch_pages_scraped_total").increment(1);
        debug!("Page {} yielded {} products", page, products.len());
        products
    }

    async fn attach_image(
        &self,
        fetcher: &dyn PageFetcher,
        page_url: &str,
        raw: RawProduct,
    ) -> Option<Product> {
        let image_url = resolve_url(page_url, &raw.image_url);
        match self.images.download(fetcher, &image_url, &raw.title).await {
            Some(path) => Some(raw.into_product(path)),
            None => {
                counter!("pricewatch_products_skipped_total").increment(1);
                warn!("Skipping {}: image could not be saved", raw.title);
                None
            }
        }
    }

    /// 与价格缓存比对，返回需要保存的商品
    async fn diff(&self, products: Vec<Product>) -> (Vec<Product>, ScrapeStats) {
        let mut stats = ScrapeStats {
            total: products.len(),
            updated: 0,
        };

        let mut updates = Vec::new();
        for product in products {
            let cached = self.cache.get(&product.title).await;
            debug!(
                "Cached price for {}: {:?}, scraped {}",
                product.title, cached, product.price
            );

            if cached != Some(product.price) {
                self.cache.set(&product.title, product.price).await;
                updates.push(product);
            }
        }

        stats.updated = updates.len();
        counter!("pricewatch_products_updated_total").increment(stats.updated as u64);
        (updates, stats)
    }

    async fn persist(&self, updates: &[Product]) -> Result<(), ScrapeError> {
        if updates.is_empty() {
            info!("No product changes, store left untouched");
            return Ok(());
        }

        let existing = self.store.load_all().await?;
        debug!("Store currently holds {} products", existing.len());

        if self.merge_on_save {
            let merged = merge_by_title(existing, updates);
            self.store.save_all(&merged).await?;
        } else {
            self.store.save_all(updates).await?;
        }

        info!("Saved {} updated products", updates.len());
        Ok(())
    }

    async fn notify(&self, stats: &ScrapeStats) -> Result<(), ScrapeError> {
        if let Err(e) = self.console.notify(&stats.summary()).await {
            error!("{} notification failed: {}", self.console.channel(), e);
        }

        if let Some(email) = &self.email {
            email.notify(EMAIL_SUCCESS_MESSAGE).await?;
        }

        Ok(())
    }
}

/// 把图片地址解析为绝对地址，无法解析时原样返回
fn resolve_url(page_url: &str, image_url: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(image_url))
        .map(String::from)
        .unwrap_or_else(|_| image_url.to_string())
}

/// 用更新的商品替换同名商品，新商品追加在末尾
fn merge_by_title(existing: Vec<Product>, updates: &[Product]) -> Vec<Product> {
    let mut merged = existing;
    for update in updates {
        match merged.iter_mut().find(|p| p.title == update.title) {
            Some(slot) => *slot = update.clone(),
            None => merged.push(update.clone()),
        }
    }
    merged
}

#[cfg(test)]
#[path = "scraping_service_test.rs"]
mod tests;
