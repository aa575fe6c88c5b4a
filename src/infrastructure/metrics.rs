// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 在 `address` 上启动Prometheus抓取端点并注册抓取相关指标
///
/// # 参数
///
/// * `address` - 监听地址，例如 `0.0.0.0:9000`
pub fn init_metrics(address: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = address.parse()?;

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return Ok(());
    }

    describe_counter!(
        "pricewatch_pages_scraped_total",
        "Total number of listing pages scraped successfully"
    );
    describe_counter!(
        "pricewatch_page_failures_total",
        "Total number of listing pages that failed and contributed no products"
    );
    describe_counter!(
        "pricewatch_products_skipped_total",
        "Total number of product cards skipped because a field was missing or invalid"
    );
    describe_counter!(
        "pricewatch_fetch_retries_total",
        "Total number of fetch retries"
    );
    describe_counter!(
        "pricewatch_products_updated_total",
        "Total number of products whose price was new or changed"
    );
    describe_histogram!(
        "pricewatch_scrape_duration_seconds",
        "Duration of a full scrape run in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
