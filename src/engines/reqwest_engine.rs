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

use crate::engines::cookie_jar::PermissiveCookieJar;
use crate::engines::traits::{EngineError, FetchConfig, FetcherFactory, PageFetcher};
use async_trait::async_trait;
use metrics::counter;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// 抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎。一次运行共享同一个客户端，
/// 包括连接池与Cookie。
pub struct ReqwestEngine {
    client: reqwest::Client,
    config: FetchConfig,
}

impl ReqwestEngine {
    /// 创建新的抓取引擎
    ///
    /// # 参数
    ///
    /// * `config` - 抓取配置
    /// * `proxy` - 可选代理地址
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 抓取引擎
    /// * `Err(EngineError)` - 代理地址无效或客户端构建失败
    pub fn new(config: FetchConfig, proxy: Option<&str>) -> Result<Self, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        if let Some(referer) = config
            .referer
            .as_deref()
            .and_then(|r| HeaderValue::from_str(r).ok())
        {
            headers.insert(REFERER, referer);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .cookie_provider(Arc::new(PermissiveCookieJar::new()));

        // Only an explicit proxy is used, environment proxies are ignored
        builder = match proxy {
            Some(proxy_url) => {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| EngineError::InvalidProxy(format!("{}: {}", proxy_url, e)))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        // TLS verification is off for the target site
        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, EngineError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        debug!("Fetching URL: {}, Status: {}", url, status);

        if status != StatusCode::OK {
            return Err(EngineError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content = response.text().await.map_err(|e| classify(url, e))?;
        if content.trim().is_empty() {
            return Err(EngineError::EmptyBody(url.to_string()));
        }

        Ok(content)
    }
}

fn classify(url: &str, err: reqwest::Error) -> EngineError {
    if err.is_timeout() {
        EngineError::Timeout(url.to_string())
    } else {
        EngineError::RequestFailed(err)
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    async fn fetch_page(&self, url: &str) -> Result<String, EngineError> {
        let policy = &self.config.retry;
        let mut retries = 0u32;

        loop {
            let err = match self.fetch_once(url).await {
                Ok(content) => return Ok(content),
                Err(err) => err,
            };
            error!("Error fetching {}: {}", url, err);

            if !err.is_retryable() || !policy.should_retry(retries) {
                return Err(EngineError::Exhausted {
                    url: url.to_string(),
                    attempts: retries + 1,
                    last_error: Box::new(err),
                });
            }

            retries += 1;
            let delay = if err.is_timeout() {
                policy.fixed_backoff()
            } else {
                policy.calculate_backoff(retries)
            };

            counter!("pricewatch_fetch_retries_total").increment(1);
            warn!(
                "Retrying {} after {:?} (retry {}/{})",
                url, delay, retries, policy.max_retries
            );
            sleep(delay).await;
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, EngineError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(EngineError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let data = response.bytes().await.map_err(|e| classify(url, e))?;
        if data.is_empty() {
            return Err(EngineError::EmptyBody(url.to_string()));
        }

        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

/// reqwest抓取引擎工厂
pub struct ReqwestEngineFactory {
    config: FetchConfig,
}

impl ReqwestEngineFactory {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl FetcherFactory for ReqwestEngineFactory {
    fn create(&self, proxy: Option<&str>) -> Result<Arc<dyn PageFetcher>, EngineError> {
        Ok(Arc::new(ReqwestEngine::new(self.config.clone(), proxy)?))
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
