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

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::settings::ScraperSettings;
use crate::utils::retry_policy::RetryPolicy;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败（连接、传输等）
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout fetching {0}")]
    Timeout(String),
    /// 非200状态码
    #[error("HTTP {status} for URL: {url}")]
    BadStatus { url: String, status: u16 },
    /// 响应体为空
    #[error("Empty response received from {0}")]
    EmptyBody(String),
    /// 代理地址无效
    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),
    /// 重试次数耗尽
    #[error("Failed to fetch {url} after {attempts} attempts: {last_error}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last_error: Box<EngineError>,
    },
}

impl EngineError {
    /// 是否为超时错误，超时使用固定退避
    pub fn is_timeout(&self) -> bool {
        match self {
            EngineError::Timeout(_) => true,
            EngineError::RequestFailed(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// 判断错误是否可重试
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            EngineError::InvalidProxy(_) | EngineError::Exhausted { .. }
        )
    }
}

/// 抓取配置
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// 重试策略（线性退避，超时使用固定基础延迟）
    pub retry: RetryPolicy,
    /// 连接超时时间
    pub connect_timeout: Duration,
    /// 请求总超时时间
    pub timeout: Duration,
    /// 是否接受无效证书
    pub accept_invalid_certs: bool,
    /// User-Agent
    pub user_agent: String,
    /// Referer请求头
    pub referer: Option<String>,
}

impl FetchConfig {
    pub fn from_settings(settings: &ScraperSettings) -> Self {
        let referer = url::Url::parse(&settings.base_url)
            .ok()
            .map(|u| format!("{}/", u.origin().ascii_serialization()));

        Self {
            retry: RetryPolicy::linear(settings.retry_attempts, settings.retry_delay()),
            connect_timeout: settings.connect_timeout(),
            timeout: settings.timeout(),
            accept_invalid_certs: settings.accept_invalid_certs,
            user_agent: settings.user_agent.clone(),
            referer,
        }
    }
}

/// 页面抓取特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取HTML文本，失败时按重试策略重试，耗尽后返回 `EngineError::Exhausted`
    async fn fetch_page(&self, url: &str) -> Result<String, EngineError>;

    /// 获取二进制内容（图片），只尝试一次
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 抓取引擎工厂
///
/// 每次运行创建一个共享的抓取上下文（连接池、Cookie），可选代理
pub trait FetcherFactory: Send + Sync {
    fn create(&self, proxy: Option<&str>) -> Result<Arc<dyn PageFetcher>, EngineError>;
}
