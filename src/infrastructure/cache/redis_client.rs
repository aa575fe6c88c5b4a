// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::settings::RedisSettings;
use crate::domain::repositories::price_cache::PriceCache;
use crate::utils::errors::CacheError;
use crate::utils::retry_policy::RetryPolicy;

/// 单次建立连接的最长等待时间
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis价格缓存
///
/// 键为 `前缀 + 商品标题`，值为价格的十进制字符串，写入时设置TTL。
/// 连接断开后在每次操作前尝试重连，重连失败时表现为缓存未命中。
pub struct RedisPriceCache {
    /// Redis客户端
    client: redis::Client,
    /// 当前连接，`None` 表示不可用
    connection: RwLock<Option<MultiplexedConnection>>,
    key_prefix: String,
    ttl: Duration,
    reconnect: RetryPolicy,
}

impl RedisPriceCache {
    /// 创建Redis价格缓存
    ///
    /// # 参数
    ///
    /// * `settings` - Redis配置
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisPriceCache)` - 缓存实例，即使首次连接失败也会返回
    /// * `Err(CacheError)` - Redis URL无效
    pub async fn new(settings: &RedisSettings) -> Result<Self, CacheError> {
        let client = redis::Client::open(settings.url.as_str())?;
        let cache = Self {
            client,
            connection: RwLock::new(None),
            key_prefix: settings.key_prefix.clone(),
            ttl: Duration::from_secs(settings.ttl_secs),
            reconnect: RetryPolicy::exponential(settings.connect_retries),
        };

        match cache.connect_with_retry().await {
            Ok(con) => {
                *cache.connection.write().await = Some(con);
                info!("Successfully connected to Redis");
            }
            Err(e) => error!("Failed to connect to Redis, cache disabled until reconnect: {}", e),
        }

        Ok(cache)
    }

    fn key(&self, title: &str) -> String {
        format!("{}{}", self.key_prefix, title)
    }

    async fn connect_once(&self) -> Result<MultiplexedConnection, CacheError> {
        let mut con = tokio::time::timeout(
            CONNECT_TIMEOUT,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Unavailable)??;

        let _pong: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(con)
    }

    async fn connect_with_retry(&self) -> Result<MultiplexedConnection, CacheError> {
        let attempts = self.reconnect.max_retries.max(1);
        let mut last_error = CacheError::Unavailable;

        for attempt in 1..=attempts {
            match self.connect_once().await {
                Ok(con) => return Ok(con),
                Err(e) => {
                    warn!(
                        "Redis connection attempt {}/{} failed: {}",
                        attempt, attempts, e
                    );
                    last_error = e;
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.reconnect.calculate_backoff(attempt)).await;
            }
        }

        Err(last_error)
    }

    /// 返回可用连接，必要时重连
    async fn ensure_connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let current = self.connection.read().await.clone();
        if let Some(mut con) = current {
            let ping: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut con).await;
            if ping.is_ok() {
                return Ok(con);
            }
            warn!("Redis connection lost, reconnecting");
        }

        let mut guard = self.connection.write().await;
        match self.connect_with_retry().await {
            Ok(con) => {
                *guard = Some(con.clone());
                Ok(con)
            }
            Err(e) => {
                *guard = None;
                Err(e)
            }
        }
    }

    async fn try_get(&self, title: &str) -> Result<Option<Decimal>, CacheError> {
        let mut con = self.ensure_connection().await?;
        let value: Option<String> = con.get(self.key(title)).await?;

        value
            .map(|v| Decimal::from_str(&v).map_err(|_| CacheError::InvalidValue(v)))
            .transpose()
    }

    async fn try_set(&self, title: &str, price: Decimal) -> Result<(), CacheError> {
        let mut con = self.ensure_connection().await?;
        con.set_ex::<_, _, ()>(self.key(title), price.to_string(), self.ttl.as_secs())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PriceCache for RedisPriceCache {
    async fn get(&self, title: &str) -> Option<Decimal> {
        match self.try_get(title).await {
            Ok(price) => price,
            Err(e) => {
                error!("Error getting price from cache for {}: {}", title, e);
                None
            }
        }
    }

    async fn set(&self, title: &str, price: Decimal) {
        match self.try_set(title, price).await {
            Ok(()) => debug!("Cached price {} for {}", price, title),
            Err(e) => error!("Error setting price in cache for {}: {}", title, e),
        }
    }
}
