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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、认证、抓取、缓存、存储、通知和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 通知配置
    pub notification: NotificationSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 认证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// 与 `x-token` 请求头比较的静态令牌
    pub api_token: String,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 商品列表根地址，第N页为 `{base_url}page/{N}/`
    pub base_url: String,
    /// 首次请求之后的最大重试次数
    pub retry_attempts: u32,
    /// 重试基础延迟（秒）
    pub retry_delay_secs: u64,
    /// 连接超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 请求总超时时间（秒）
    pub timeout_secs: u64,
    /// 是否接受无效证书（关闭TLS校验）
    pub accept_invalid_certs: bool,
    /// 请求使用的User-Agent
    pub user_agent: String,
}

impl ScraperSettings {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// 是否启用Redis价格缓存（关闭时使用进程内缓存）
    pub enabled: bool,
    /// Redis连接URL
    pub url: String,
    /// 价格键前缀
    pub key_prefix: String,
    /// 价格缓存过期时间（秒）
    pub ttl_secs: u64,
    /// 连接重试次数
    pub connect_retries: u32,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 商品JSON文件路径
    pub products_path: String,
    /// 商品图片目录
    pub images_path: String,
    /// 保存时是否按标题与已有商品合并
    pub merge_on_save: bool,
}

/// 通知配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// 邮件通知配置
    pub email: EmailSettings,
}

/// 邮件通知配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    /// 是否启用邮件通知
    pub enabled: bool,
    /// SMTP服务器地址
    pub smtp_server: String,
    /// SMTP端口（465 隐式TLS，587 STARTTLS，其余明文）
    pub smtp_port: u16,
    /// SMTP用户名
    pub username: String,
    /// SMTP密码
    pub password: String,
    /// 发件人地址
    pub sender: String,
    /// 收件人地址
    pub recipient: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用Prometheus导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub address: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `PRICEWATCH__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PRICEWATCH").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("auth.api_token", "change-me")?
            // Scraper
            .set_default("scraper.base_url", "https://dentalstall.com/shop/")?
            .set_default("scraper.retry_attempts", 3)?
            .set_default("scraper.retry_delay_secs", 5)?
            .set_default("scraper.connect_timeout_secs", 10)?
            .set_default("scraper.timeout_secs", 30)?
            .set_default("scraper.accept_invalid_certs", true)?
            .set_default(
                "scraper.user_agent",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )?
            // Price cache
            .set_default("redis.enabled", true)?
            .set_default("redis.url", "redis://127.0.0.1:6379/0")?
            .set_default("redis.key_prefix", "product:price:")?
            .set_default("redis.ttl_secs", 3600)?
            .set_default("redis.connect_retries", 3)?
            // Storage
            .set_default("storage.products_path", "storage/products.json")?
            .set_default("storage.images_path", "storage/images")?
            .set_default("storage.merge_on_save", false)?
            // Notification
            .set_default("notification.email.enabled", false)?
            .set_default("notification.email.smtp_server", "smtp.gmail.com")?
            .set_default("notification.email.smtp_port", 587)?
            .set_default("notification.email.username", "")?
            .set_default("notification.email.password", "")?
            .set_default("notification.email.sender", "")?
            .set_default("notification.email.recipient", "")?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.address", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
