// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::engines::traits::EngineError;

/// 商品仓库错误类型
///
/// 会随运行失败返回给HTTP调用方，文本使用英文
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Product store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Product store is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No products to save")]
    Empty,
}

/// 价格缓存错误类型
///
/// 只在缓存实现内部使用，对外表现为缓存未命中
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis错误: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis不可用")]
    Unavailable,

    #[error("缓存值无效: {0}")]
    InvalidValue(String),
}

/// 通知错误类型
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("{0}")]
    Other(String),
}

/// 抓取运行错误类型
///
/// 任意变体都会终止整次运行并返回给调用方
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] EngineError),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),

    #[error("Failed to send email: {0}")]
    Notify(#[from] NotifyError),
}
