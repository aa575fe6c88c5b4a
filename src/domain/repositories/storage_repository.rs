// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 图片存储特质
///
/// 以文件名为键保存二进制内容，已存在的同名文件直接覆盖
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// 保存图片并返回其路径
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<String, StorageError>;
}
