// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::repositories::storage_repository::{ImageRepository, StorageError};

/// 本地文件系统图片存储实现
pub struct LocalImageStorage {
    base_path: PathBuf,
}

impl LocalImageStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn get_full_path(&self, file_name: &str) -> PathBuf {
        self.base_path.join(file_name)
    }
}

#[async_trait]
impl ImageRepository for LocalImageStorage {
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<String, StorageError> {
        // 确保目录存在
        fs::create_dir_all(&self.base_path).await?;

        let full_path = self.get_full_path(file_name);
        let mut file = fs::File::create(&full_path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        Ok(full_path.to_string_lossy().to_string())
    }
}

/// 内存图片存储实现（用于测试）
#[derive(Default)]
pub struct InMemoryImageStorage {
    data: tokio::sync::RwLock<std::collections::HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.data.read().await.get(file_name).cloned()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageStorage {
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<String, StorageError> {
        let mut map = self.data.write().await;
        map.insert(file_name.to_string(), data.to_vec());
        Ok(format!("memory/{}", file_name))
    }
}
