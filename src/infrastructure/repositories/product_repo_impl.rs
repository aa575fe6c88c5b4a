// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::models::product::Product;
use crate::domain::repositories::product_repository::ProductRepository;
use crate::utils::errors::RepositoryError;

/// JSON文件商品仓库
///
/// 整个文件是一个商品数组，每次保存都整体覆盖
#[derive(Clone)]
pub struct JsonFileProductRepository {
    file_path: PathBuf,
}

impl JsonFileProductRepository {
    /// 创建JSON文件商品仓库
    ///
    /// 目录不存在时创建目录，文件不存在时写入空数组
    ///
    /// # 参数
    ///
    /// * `file_path` - 商品文件路径
    ///
    /// # 返回值
    ///
    /// * `Ok(JsonFileProductRepository)` - 仓库实例
    /// * `Err(RepositoryError)` - 创建目录或文件失败
    pub async fn new(file_path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let file_path = file_path.into();

        if let Some(dir) = file_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !fs::try_exists(dir).await? {
                info!("Directory {} not found. Creating it now.", dir.display());
                fs::create_dir_all(dir).await?;
            }
        }

        if !fs::try_exists(&file_path).await? {
            info!(
                "Storage file not found. Creating a new file at {}.",
                file_path.display()
            );
            fs::write(&file_path, "[]").await?;
        }

        Ok(Self { file_path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ProductRepository for JsonFileProductRepository {
    async fn load_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let content = match fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Storage file not found.");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&content)?;

        let mut products = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Product>(entry.clone()) {
                Ok(product) if product.is_valid() => products.push(product),
                Ok(_) => warn!("Skipping invalid product entry at index {}: {}", idx, entry),
                Err(e) => warn!(
                    "Skipping invalid product entry at index {}: {} - Error: {}",
                    idx, entry, e
                ),
            }
        }

        Ok(products)
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        if products.is_empty() {
            return Err(RepositoryError::Empty);
        }

        debug!(
            "Saving {} products to {}",
            products.len(),
            self.file_path.display()
        );
        let json = serde_json::to_string_pretty(products)?;
        fs::write(&self.file_path, json).await?;
        Ok(())
    }
}

/// 内存商品仓库（用于测试）
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    saves: AtomicUsize,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            saves: AtomicUsize::new(0),
        }
    }

    /// `save_all` 被成功调用的次数
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn load_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        if products.is_empty() {
            return Err(RepositoryError::Empty);
        }

        *self.products.write().await = products.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
#[path = "product_repo_impl_test.rs"]
mod tests;
