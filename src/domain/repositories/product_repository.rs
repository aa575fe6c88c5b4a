// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::product::Product;
use crate::utils::errors::RepositoryError;

/// 商品仓库特质
///
/// 整体加载与整体覆盖写入商品列表
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 加载全部已保存的商品，跳过无效条目
    async fn load_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// 用给定商品覆盖整个存储，空列表返回 `RepositoryError::Empty`
    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError>;
}
