// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::product::Product;

/// 商品列表响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct ProductListResponseDto {
    pub status: String,
    /// 商品数量
    pub count: usize,
    pub products: Vec<Product>,
}

impl ProductListResponseDto {
    pub fn success(products: Vec<Product>) -> Self {
        Self {
            status: "success".to_string(),
            count: products.len(),
            products,
        }
    }
}
