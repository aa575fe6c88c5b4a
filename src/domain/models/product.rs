// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 商品
///
/// 以标题为唯一标识（区分大小写、不做额外裁剪）。
/// 持久化格式为 `{product_title, product_price, path_to_image}`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 商品标题
    #[serde(rename = "product_title")]
    pub title: String,
    /// 商品价格，内部使用精确十进制，序列化为JSON数字
    #[serde(rename = "product_price", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// 本地图片路径
    #[serde(rename = "path_to_image", default)]
    pub image_path: Option<String>,
}

impl Product {
    pub fn new(title: impl Into<String>, price: Decimal, image_path: Option<String>) -> Self {
        Self {
            title: title.into(),
            price,
            image_path,
        }
    }

    /// 标题非空且价格非负
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.price.is_sign_negative()
    }
}

/// 从商品卡片中提取出的原始字段，图片尚未下载
#[derive(Debug, Clone, PartialEq)]
pub struct RawProduct {
    pub title: String,
    pub price: Decimal,
    pub image_url: String,
}

impl RawProduct {
    /// 附上已下载的图片路径，得到最终商品
    pub fn into_product(self, image_path: String) -> Product {
        Product::new(self.title, self.price, Some(image_path))
    }
}
