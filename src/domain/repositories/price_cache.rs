// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use rust_decimal::Decimal;

/// 价格缓存特质
///
/// 以商品标题为键保存最近一次看到的价格。
/// 后端不可用时 `get` 返回 `None`，`set` 静默忽略，调用方据此把商品视为已变化。
#[async_trait]
pub trait PriceCache: Send + Sync {
    /// 获取缓存的价格，不存在、已过期或后端不可用时返回 `None`
    async fn get(&self, title: &str) -> Option<Decimal>;

    /// 写入价格并刷新过期时间
    async fn set(&self, title: &str, price: Decimal);
}
