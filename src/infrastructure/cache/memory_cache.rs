// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::domain::repositories::price_cache::PriceCache;

/// 缓存条目
#[derive(Clone)]
struct CacheEntry {
    price: Decimal,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(price: Decimal, ttl: Duration) -> Self {
        Self {
            price,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// 进程内价格缓存
///
/// 未启用Redis时使用，过期语义与Redis实现一致
pub struct InMemoryPriceCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl InMemoryPriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// 未过期的条目数
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPriceCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

#[async_trait]
impl PriceCache for InMemoryPriceCache {
    async fn get(&self, title: &str) -> Option<Decimal> {
        let mut entries = self.entries.lock();
        match entries.get(title) {
            Some(entry) if entry.is_expired() => {
                entries.remove(title);
                None
            }
            Some(entry) => Some(entry.price),
            None => None,
        }
    }

    async fn set(&self, title: &str, price: Decimal) {
        self.entries
            .lock()
            .insert(title.to_string(), CacheEntry::new(price, self.ttl));
    }
}
