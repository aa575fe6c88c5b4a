// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::scrape::ScrapeStats;

/// 抓取响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrapeResponseDto {
    /// 固定为 `success`
    pub status: String,
    pub message: String,
    /// 抓取总数与更新数
    pub stats: ScrapeStats,
}

impl ScrapeResponseDto {
    pub fn success(stats: ScrapeStats) -> Self {
        Self {
            status: "success".to_string(),
            message: "Scraping completed successfully".to_string(),
            stats,
        }
    }
}
