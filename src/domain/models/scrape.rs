// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 一次抓取运行的统计结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeStats {
    /// 抓取到的商品总数
    pub total: usize,
    /// 价格变化或新出现的商品数
    pub updated: usize,
}

impl ScrapeStats {
    /// 控制台通知使用的摘要文本
    pub fn summary(&self) -> String {
        format!(
            "Scraping completed successfully!\nTotal products scraped: {}\nProducts updated: {}",
            self.total, self.updated
        )
    }
}

/// 抓取运行状态
///
/// `Idle → FetchingIndex → ParsingIndex → ScrapingPages → Aggregating →
/// Diffing → Persisting → Notifying → Done`，任何未恢复的错误进入 `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeState {
    Idle,
    FetchingIndex,
    ParsingIndex,
    ScrapingPages,
    Aggregating,
    Diffing,
    Persisting,
    Notifying,
    Done,
    Failed,
}

impl ScrapeState {
    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScrapeState::Done | ScrapeState::Failed)
    }

    /// 状态机允许的下一个状态
    pub fn can_transition_to(&self, next: ScrapeState) -> bool {
        use ScrapeState::*;

        if next == Failed {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Idle, FetchingIndex)
                | (FetchingIndex, ParsingIndex)
                | (ParsingIndex, ScrapingPages)
                | (ScrapingPages, Aggregating)
                | (Aggregating, Diffing)
                | (Diffing, Persisting)
                | (Persisting, Notifying)
                | (Notifying, Done)
        )
    }
}

impl fmt::Display for ScrapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScrapeState::Idle => "idle",
            ScrapeState::FetchingIndex => "fetching_index",
            ScrapeState::ParsingIndex => "parsing_index",
            ScrapeState::ScrapingPages => "scraping_pages",
            ScrapeState::Aggregating => "aggregating",
            ScrapeState::Diffing => "diffing",
            ScrapeState::Persisting => "persisting",
            ScrapeState::Notifying => "notifying",
            ScrapeState::Done => "done",
            ScrapeState::Failed => "failed",
        };
        f.write_str(name)
    }
}
