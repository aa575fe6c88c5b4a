// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Query},
    Json,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::{
    application::dto::{scrape_request::ScrapeQueryDto, scrape_response::ScrapeResponseDto},
    domain::services::scraping_service::ScrapingService,
    presentation::errors::AppError,
};

/// 触发一次抓取运行并等待其完成
pub async fn trigger_scrape(
    Extension(service): Extension<Arc<ScrapingService>>,
    Query(query): Query<ScrapeQueryDto>,
) -> Result<Json<ScrapeResponseDto>, AppError> {
    query.validate()?;

    info!(
        page_limit = ?query.page_limit,
        proxy = query.proxy.is_some(),
        "Scrape requested"
    );
    let stats = service
        .run(query.page_limit, query.proxy.as_deref())
        .await?;

    Ok(Json(ScrapeResponseDto::success(stats)))
}
