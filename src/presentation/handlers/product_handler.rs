// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::application::dto::product_response::ProductListResponseDto;
use crate::domain::services::scraping_service::ScrapingService;
use crate::presentation::errors::AppError;

/// 返回商品仓库中的全部商品
pub async fn list_products(
    Extension(service): Extension<Arc<ScrapingService>>,
) -> Result<Json<ProductListResponseDto>, AppError> {
    let products = service.get_stored_products().await?;
    Ok(Json(ProductListResponseDto::success(products)))
}
