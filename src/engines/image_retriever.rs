// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::repositories::storage_repository::ImageRepository;
use crate::engines::traits::PageFetcher;

/// 文件名最多保留的字符数
const MAX_FILE_STEM_CHARS: usize = 50;

/// 由商品标题生成图片文件名
///
/// 只保留字母数字、空格、`-` 和 `_`，截取前50个字符后去掉首尾空白，
/// 固定使用 `.jpg` 扩展名
pub fn image_file_name(title: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .take(MAX_FILE_STEM_CHARS)
        .collect();
    format!("{}.jpg", safe.trim())
}

/// 商品图片下载器
///
/// 任何失败都返回 `None`，调用方把该商品整体跳过
pub struct ImageRetriever {
    store: Arc<dyn ImageRepository>,
}

impl ImageRetriever {
    pub fn new(store: Arc<dyn ImageRepository>) -> Self {
        Self { store }
    }

    /// 下载图片并保存到由标题决定的路径，已存在的文件会被覆盖
    pub async fn download(
        &self,
        fetcher: &dyn PageFetcher,
        image_url: &str,
        title: &str,
    ) -> Option<String> {
        let file_name = image_file_name(title);

        let data = match fetcher.fetch_bytes(image_url).await {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to download image for {}: {}", title, e);
                return None;
            }
        };

        match self.store.save(&file_name, &data).await {
            Ok(path) => {
                debug!("Successfully saved image for {} to {}", title, path);
                Some(path)
            }
            Err(e) => {
                error!("Error saving image for {}: {}", title, e);
                None
            }
        }
    }
}
