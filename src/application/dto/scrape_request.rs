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

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 抓取请求查询参数
///
/// 对应 `POST /scrape?page_limit=&proxy=`
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ScrapeQueryDto {
    /// 最多抓取的页数，省略时抓取全部页
    #[validate(range(min = 1))]
    pub page_limit: Option<u32>,
    /// 本次运行使用的代理地址
    pub proxy: Option<String>,
}
