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
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// 携带API令牌的请求头
pub const TOKEN_HEADER: &str = "x-token";

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 共享的API令牌
    pub api_token: Arc<str>,
}

impl AuthState {
    pub fn new(api_token: impl Into<Arc<str>>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }
}

/// 认证中间件
///
/// 比较 `x-token` 请求头与配置的API令牌
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// 认证成功时返回下游响应，否则返回401
pub async fn auth_middleware(State(state): State<AuthState>, req: Request, next: Next) -> Response {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    let provided = token.is_some();
    let authorized = token == Some(state.api_token.as_ref());

    if authorized {
        return next.run(req).await;
    }

    if provided {
        warn!("Rejected request with invalid API token");
    } else {
        warn!("Rejected request without API token");
    }
    unauthorized()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid API token" })),
    )
        .into_response()
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
