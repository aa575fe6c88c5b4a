// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use cookie::Cookie;
use parking_lot::Mutex;
use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::collections::BTreeMap;

/// 宽松Cookie存储
///
/// 接受任何响应设置的Cookie，并把全部Cookie发送给任意地址，
/// 不做域名、路径或Secure属性匹配。目标站点依赖这种行为，
/// 不能用于跨站点共享的客户端。
///
/// `Set-Cookie` 由 `cookie` 解析，属性只被忽略。
#[derive(Debug, Default)]
pub struct PermissiveCookieJar {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl PermissiveCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.lock().is_empty()
    }
}

impl CookieStore for PermissiveCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, _url: &Url) {
        let mut jar = self.cookies.lock();
        for header in cookie_headers {
            let Some(cookie) = header.to_str().ok().and_then(|raw| Cookie::parse(raw).ok())
            else {
                continue;
            };
            jar.insert(cookie.name().to_string(), cookie.value().to_string());
        }
    }

    fn cookies(&self, _url: &Url) -> Option<HeaderValue> {
        let jar = self.cookies.lock();
        if jar.is_empty() {
            return None;
        }
        let joined = jar
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).ok()
    }
}
