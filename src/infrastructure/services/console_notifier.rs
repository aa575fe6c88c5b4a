// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use tracing::info;

use crate::domain::services::notification_service::NotificationService;
use crate::utils::errors::NotifyError;

/// 控制台通知，打印带边框的消息块
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    fn frame(message: &str) -> String {
        format!(
            "\n=== Scraping Notification ===\n{}\n===========================\n",
            message
        )
    }
}

#[async_trait]
impl NotificationService for ConsoleNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        println!("{}", Self::frame(message));
        info!(channel = self.channel(), "{}", message);
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "console"
    }
}
