// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::utils::errors::NotifyError;

/// 通知服务特质
///
/// 向运维人员发送一条可读的消息
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 发送通知
    ///
    /// # 参数
    ///
    /// * `message` - 通知内容
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 发送成功
    /// * `Err(NotifyError)` - 发送失败
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;

    /// 通道名称，用于日志
    fn channel(&self) -> &'static str;
}
