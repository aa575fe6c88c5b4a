// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 通知服务的控制台与邮件实现
pub mod console_notifier;
pub mod email_notifier;
