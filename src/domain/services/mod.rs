// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 通知服务（notification_service）：通知通道抽象
/// - 抓取服务（scraping_service）：驱动一次完整的抓取运行
pub mod notification_service;
pub mod scraping_service;
