// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 领域层抽象接口的技术实现，负责与外部系统交互。
///
/// 包含的子模块：
/// - 缓存（cache）：Redis与进程内价格缓存
/// - 指标（metrics）：Prometheus指标导出
/// - 仓库实现（repositories）：JSON文件商品仓库
/// - 服务（services）：控制台与邮件通知
/// - 存储（storage）：商品图片存储
pub mod cache;
pub mod metrics;
pub mod repositories;
pub mod services;
pub mod storage;
