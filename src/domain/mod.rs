// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：商品、抓取统计与运行状态
/// - 仓库接口（repositories）：商品仓库、价格缓存与图片存储的抽象接口
/// - 服务（services）：抓取编排与通知抽象
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;
