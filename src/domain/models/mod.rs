// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 商品（product）：持久化的商品记录与解析出的原始商品
/// - 抓取（scrape）：运行统计与运行状态机
pub mod product;
pub mod scrape;
