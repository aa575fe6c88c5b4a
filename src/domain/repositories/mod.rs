// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 价格缓存（price_cache）：商品标题到最近价格的带过期映射
/// - 商品仓库（product_repository）：商品列表的整体加载与保存
/// - 存储仓库（storage_repository）：商品图片文件的保存
pub mod price_cache;
pub mod product_repository;
pub mod storage_repository;
