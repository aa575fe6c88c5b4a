// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 价格缓存的Redis实现与进程内实现
pub mod memory_cache;
pub mod redis_client;
