//! # 商品目录
//!
//! 单一数据源的商品增删改查：
//! - `app::catalog` 商品实体、表单校验、整体覆盖式持久化和外壳状态机
//! - `core` 错误、响应包装和中间件
//! - `infrastructure` 配置、日志和键值存储

pub mod app;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::catalog::{handler::AppState, ProductRepository, Shell};
use crate::infrastructure::config::{Config, StorageBackend};
use crate::infrastructure::storage::{DynStore, FileStore, MemoryStore, StorageResult};

/// 按配置打开存储并加载外壳
pub fn build_shell(config: &Config) -> StorageResult<Shell<DynStore>> {
    let store: DynStore = match config.storage.backend {
        StorageBackend::File => Box::new(FileStore::open(&config.storage.data_dir)?),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    let repository = ProductRepository::with_key(store, config.storage.key.clone());
    Ok(Shell::new(repository))
}

/// 组装带中间件的完整应用
pub fn build_app(state: AppState, config: &Config) -> Router {
    crate::app::catalog::handler::routes(state)
        .layer(middleware::from_fn(
            crate::core::middleware::request_logging_middleware,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.timeout_seconds,
        )))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
