//! 基础设施层：配置、日志和键值存储

pub mod config;
pub mod logger;
pub mod storage;
