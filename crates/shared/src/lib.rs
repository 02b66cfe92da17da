//! 共享库
//!
//! 包含服务共用的配置、数据库连接和可观测性初始化代码。

pub mod config;
pub mod database;
pub mod observability;
pub mod test_utils;

pub use config::{AppConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};
pub use database::Database;
