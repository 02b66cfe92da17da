//! 学生档案服务
//!
//! 提供学生及其各科成绩的 REST API。
//!
//! ## 核心功能
//!
//! - **校验门**：在任何持久化发生之前拒绝结构或语义非法的请求载荷
//! - **档案存储**：五个 CRUD 操作，每个操作在单个数据库事务内完成
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `validation`: 创建/更新载荷的校验门（纯函数，无 I/O）
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据库：sqlx (PostgreSQL)
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod validation;

// 重新导出核心类型
pub use dto::{
    CreatedResponse, MarkDto, MessageResponse, PageQuery, StudentDto, StudentListResponse,
};
pub use error::{Result, StudentError};
pub use state::AppState;
