//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 构建学生管理路由
///
/// 包含学生及其成绩的五个 CRUD 操作路由
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/students", post(handlers::student::create_student))
        .route("/students", get(handlers::student::list_students))
        .route("/students/{id}", get(handlers::student::get_student))
        .route("/students/{id}", put(handlers::student::update_student))
        .route("/students/{id}", delete(handlers::student::delete_student))
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(student_routes())
}
