//! 错误类型定义
//!
//! 包含校验门、档案存储和路由层的全部错误类型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 学生档案服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    // 校验错误
    #[error("缺少必填字段: {0}")]
    MissingField(&'static str),
    #[error("姓名长度必须在2-100个字符之间")]
    InvalidName,
    #[error("邮箱格式无效")]
    InvalidEmail,
    #[error("marks 必须是非空数组")]
    InvalidMarks,
    #[error("每条成绩必须包含科目名称")]
    InvalidSubject,
    #[error("分数必须是0-100之间的数字")]
    InvalidScore,

    // 资源不存在
    #[error("学生不存在: {0}")]
    StudentNotFound(i64),
    #[error("路由不存在")]
    RouteNotFound,

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

impl StudentError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::InvalidName
            | Self::InvalidEmail
            | Self::InvalidMarks
            | Self::InvalidSubject
            | Self::InvalidScore => StatusCode::BAD_REQUEST,

            Self::StudentNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,

            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidMarks => "INVALID_MARKS",
            Self::InvalidSubject => "INVALID_SUBJECT",
            Self::InvalidScore => "INVALID_SCORE",
            Self::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "code": self.error_code(),
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, StudentError>;
