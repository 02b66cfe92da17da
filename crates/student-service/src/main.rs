//! 学生档案服务
//!
//! 提供学生及其各科成绩管理的 REST API。

use axum::{Json, Router, http::HeaderValue, routing::get};
use student_records_service::{handlers, routes, state::AppState};
use student_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/*.toml 加上 STUDENT_ 前缀环境变量覆盖
    let config = AppConfig::load("student-records-service").unwrap_or_default();

    observability::init(&config.observability)?;

    info!("Starting student-records-service on {}", config.server_addr());

    // 数据库连接失败是致命错误：带着不可用的存储启动没有意义
    let db = Database::connect(&config.database).await?;

    // 应用 schema 迁移（students / marks 两张表及级联外键）
    sqlx::migrate!("../../migrations").run(db.pool()).await?;
    info!("Database migrations applied");

    let state = AppState::new(db.pool().clone());

    // CORS 配置：通过 STUDENT_CORS_ORIGINS 环境变量控制允许的来源，
    // 默认放开（与原有开发环境行为一致），生产环境应设置为实际域名
    let allowed_origins =
        std::env::var("STUDENT_CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = if allowed_origins == "*" {
        if config.environment == "production" {
            warn!("STUDENT_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let db_for_ready = db.clone();
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .route("/health", get(health_check))
        .route("/ready", get(move || readiness_check(db_for_ready.clone())))
        .fallback(handlers::student::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 时停止接收新连接，
    // 等待已有请求处理完毕后排空连接池
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// 收到 SIGTERM（容器编排停止实例）或 Ctrl+C 后返回，
/// 触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// 存活探针：服务进程正常即返回 ok
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "student-records-service"
    }))
}

/// 就绪探针：检查数据库连接是否可用
async fn readiness_check(db: Database) -> Json<serde_json::Value> {
    let db_ok = db.health_check().await.is_ok();

    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "service": "student-records-service",
        "checks": {
            "database": if db_ok { "ok" } else { "fail" }
        }
    }))
}
