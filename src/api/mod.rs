//! HTTP 接口模块
//!
//! 只做适配：校验输入、调用 `ResultLookup`、格式化输出。不包含任何表单流程逻辑。

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::orchestrator::ResultLookup;

pub use types::{ResultEnvelope, ResultRequest};

/// 构建路由
pub fn router(lookup: Arc<ResultLookup>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/info", get(handlers::info))
        .route("/api/get_result", post(handlers::get_result))
        .route("/api/test_connection", get(handlers::test_connection))
        .layer(TraceLayer::new_for_http())
        .with_state(lookup)
}

/// 监听地址并提供服务，收到 Ctrl+C 后优雅退出
pub async fn serve(lookup: Arc<ResultLookup>, bind_addr: &str) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Other(format!("无法监听 {}: {}", bind_addr, e)))?;

    info!("🌐 HTTP 服务已启动: http://{}", bind_addr);

    axum::serve(listener, router(lookup))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(format!("HTTP 服务异常退出: {}", e)))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // 无法监听信号时一直运行
        std::future::pending::<()>().await;
    }
    info!("🛑 收到退出信号，正在关闭服务...");
}
