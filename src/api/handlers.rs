use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api::types::{ResultEnvelope, ResultRequest};
use crate::orchestrator::{ConnectionReport, ResultLookup};

// ============================================================================
// 查询成绩
// ============================================================================

pub async fn get_result(
    State(lookup): State<Arc<ResultLookup>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ResultEnvelope>) {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!("📥 POST /api/get_result - 请求体无效: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(ResultEnvelope::error(format!(
                    "Invalid JSON body: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let request: ResultRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ResultEnvelope::error(format!("Invalid request: {}", e))),
            );
        }
    };

    let path = match request.into_path() {
        Ok(path) => path,
        Err(missing) => {
            warn!("📥 POST /api/get_result - 缺少参数: {:?}", missing);
            return (
                StatusCode::BAD_REQUEST,
                Json(ResultEnvelope::error(format!(
                    "Missing required parameters: {}",
                    missing.join(", ")
                ))),
            );
        }
    };

    info!("📥 POST /api/get_result - {}", path);
    let outcome = lookup.lookup(&path).await;

    (StatusCode::OK, Json(outcome.into()))
}

// ============================================================================
// 连通性检测
// ============================================================================

pub async fn test_connection(State(lookup): State<Arc<ResultLookup>>) -> Json<ConnectionReport> {
    info!("📥 GET /api/test_connection");
    Json(lookup.test_connection().await)
}

// ============================================================================
// 接口说明
// ============================================================================

pub async fn info() -> Json<Value> {
    Json(json!({
        "name": "University Result Lookup API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Fetches student results from the university result portal",
        "endpoints": [
            {
                "path": "/api/get_result",
                "method": "POST",
                "description": "Fetch student results",
                "params": {
                    "institute": "Institute code (e.g., '21')",
                    "enrollment": "Student enrollment number (e.g., '22DCS018')",
                    "degree": "Degree code (e.g., '134')",
                    "semester": "Semester number (e.g., '5')",
                    "exam": "Exam code (e.g., '7148')"
                }
            },
            {
                "path": "/api/test_connection",
                "method": "GET",
                "description": "Test connection to the university server"
            }
        ]
    }))
}

pub async fn home() -> Html<&'static str> {
    Html(
        r#"<html>
    <head><title>University Result API</title></head>
    <body>
        <h1>University Result API</h1>
        <p>Fetch student results from the university result portal.</p>
        <ul>
            <li><code>GET /api/info</code> - API information</li>
            <li><code>POST /api/get_result</code> - fetch a result</li>
            <li><code>GET /api/test_connection</code> - check connectivity to the university server</li>
        </ul>
        <pre>
curl -X POST http://localhost:5000/api/get_result \
     -H "Content-Type: application/json" \
     -d '{"institute": "21", "enrollment": "22DCS018", "degree": "134", "semester": "5", "exam": "7148"}'
        </pre>
    </body>
</html>"#,
    )
}
