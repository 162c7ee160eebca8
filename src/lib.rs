//! # Uni Result Fetch
//!
//! 从大学成绩查询页面自动获取学生成绩的 Rust 应用程序
//!
//! 查询页面是服务端渲染的 postback 表单：每一步都要回传服务器下发的隐藏字段，
//! 并带上此前所有的下拉框选择（学院 → 学位 → 学期 → 考试批次），最后提交学号。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `clients/` - `FormClient`，基于 reqwest 的表单传输（cookie、超时、错误归类）
//! - `infrastructure/` - `SessionState`，一次查询独占的会话 + 隐藏字段快照
//!
//! ### ② 业务能力层（Services）
//! - `services/` - `ResultParser`，识别最后一页是成绩表、提示信息还是都没有
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `FormWalker`，固定顺序的回发请求链，`Step` 描述每一步的字段
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - `ResultLookup`，每次查询新建会话，对外的唯一入口
//!
//! ### 适配层
//! - `api/` - axum HTTP 接口
//! - `main.rs` - 命令行（单次查询 / 启动服务）
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{FormClient, FormTransport};
pub use config::{Config, FormProtocol};
pub use error::{AppError, AppResult};
pub use infrastructure::SessionState;
pub use models::{FailureKind, LookupFailure, LookupOutcome, SelectionPath, StudentInfo};
pub use orchestrator::{ConnectionReport, ResultLookup};
pub use workflow::{FormWalker, Step};
