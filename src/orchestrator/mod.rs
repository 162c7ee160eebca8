//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是查询能力的唯一入口，HTTP 服务和命令行都只调用这里。
//!
//! ### `result_lookup` - 成绩查询服务
//! - 每次查询新建 `FormClient`（独立 cookie）
//! - 交给 `FormWalker` 跑完整个表单流程
//! - 提供连通性检测
//!
//! ## 层次关系
//!
//! ```text
//! api / main (适配层：校验输入、格式化输出)
//!     ↓
//! orchestrator::ResultLookup (每次查询一个会话)
//!     ↓
//! workflow::FormWalker (固定顺序的回发请求)
//!     ↓
//! services (能力层：解析成绩页)
//!     ↓
//! infrastructure (基础设施：SessionState) → clients (FormClient)
//! ```

pub mod result_lookup;

pub use result_lookup::{ConnectionReport, ResultLookup};
