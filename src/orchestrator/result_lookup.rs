//! 成绩查询入口 - 编排层
//!
//! 对外唯一的查询能力：每次查询新建网络会话，跑完整个表单流程，交回结果

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clients::{probe_status, FormClient};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{FailureKind, LookupFailure, LookupOutcome, SelectionPath};
use crate::workflow::FormWalker;

/// 连通性检测结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    pub message: String,
}

/// 成绩查询服务
///
/// 本身不持有会话，可以被多个并发请求共享
pub struct ResultLookup {
    config: Config,
    walker: FormWalker,
}

impl ResultLookup {
    /// 创建新的查询服务
    pub fn new(config: Config) -> AppResult<Self> {
        let walker = FormWalker::new(config.protocol.clone())?;
        Ok(Self { config, walker })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 查询成绩
    ///
    /// # 参数
    /// - `institute`: 学院代码
    /// - `enrollment`: 学号
    /// - `degree`: 学位代码
    /// - `semester`: 学期
    /// - `exam`: 考试批次代码
    ///
    /// # 返回
    /// 成功（成绩表 + 学生信息）或失败（可读提示），不会返回中间状态
    pub async fn lookup_result(
        &self,
        institute: &str,
        enrollment: &str,
        degree: &str,
        semester: &str,
        exam: &str,
    ) -> LookupOutcome {
        let path = SelectionPath::new(institute, enrollment, degree, semester, exam);
        self.lookup(&path).await
    }

    /// 按选择路径查询成绩
    pub async fn lookup(&self, path: &SelectionPath) -> LookupOutcome {
        info!("{} 🔍 开始查询成绩", path);

        match FormClient::from_config(&self.config) {
            Ok(client) => self.walker.run(client, path).await,
            Err(e) => {
                warn!("{} ❌ 无法创建 HTTP 客户端: {}", path, e);
                LookupOutcome::Failure(LookupFailure::from(&e))
            }
        }
    }

    /// 检测大学服务器是否可达
    pub async fn test_connection(&self) -> ConnectionReport {
        info!("🌐 检测服务器连通性: {}", self.config.probe_url);

        match probe_status(&self.config.probe_url, self.config.probe_timeout).await {
            Ok(status) => {
                info!("✓ 服务器可达，状态码: {}", status);
                ConnectionReport {
                    success: true,
                    status_code: Some(status),
                    kind: None,
                    message: "Successfully connected to the university server".to_string(),
                }
            }
            Err(e) => {
                let failure = LookupFailure::from(&AppError::transport("连通性检测", e));
                warn!("⚠️ 服务器不可达: {}", failure.message);
                ConnectionReport {
                    success: false,
                    status_code: None,
                    kind: Some(failure.kind),
                    message: failure.message,
                }
            }
        }
    }
}
