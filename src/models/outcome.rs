//! 查询结果模型
//!
//! 一次查询只会得到两种结果：成功（成绩表 + 学生信息）或失败（可读的提示）。

use serde::{Deserialize, Serialize};

use crate::error::{AppError, TransportError};
use crate::models::StudentInfo;

/// 成绩表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    /// 每行的单元格文本（已去除首尾空白）
    pub rows: Vec<Vec<String>>,
    /// 表格原始 HTML
    pub html: String,
}

impl ResultTable {
    /// 以 "a | b | c" 的形式输出每一行
    pub fn to_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.join(" | ")).collect()
    }
}

/// 查询成功时的数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSheet {
    pub student_info: StudentInfo,
    pub results: ResultTable,
}

/// 失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 连接或读取超时
    TransportTimeout,
    /// 域名解析失败或连接被拒绝
    TransportUnreachable,
    /// 其他传输错误
    TransportError,
    /// 服务器没有返回成绩（带服务器提示或兜底提示）
    ResultNotFound,
    /// 查询过程中出现的其他异常
    Internal,
}

impl From<&TransportError> for FailureKind {
    fn from(err: &TransportError) -> Self {
        match err {
            TransportError::Timeout { .. } => FailureKind::TransportTimeout,
            TransportError::Unreachable { .. } => FailureKind::TransportUnreachable,
            TransportError::BadStatus { .. } | TransportError::Request { .. } => {
                FailureKind::TransportError
            }
        }
    }
}

/// 查询失败时的数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl LookupFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ResultNotFound, message)
    }
}

impl From<&AppError> for LookupFailure {
    fn from(err: &AppError) -> Self {
        let kind = match err {
            AppError::Transport { source, .. } => FailureKind::from(source),
            _ => FailureKind::Internal,
        };
        Self::new(kind, err.to_string())
    }
}

/// 一次查询的最终结果，生成后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Success(ResultSheet),
    Failure(LookupFailure),
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success(_))
    }

    pub fn sheet(&self) -> Option<&ResultSheet> {
        match self {
            LookupOutcome::Success(sheet) => Some(sheet),
            LookupOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LookupFailure> {
        match self {
            LookupOutcome::Success(_) => None,
            LookupOutcome::Failure(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_map_to_failure_kinds() {
        let timeout = AppError::transport(
            "ddlSem",
            TransportError::Timeout {
                detail: "timed out".to_string(),
            },
        );
        assert_eq!(
            LookupFailure::from(&timeout).kind,
            FailureKind::TransportTimeout
        );

        let refused = AppError::transport(
            "load",
            TransportError::Unreachable {
                detail: "dns error".to_string(),
            },
        );
        assert_eq!(
            LookupFailure::from(&refused).kind,
            FailureKind::TransportUnreachable
        );

        let status = AppError::transport("btnSearch", TransportError::BadStatus { status: 500 });
        assert_eq!(
            LookupFailure::from(&status).kind,
            FailureKind::TransportError
        );

        let other = AppError::Other("boom".to_string());
        assert_eq!(LookupFailure::from(&other).kind, FailureKind::Internal);
    }

    #[test]
    fn result_table_lines() {
        let table = ResultTable {
            rows: vec![
                vec!["Course".to_string(), "Grade".to_string()],
                vec!["CE351".to_string(), "AA".to_string()],
            ],
            html: String::new(),
        };
        assert_eq!(table.to_lines(), vec!["Course | Grade", "CE351 | AA"]);
    }
}
