//! HTTP 接口的请求 / 响应结构

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{FailureKind, LookupOutcome, ResultTable, SelectionPath, StudentInfo};

/// `POST /api/get_result` 请求体
///
/// 各字段接受字符串或数字，原样转成字符串透传
#[derive(Debug, Default, Deserialize)]
pub struct ResultRequest {
    pub institute: Option<Value>,
    pub enrollment: Option<Value>,
    pub degree: Option<Value>,
    pub semester: Option<Value>,
    pub exam: Option<Value>,
}

fn code(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl ResultRequest {
    /// 转换为选择路径，缺少参数时返回缺少的参数名
    pub fn into_path(self) -> Result<SelectionPath, Vec<&'static str>> {
        let fields = [
            ("institute", code(self.institute)),
            ("enrollment", code(self.enrollment)),
            ("degree", code(self.degree)),
            ("semester", code(self.semester)),
            ("exam", code(self.exam)),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let [institute, enrollment, degree, semester, exam] =
            fields.map(|(_, v)| v.unwrap_or_default());
        Ok(SelectionPath {
            institute,
            enrollment,
            degree,
            semester,
            exam,
        })
    }
}

/// 统一的 JSON 响应外壳
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultEnvelope {
    Success {
        success: bool,
        student_info: StudentInfo,
        results: ResultTable,
    },
    Failure {
        success: bool,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<FailureKind>,
    },
}

impl ResultEnvelope {
    /// 请求本身有问题时的响应
    pub fn error(message: impl Into<String>) -> Self {
        ResultEnvelope::Failure {
            success: false,
            error: message.into(),
            kind: None,
        }
    }
}

impl From<LookupOutcome> for ResultEnvelope {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Success(sheet) => ResultEnvelope::Success {
                success: true,
                student_info: sheet.student_info,
                results: sheet.results,
            },
            LookupOutcome::Failure(failure) => ResultEnvelope::Failure {
                success: false,
                error: failure.message,
                kind: Some(failure.kind),
            },
        }
    }
}
