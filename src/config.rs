//! 程序配置
//!
//! `Config` 描述运行环境（地址、超时、日志），`FormProtocol` 描述成绩查询表单本身的
//! 字段名和元素 ID。表单协议来自第三方网站，只能照抄，不能推断，所以允许用 TOML 覆盖。

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::StudentField;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 成绩查询页面地址（GET 和所有 POST 都发往这里）
    pub result_url: String,
    /// 连通性检测地址
    pub probe_url: String,
    /// 连接超时
    pub connect_timeout: Duration,
    /// 单次请求总超时
    pub request_timeout: Duration,
    /// 连通性检测超时
    pub probe_timeout: Duration,
    /// HTTP 服务监听地址
    pub bind_addr: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 表单协议常量
    pub protocol: FormProtocol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            result_url: "https://charusat.edu.in:912/UniExamResult/frmUniversityResult.aspx"
                .to_string(),
            probe_url: "https://charusat.edu.in:912".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            bind_addr: "0.0.0.0:5000".to_string(),
            verbose_logging: false,
            protocol: FormProtocol::default(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    ///
    /// 设置了但无法解析的值会返回错误，而不是悄悄回退
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();

        let protocol = match std::env::var("PROTOCOL_FILE").ok() {
            Some(path) => FormProtocol::load_from_file(Path::new(&path))?,
            None => default.protocol,
        };

        Ok(Self {
            result_url: std::env::var("RESULT_URL").unwrap_or(default.result_url),
            probe_url: std::env::var("PROBE_URL").unwrap_or(default.probe_url),
            connect_timeout: Duration::from_secs(parse_env_value(
                "CONNECT_TIMEOUT_SECS",
                std::env::var("CONNECT_TIMEOUT_SECS").ok(),
                default.connect_timeout.as_secs(),
            )?),
            request_timeout: Duration::from_secs(parse_env_value(
                "REQUEST_TIMEOUT_SECS",
                std::env::var("REQUEST_TIMEOUT_SECS").ok(),
                default.request_timeout.as_secs(),
            )?),
            probe_timeout: default.probe_timeout,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            verbose_logging: parse_env_value(
                "VERBOSE_LOGGING",
                std::env::var("VERBOSE_LOGGING").ok(),
                default.verbose_logging,
            )?,
            protocol,
        })
    }
}

/// 解析单个环境变量值
fn parse_env_value<T: FromStr>(var_name: &str, raw: Option<String>, default: T) -> AppResult<T> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value: value.clone(),
                expected_type: std::any::type_name::<T>().to_string(),
            })
        }),
    }
}

/// 成绩查询表单的协议常量
///
/// 默认值对应线上表单；TOML 中缺省的键沿用默认值
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormProtocol {
    pub event_target_field: String,
    pub event_argument_field: String,
    pub institute_field: String,
    pub degree_field: String,
    pub semester_field: String,
    pub exam_field: String,
    pub enrollment_field: String,
    /// 提交按钮的字段名，同时也是最后一步的 event target
    pub submit_field: String,
    pub submit_value: String,
    /// 成绩表格的元素 ID
    pub results_table_id: String,
    /// 错误提示的元素 ID
    pub message_id: String,
    /// 既没有成绩表也没有提示信息时返回的文本
    pub fallback_message: String,
    /// span ID → 学生信息字段
    pub student_fields: BTreeMap<String, StudentField>,
}

impl Default for FormProtocol {
    fn default() -> Self {
        let student_fields = [
            ("uclGrd1_lblStudentName", StudentField::Name),
            ("lblEnrNo", StudentField::Enrollment),
            ("lblRegNo", StudentField::RegistrationNumber),
            ("lblExamSchedule", StudentField::ExamSchedule),
            ("lblSGPA", StudentField::Sgpa),
            ("lblCGPA", StudentField::Cgpa),
            ("lblTotalCredits", StudentField::TotalCredits),
            ("lblProgram", StudentField::Program),
            ("lblSem", StudentField::Semester),
            ("lblInstitute", StudentField::Institute),
        ]
        .into_iter()
        .map(|(id, field)| (id.to_string(), field))
        .collect();

        Self {
            event_target_field: "__EVENTTARGET".to_string(),
            event_argument_field: "__EVENTARGUMENT".to_string(),
            institute_field: "ddlInst".to_string(),
            degree_field: "ddlDegree".to_string(),
            semester_field: "ddlSem".to_string(),
            exam_field: "ddlScheduleExam".to_string(),
            enrollment_field: "txtEnrNo".to_string(),
            submit_field: "btnSearch".to_string(),
            submit_value: "Show Marksheet".to_string(),
            results_table_id: "uclGrd1_grdResult".to_string(),
            message_id: "lblmsg".to_string(),
            fallback_message: "Result not found. Try again later or verify the details."
                .to_string(),
            student_fields,
        }
    }
}

impl FormProtocol {
    /// 从 TOML 字符串解析协议
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 从 TOML 文件加载协议
    pub fn load_from_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(display.clone(), e))?;

        toml::from_str(&content).map_err(|e| {
            AppError::File(crate::error::FileError::TomlParseFailed {
                path: display,
                source: e,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_protocol_matches_live_form() {
        let protocol = FormProtocol::default();
        assert_eq!(protocol.institute_field, "ddlInst");
        assert_eq!(protocol.exam_field, "ddlScheduleExam");
        assert_eq!(protocol.submit_field, "btnSearch");
        assert_eq!(protocol.results_table_id, "uclGrd1_grdResult");
        assert_eq!(protocol.student_fields.len(), 10);
        assert_eq!(protocol.student_fields["lblSGPA"], StudentField::Sgpa);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let protocol = FormProtocol::from_toml_str(
            r#"
            message_id = "lblError"
            fallback_message = "Nothing here"

            [student_fields]
            lblName = "name"
            "#,
        )
        .unwrap();

        assert_eq!(protocol.message_id, "lblError");
        assert_eq!(protocol.fallback_message, "Nothing here");
        assert_eq!(protocol.institute_field, "ddlInst");
        assert_eq!(protocol.student_fields.len(), 1);
        assert_eq!(protocol.student_fields["lblName"], StudentField::Name);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let result = FormProtocol::from_toml_str("student_fields = 3");
        assert!(matches!(result, Err(AppError::File(_))));
    }

    #[test]
    fn env_value_parsing() {
        assert_eq!(parse_env_value("X", None, 5u64).unwrap(), 5);
        assert_eq!(parse_env_value("X", Some(" 12 ".to_string()), 5u64).unwrap(), 12);
        assert!(parse_env_value("X", Some("true".to_string()), false).unwrap());

        let err = parse_env_value("CONNECT_TIMEOUT_SECS", Some("soon".to_string()), 5u64)
            .unwrap_err();
        assert!(err.to_string().contains("CONNECT_TIMEOUT_SECS"));
    }
}
