use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 某一步请求在传输层失败
    #[error("{step} 请求失败: {source}")]
    Transport {
        step: String,
        #[source]
        source: TransportError,
    },
    /// 页面解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 传输层错误
///
/// 只描述"请求为什么没有拿到页面"，不关心是哪一步
#[derive(Debug, Error)]
pub enum TransportError {
    /// 连接或读取超时
    #[error("连接大学服务器超时: {detail}")]
    Timeout { detail: String },
    /// 域名解析失败或无法建立连接
    #[error("无法连接到大学服务器，请检查网络或 DNS 设置: {detail}")]
    Unreachable { detail: String },
    /// 服务器返回了非成功状态码
    #[error("服务器返回异常状态码: {status}")]
    BadStatus { status: u16 },
    /// 其他传输错误
    #[error("连接错误: {detail}")]
    Request { detail: String },
}

/// 页面解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// CSS 选择器无法解析（通常是协议配置里的元素 ID 不合法）
    #[error("无效的选择器 '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
    /// 回发请求缺少 event target
    #[error("回发请求的 event target 不能为空")]
    EmptyEventTarget,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {detail}")]
    ClientBuildFailed { detail: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                detail: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Unreachable {
                detail: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            TransportError::BadStatus {
                status: status.as_u16(),
            }
        } else {
            TransportError::Request {
                detail: err.to_string(),
            }
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // 从字符串解析时没有路径
            source: err,
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建某一步的传输错误
    pub fn transport(step: impl Into<String>, source: TransportError) -> Self {
        AppError::Transport {
            step: step.into(),
            source,
        }
    }

    /// 创建选择器解析错误
    pub fn invalid_selector(selector: impl Into<String>, message: impl ToString) -> Self {
        AppError::Parse(ParseError::InvalidSelector {
            selector: selector.into(),
            message: message.to_string(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_keeps_step_in_message() {
        let err = AppError::transport(
            "ddlSem",
            TransportError::Timeout {
                detail: "operation timed out".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("ddlSem"));
        assert!(msg.contains("超时"));
    }

    #[test]
    fn parse_error_converts_into_app_error() {
        let err: AppError = ParseError::EmptyEventTarget.into();
        assert!(matches!(err, AppError::Parse(ParseError::EmptyEventTarget)));
    }
}
