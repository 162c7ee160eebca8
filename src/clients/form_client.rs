/// 表单 HTTP 客户端
///
/// 封装与成绩查询页面之间的 GET / POST，负责 cookie、超时和错误归类
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, TransportError};

/// 一次表单提交的全部字段
pub type FormFields = BTreeMap<String, String>;

/// 表单传输能力
///
/// 一个实现对应一个网络会话（cookie、连接复用），并且绑定一个固定的页面地址
pub trait FormTransport {
    /// GET 页面，返回响应正文
    fn load(&mut self) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// 以 form-urlencoded 方式 POST 字段，返回响应正文
    fn submit(
        &mut self,
        fields: &FormFields,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// 基于 reqwest 的表单客户端
///
/// 每个实例拥有独立的 cookie 存储，不要在两次查询之间复用
pub struct FormClient {
    client: reqwest::Client,
    url: String,
}

impl FormClient {
    /// 创建新的表单客户端
    ///
    /// # 参数
    /// - `url`: 表单页面地址
    /// - `connect_timeout`: 连接超时
    /// - `request_timeout`: 单次请求总超时
    pub fn new(
        url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::Config(ConfigError::ClientBuildFailed {
                    detail: e.to_string(),
                })
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// 按配置创建客户端
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.result_url.clone(),
            config.connect_timeout,
            config.request_timeout,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// 读取响应正文，非 2xx 视为传输错误
async fn read_body(response: reqwest::Response) -> Result<String, TransportError> {
    let response = response.error_for_status()?;
    let body = response.text().await?;
    debug!("收到响应，正文长度: {} 字节", body.len());
    Ok(body)
}

impl FormTransport for FormClient {
    async fn load(&mut self) -> Result<String, TransportError> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        read_body(response).await
    }

    async fn submit(&mut self, fields: &FormFields) -> Result<String, TransportError> {
        debug!("POST {} ({} 个字段)", self.url, fields.len());
        let response = self.client.post(&self.url).form(fields).send().await?;
        read_body(response).await
    }
}

/// 检测服务器是否可达
///
/// 只要服务器有响应就算可达，返回 HTTP 状态码
pub async fn probe_status(url: &str, timeout: Duration) -> Result<u16, TransportError> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| TransportError::Request {
            detail: e.to_string(),
        })?;

    let response = client.get(url).send().await?;
    Ok(response.status().as_u16())
}
