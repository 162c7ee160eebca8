//! 表单遍历流程 - 流程层
//!
//! 核心职责：定义"一次成绩查询"的完整请求链
//!
//! 流程顺序：
//! 1. GET 页面，拿到第一份隐藏字段
//! 2. 学院 → 学位 → 学期 → 考试批次，四次回发
//! 3. 提交学号
//! 4. 解析最后一页：成绩表 / 提示信息 / 兜底提示

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::clients::FormTransport;
use crate::config::FormProtocol;
use crate::error::{AppError, AppResult};
use crate::infrastructure::SessionState;
use crate::models::{LookupFailure, LookupOutcome, SelectionPath};
use crate::services::{ResultParser, TerminalPage};
use crate::utils::logging::truncate_text;
use crate::workflow::step::{Step, StepRequest, WalkStage};

/// 表单遍历流程
///
/// - 编排固定顺序的回发请求
/// - 不持有网络会话，会话由每次查询单独创建
/// - 任何一步传输失败立即停止，不重试
pub struct FormWalker {
    protocol: FormProtocol,
    parser: ResultParser,
}

impl FormWalker {
    /// 创建新的表单遍历流程
    pub fn new(protocol: FormProtocol) -> AppResult<Self> {
        let parser = ResultParser::new(&protocol)?;
        Ok(Self { protocol, parser })
    }

    pub fn protocol(&self) -> &FormProtocol {
        &self.protocol
    }

    /// 用给定的传输会话完成一次查询
    ///
    /// 这是查询的边界：所有错误（包括 panic）都在这里转换成失败结果
    pub async fn run<T>(&self, transport: T, path: &SelectionPath) -> LookupOutcome
    where
        T: FormTransport + Send,
    {
        let mut session = SessionState::new(transport);

        let walked = AssertUnwindSafe(self.walk(&mut session, path))
            .catch_unwind()
            .await;

        match walked {
            Ok(Ok(page)) => self.resolve(path, page),
            Ok(Err(e)) => {
                error!("{} ❌ 查询失败: {}", path, e);
                LookupOutcome::Failure(LookupFailure::from(&e))
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "未知异常".to_string());
                error!("{} ❌ 查询过程中出现异常: {}", path, reason);
                LookupOutcome::Failure(LookupFailure::from(&AppError::Other(reason)))
            }
        }
    }

    /// 执行完整的请求链，返回最后一页的分类
    pub async fn walk<T>(
        &self,
        session: &mut SessionState<T>,
        path: &SelectionPath,
    ) -> AppResult<TerminalPage>
    where
        T: FormTransport + Send,
    {
        info!("{} 📄 正在加载查询页面...", path);
        let body = session
            .transport_mut()
            .load()
            .await
            .map_err(|e| AppError::transport("加载页面", e))?;
        session.absorb(&body);
        debug!(
            "{} 阶段: {}，隐藏字段: {:?}",
            path,
            WalkStage::Init,
            session.hidden().names()
        );

        for step in Step::CASCADE {
            self.log_step(path, step);
            let request = step.request(&self.protocol, path);
            self.postback(session, &request).await?;
            debug!("{} 阶段: {}", path, step.reached());
        }

        info!("{} 📤 正在提交学号...", path);
        let request = Step::Submit.request(&self.protocol, path);
        let body = self.postback(session, &request).await?;
        debug!("{} 阶段: {}", path, Step::Submit.reached());

        Ok(self.parser.classify(&body))
    }

    /// 执行一次回发
    ///
    /// 成功后用响应中的隐藏字段整体替换快照，并返回响应正文
    pub async fn postback<T>(
        &self,
        session: &mut SessionState<T>,
        request: &StepRequest,
    ) -> AppResult<String>
    where
        T: FormTransport + Send,
    {
        let form = request.build_form(&self.protocol, session.hidden())?;

        let body = session
            .transport_mut()
            .submit(&form)
            .await
            .map_err(|e| AppError::transport(request.event_target.clone(), e))?;

        debug!(
            "回发 {} 响应: {}",
            request.event_target,
            truncate_text(&body, 120)
        );

        session.absorb(&body);
        Ok(body)
    }

    /// 把最后一页的分类转换为对外结果，`Unrecognized` 一律给兜底提示
    fn resolve(&self, path: &SelectionPath, page: TerminalPage) -> LookupOutcome {
        match page {
            TerminalPage::Results(sheet) => {
                info!(
                    "{} ✅ 查询成功，成绩表 {} 行",
                    path,
                    sheet.results.rows.len()
                );
                LookupOutcome::Success(sheet)
            }
            TerminalPage::Message(message) => {
                warn!("{} ⚠️ 服务器提示: {}", path, message);
                LookupOutcome::Failure(LookupFailure::not_found(message))
            }
            TerminalPage::Unrecognized => {
                warn!("{} ⚠️ 页面中既没有成绩表也没有提示信息", path);
                LookupOutcome::Failure(LookupFailure::not_found(
                    self.protocol.fallback_message.clone(),
                ))
            }
        }
    }

    // ========== 日志辅助方法 ==========

    fn log_step(&self, path: &SelectionPath, step: Step) {
        match step {
            Step::Institute => info!("{} 🏫 选择学院: {}", path, path.institute),
            Step::Degree => info!("{} 🎓 选择学位: {}", path, path.degree),
            Step::Semester => info!("{} 📚 选择学期: {}", path, path.semester),
            Step::ExamSchedule => info!("{} 🗓️ 选择考试批次: {}", path, path.exam),
            Step::Submit => {}
        }
    }
}
