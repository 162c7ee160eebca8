//! 表单步骤定义
//!
//! 联动下拉框的每一步都要带上此前所有选择，服务器只认隐藏字段和显式字段。

use std::fmt::Display;

use crate::clients::FormFields;
use crate::config::FormProtocol;
use crate::error::{AppResult, ParseError};
use crate::models::{HiddenState, SelectionPath};

/// 回发步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 选择学院
    Institute,
    /// 选择学位
    Degree,
    /// 选择学期
    Semester,
    /// 选择考试批次
    ExamSchedule,
    /// 提交学号
    Submit,
}

/// 流程进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStage {
    Init,
    InstituteSelected,
    DegreeSelected,
    SemesterSelected,
    ExamSelected,
    Submitted,
}

impl Display for WalkStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WalkStage::Init => "初始页面",
            WalkStage::InstituteSelected => "已选学院",
            WalkStage::DegreeSelected => "已选学位",
            WalkStage::SemesterSelected => "已选学期",
            WalkStage::ExamSelected => "已选考试批次",
            WalkStage::Submitted => "已提交",
        };
        write!(f, "{}", name)
    }
}

impl Step {
    /// 下拉框联动的四步，按顺序执行
    pub const CASCADE: [Step; 4] = [
        Step::Institute,
        Step::Degree,
        Step::Semester,
        Step::ExamSchedule,
    ];

    /// 本步声明"发生变化"的控件
    pub fn event_target(self, protocol: &FormProtocol) -> &str {
        match self {
            Step::Institute => &protocol.institute_field,
            Step::Degree => &protocol.degree_field,
            Step::Semester => &protocol.semester_field,
            Step::ExamSchedule => &protocol.exam_field,
            Step::Submit => &protocol.submit_field,
        }
    }

    /// 本步成功后到达的阶段
    pub fn reached(self) -> WalkStage {
        match self {
            Step::Institute => WalkStage::InstituteSelected,
            Step::Degree => WalkStage::DegreeSelected,
            Step::Semester => WalkStage::SemesterSelected,
            Step::ExamSchedule => WalkStage::ExamSelected,
            Step::Submit => WalkStage::Submitted,
        }
    }

    /// 构建本步的请求
    ///
    /// 每次都新建覆盖字段表，包含到本步为止的全部选择
    pub fn request(self, protocol: &FormProtocol, path: &SelectionPath) -> StepRequest {
        let selections = [
            (&protocol.institute_field, &path.institute),
            (&protocol.degree_field, &path.degree),
            (&protocol.semester_field, &path.semester),
            (&protocol.exam_field, &path.exam),
        ];

        let depth = match self {
            Step::Institute => 1,
            Step::Degree => 2,
            Step::Semester => 3,
            Step::ExamSchedule | Step::Submit => 4,
        };

        let mut overrides: FormFields = selections
            .iter()
            .take(depth)
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();

        if self == Step::Submit {
            overrides.insert(protocol.enrollment_field.clone(), path.enrollment.clone());
            overrides.insert(protocol.submit_field.clone(), protocol.submit_value.clone());
        }

        StepRequest {
            event_target: self.event_target(protocol).to_string(),
            overrides,
        }
    }
}

/// 一次回发请求：触发控件 + 显式字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRequest {
    pub event_target: String,
    pub overrides: FormFields,
}

impl StepRequest {
    /// 组装完整的表单
    ///
    /// 隐藏字段快照 → event target / 空 event argument → 显式字段，后者覆盖前者
    pub fn build_form(&self, protocol: &FormProtocol, hidden: &HiddenState) -> AppResult<FormFields> {
        if self.event_target.trim().is_empty() {
            return Err(ParseError::EmptyEventTarget.into());
        }

        let mut form: FormFields = hidden
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        form.insert(
            protocol.event_target_field.clone(),
            self.event_target.clone(),
        );
        form.insert(protocol.event_argument_field.clone(), String::new());
        form.extend(
            self.overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Ok(form)
    }
}
