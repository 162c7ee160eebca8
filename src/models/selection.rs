use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// 一次成绩查询的完整选择路径
///
/// 学院 → 学位 → 学期 → 考试批次 → 学号。代码原样透传，不做校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPath {
    /// 学院代码，例如 "21"
    pub institute: String,
    /// 学号，例如 "22DCS018"
    pub enrollment: String,
    /// 学位代码，例如 "134"
    pub degree: String,
    /// 学期，例如 "5"
    pub semester: String,
    /// 考试批次代码，例如 "7148"
    pub exam: String,
}

impl SelectionPath {
    pub fn new(
        institute: impl Into<String>,
        enrollment: impl Into<String>,
        degree: impl Into<String>,
        semester: impl Into<String>,
        exam: impl Into<String>,
    ) -> Self {
        Self {
            institute: institute.into(),
            enrollment: enrollment.into(),
            degree: degree.into(),
            semester: semester.into(),
            exam: exam.into(),
        }
    }
}

impl Display for SelectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[学号 {}]", self.enrollment)
    }
}
