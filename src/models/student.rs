use serde::{Deserialize, Serialize};

/// 成绩页上可识别的学生信息字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentField {
    /// 姓名
    Name,
    /// 学号
    Enrollment,
    /// 注册号
    RegistrationNumber,
    /// 考试批次
    ExamSchedule,
    Sgpa,
    Cgpa,
    /// 总学分
    TotalCredits,
    /// 专业
    Program,
    /// 学期
    Semester,
    /// 学院
    Institute,
}

/// 学生信息
///
/// 所有字段都是尽力提取：页面上没有或为空的字段保持 `None`，序列化时直接省略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sgpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_credits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
}

impl StudentInfo {
    fn slot(&mut self, field: StudentField) -> &mut Option<String> {
        match field {
            StudentField::Name => &mut self.name,
            StudentField::Enrollment => &mut self.enrollment,
            StudentField::RegistrationNumber => &mut self.registration_number,
            StudentField::ExamSchedule => &mut self.exam_schedule,
            StudentField::Sgpa => &mut self.sgpa,
            StudentField::Cgpa => &mut self.cgpa,
            StudentField::TotalCredits => &mut self.total_credits,
            StudentField::Program => &mut self.program,
            StudentField::Semester => &mut self.semester,
            StudentField::Institute => &mut self.institute,
        }
    }

    /// 设置字段值
    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        *self.slot(field) = Some(value.into());
    }

    /// 已提取到的字段数量
    pub fn len(&self) -> usize {
        [
            &self.name,
            &self.enrollment,
            &self.registration_number,
            &self.exam_schedule,
            &self.sgpa,
            &self.cgpa,
            &self.total_credits,
            &self.program,
            &self.semester,
            &self.institute,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_not_serialized() {
        let mut info = StudentInfo::default();
        info.set(StudentField::Sgpa, "8.50");
        info.set(StudentField::Name, "ASHA PATEL");

        let value = serde_json::to_value(&info).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["sgpa"], "8.50");
        assert!(!object.contains_key("cgpa"));
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn field_names_are_snake_case() {
        let field: StudentField = serde_json::from_str("\"registration_number\"").unwrap();
        assert_eq!(field, StudentField::RegistrationNumber);
    }
}
