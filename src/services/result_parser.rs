//! 成绩页解析服务 - 业务能力层
//!
//! 只负责"看懂最后一页"，不关心页面是怎么拿到的

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::FormProtocol;
use crate::error::{AppError, AppResult};
use crate::models::{ResultSheet, ResultTable, StudentField, StudentInfo};

/// 最后一页的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalPage {
    /// 找到了成绩表
    Results(ResultSheet),
    /// 没有成绩表，但服务器给出了提示信息
    Message(String),
    /// 两者都没有
    Unrecognized,
}

/// 成绩页解析器
///
/// 选择器在创建时按协议配置编译一次
pub struct ResultParser {
    table: Selector,
    message: Selector,
    row: Selector,
    cell: Selector,
    student_fields: Vec<(Selector, StudentField)>,
}

fn compile(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::invalid_selector(css, format!("{e:?}")))
}

fn by_id(tag: &str, id: &str) -> AppResult<Selector> {
    compile(&format!("{tag}[id=\"{id}\"]"))
}

/// 元素的全部文本，去除首尾空白
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// 单元格文本，连续空白压缩为一个空格
fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ResultParser {
    /// 按协议创建解析器
    pub fn new(protocol: &FormProtocol) -> AppResult<Self> {
        let student_fields = protocol
            .student_fields
            .iter()
            .map(|(id, field)| by_id("span", id).map(|selector| (selector, *field)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            table: by_id("table", &protocol.results_table_id)?,
            message: by_id("span", &protocol.message_id)?,
            row: compile("tr")?,
            cell: compile("td, th")?,
            student_fields,
        })
    }

    /// 对最后一页进行分类
    ///
    /// 成绩表优先；没有成绩表时看提示信息；都没有则是 `Unrecognized`
    pub fn classify(&self, body: &str) -> TerminalPage {
        let document = Html::parse_document(body);

        if let Some(results) = self.extract_table(&document) {
            let student_info = self.extract_student_info(&document);
            debug!(
                "成绩表共 {} 行，学生信息 {} 项",
                results.rows.len(),
                student_info.len()
            );
            return TerminalPage::Results(ResultSheet {
                student_info,
                results,
            });
        }

        match document.select(&self.message).next().map(element_text) {
            Some(text) if !text.is_empty() => TerminalPage::Message(text),
            _ => TerminalPage::Unrecognized,
        }
    }

    /// 提取成绩表，表格不存在或没有任何单元格时返回 None
    fn extract_table(&self, document: &Html) -> Option<ResultTable> {
        let table = document.select(&self.table).next()?;

        let rows: Vec<Vec<String>> = table
            .select(&self.row)
            .map(|row| row.select(&self.cell).map(cell_text).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();

        if rows.is_empty() {
            return None;
        }

        Some(ResultTable {
            rows,
            html: table.html(),
        })
    }

    /// 尽力提取学生信息，缺失或为空的字段直接跳过
    fn extract_student_info(&self, document: &Html) -> StudentInfo {
        let mut info = StudentInfo::default();
        for (selector, field) in &self.student_fields {
            if let Some(text) = document.select(selector).next().map(element_text) {
                if !text.is_empty() {
                    info.set(*field, text);
                }
            }
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ResultParser {
        ResultParser::new(&FormProtocol::default()).unwrap()
    }

    const RESULT_PAGE: &str = r#"
        <html><body>
            <span id="uclGrd1_lblStudentName">  ASHA   PATEL </span>
            <span id="lblEnrNo">22DCS018</span>
            <span id="lblSGPA">8.50</span>
            <span id="lblCGPA"></span>
            <span id="lblProgram">   </span>
            <table id="uclGrd1_grdResult">
                <tr><th>Course Code</th><th>Course Name</th><th>Grade</th></tr>
                <tr><td>CE351</td><td> Design &amp;
                    Analysis of Algorithms </td><td>AA</td></tr>
                <tr><td>CE352</td><td>Computer Networks</td><td>AB</td></tr>
            </table>
        </body></html>
    "#;

    #[test]
    fn result_table_is_success() {
        let TerminalPage::Results(sheet) = parser().classify(RESULT_PAGE) else {
            panic!("expected results");
        };

        assert_eq!(sheet.results.rows.len(), 3);
        assert_eq!(sheet.results.rows[0], vec!["Course Code", "Course Name", "Grade"]);
        assert_eq!(
            sheet.results.rows[1],
            vec!["CE351", "Design & Analysis of Algorithms", "AA"]
        );
        assert!(sheet.results.html.starts_with("<table"));
        assert!(sheet.results.html.contains("uclGrd1_grdResult"));

        assert_eq!(sheet.student_info.sgpa.as_deref(), Some("8.50"));
        assert_eq!(sheet.student_info.enrollment.as_deref(), Some("22DCS018"));
        assert_eq!(sheet.student_info.name.as_deref(), Some("ASHA   PATEL"));
    }

    #[test]
    fn blank_and_missing_attributes_are_omitted() {
        let TerminalPage::Results(sheet) = parser().classify(RESULT_PAGE) else {
            panic!("expected results");
        };

        // lblCGPA / lblProgram 为空，其余不存在
        assert_eq!(sheet.student_info.cgpa, None);
        assert_eq!(sheet.student_info.program, None);
        assert_eq!(sheet.student_info.institute, None);
        assert_eq!(sheet.student_info.len(), 3);
    }

    #[test]
    fn message_span_is_failure_text() {
        let html = r#"<html><body>
            <span id="lblmsg">
                Result not declared for selected exam.
            </span>
        </body></html>"#;

        assert_eq!(
            parser().classify(html),
            TerminalPage::Message("Result not declared for selected exam.".to_string())
        );
    }

    #[test]
    fn empty_table_falls_through_to_message() {
        let html = r#"<html><body>
            <table id="uclGrd1_grdResult"></table>
            <span id="lblmsg">Invalid Enrollment No.</span>
        </body></html>"#;

        assert_eq!(
            parser().classify(html),
            TerminalPage::Message("Invalid Enrollment No.".to_string())
        );
    }

    #[test]
    fn nothing_recognizable() {
        let html = r#"<html><body>
            <span id="lblmsg">   </span>
            <table id="someOtherGrid"><tr><td>x</td></tr></table>
        </body></html>"#;

        assert_eq!(parser().classify(html), TerminalPage::Unrecognized);
        assert_eq!(parser().classify(""), TerminalPage::Unrecognized);
    }

    #[test]
    fn ids_come_from_protocol() {
        let protocol = FormProtocol {
            message_id: "lblError".to_string(),
            ..FormProtocol::default()
        };
        let parser = ResultParser::new(&protocol).unwrap();

        let html = r#"<span id="lblmsg">old</span><span id="lblError">new</span>"#;
        assert_eq!(
            parser.classify(html),
            TerminalPage::Message("new".to_string())
        );
    }

    #[test]
    fn bad_element_id_is_rejected() {
        let protocol = FormProtocol {
            results_table_id: "grid\"]".to_string(),
            ..FormProtocol::default()
        };
        assert!(matches!(
            ResultParser::new(&protocol),
            Err(AppError::Parse(_))
        ));
    }
}
