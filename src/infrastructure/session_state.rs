//! 会话状态 - 基础设施层
//!
//! 持有一次查询独占的网络会话和当前的隐藏字段快照

use scraper::{ElementRef, Html};

use crate::clients::FormTransport;
use crate::models::HiddenState;

/// 会话状态
///
/// 职责：
/// - 持有唯一的传输会话（cookie、连接）
/// - 持有最近一次响应的隐藏字段快照
/// - 不认识学院 / 学位 / 学期
/// - 不处理流程顺序
///
/// 每次查询新建一个，查询结束即丢弃
pub struct SessionState<T> {
    transport: T,
    hidden: HiddenState,
}

impl<T: FormTransport> SessionState<T> {
    /// 创建新的会话状态，快照为空
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            hidden: HiddenState::new(),
        }
    }

    /// 当前隐藏字段快照
    pub fn hidden(&self) -> &HiddenState {
        &self.hidden
    }

    /// 用新快照整体替换旧快照
    pub fn replace(&mut self, snapshot: HiddenState) {
        self.hidden = snapshot;
    }

    /// 用响应正文中的隐藏字段刷新快照
    pub fn absorb(&mut self, body: &str) {
        self.replace(extract_hidden_fields_from_str(body));
    }

    /// 获取传输会话（用于发请求）
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// 取回传输会话
    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// 提取页面中所有 `type="hidden"` 的 input
///
/// 没有 value 的按空字符串处理；没有 name 的无法回传，直接跳过。
/// 一个都没有时返回空快照，不算错误。
pub fn extract_hidden_fields(document: &Html) -> HiddenState {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name().eq_ignore_ascii_case("input"))
        .filter(|el| {
            el.value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden"))
        })
        .filter_map(|el| {
            let name = el.value().attr("name")?;
            Some((name, el.value().attr("value").unwrap_or("")))
        })
        .collect()
}

/// 解析正文并提取隐藏字段
///
/// 文档在函数内解析并释放，不跨越 await
pub fn extract_hidden_fields_from_str(body: &str) -> HiddenState {
    extract_hidden_fields(&Html::parse_document(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::FormFields;
    use crate::error::TransportError;

    struct NoopTransport;

    impl FormTransport for NoopTransport {
        async fn load(&mut self) -> Result<String, TransportError> {
            Ok(String::new())
        }

        async fn submit(&mut self, _fields: &FormFields) -> Result<String, TransportError> {
            Ok(String::new())
        }
    }

    #[test]
    fn extracts_hidden_inputs_only() {
        let html = r#"
            <html><body><form>
                <input type="hidden" name="__VIEWSTATE" value="abc123" />
                <input type="HIDDEN" name="__EVENTVALIDATION" value="xyz" />
                <input type="hidden" name="__LASTFOCUS" />
                <input type="text" name="txtEnrNo" value="22DCS018" />
                <input type="hidden" value="orphan" />
                <select name="ddlInst"><option value="21">DEPSTAR</option></select>
            </form></body></html>
        "#;

        let hidden = extract_hidden_fields_from_str(html);

        assert_eq!(hidden.len(), 3);
        assert_eq!(hidden.get("__VIEWSTATE"), Some("abc123"));
        assert_eq!(hidden.get("__EVENTVALIDATION"), Some("xyz"));
        assert_eq!(hidden.get("__LASTFOCUS"), Some(""));
        assert_eq!(hidden.get("txtEnrNo"), None);
    }

    #[test]
    fn page_without_hidden_inputs_gives_empty_snapshot() {
        let hidden = extract_hidden_fields_from_str("<html><body><p>down</p></body></html>");
        assert!(hidden.is_empty());
    }

    #[test]
    fn replace_drops_previous_tokens() {
        let mut session = SessionState::new(NoopTransport);
        session.absorb(r#"<input type="hidden" name="__VIEWSTATE" value="one"><input type="hidden" name="__OLD" value="x">"#);
        assert_eq!(session.hidden().len(), 2);

        session.absorb(r#"<input type="hidden" name="__VIEWSTATE" value="two">"#);
        assert_eq!(session.hidden().get("__VIEWSTATE"), Some("two"));
        assert_eq!(session.hidden().get("__OLD"), None);
        assert_eq!(session.hidden().len(), 1);

        session.replace(HiddenState::new());
        assert!(session.hidden().is_empty());
    }
}
