//! 详情面板：把选中节点的源记录逐键渲染为 "key: value" 文本

use serde_json::Value;

use crate::model::record_tree::{Category, DisplayNode, Record};

/// 选中位置（类别 + 面板内下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub category: Category,
    pub index: usize,
}

/// 四个面板共享的唯一详情槽位，最后一次选中覆盖之前的内容
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailPane {
    #[default]
    Empty,
    Showing { selection: Selection, text: String },
}

impl DetailPane {
    /// 整体替换显示内容（不是追加）
    pub fn show(&mut self, selection: Selection, node: &DisplayNode) {
        *self = DetailPane::Showing {
            selection,
            text: render_record(&node.record),
        };
    }

    pub fn clear(&mut self) {
        *self = DetailPane::Empty;
    }

    pub fn text(&self) -> &str {
        match self {
            DetailPane::Empty => "",
            DetailPane::Showing { text, .. } => text,
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        match self {
            DetailPane::Empty => None,
            DetailPane::Showing { selection, .. } => Some(*selection),
        }
    }
}

/// 每个顶层键一行，顺序与记录原始键顺序一致
pub fn render_lines(record: &Record) -> Vec<String> {
    record
        .iter()
        .map(|(k, v)| format!("{}: {}", k, display_value(v)))
        .collect()
}

/// 完整详情文本，每行以换行结尾
pub fn render_record(record: &Record) -> String {
    let mut out = String::new();
    for line in render_lines(record) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// 值的默认字符串形式：顶层字符串不加引号，嵌套结构不做缩进美化
pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => {
            let mut out = String::new();
            write_repr(other, &mut out);
            out
        }
    }
}

fn write_repr(v: &Value, out: &mut String) {
    match v {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_quoted(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(k, out);
                out.push_str(": ");
                write_repr(item, out);
            }
            out.push('}');
        }
    }
}

/// 单引号包裹；字符串含单引号且不含双引号时改用双引号
fn write_quoted(s: &str, out: &mut String) {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_render_in_key_order() {
        let r = record(json!({"Properties": {"name": "srv01"}, "Enabled": true}));

        let lines = render_lines(&r);

        assert_eq!(lines, vec!["Properties: {'name': 'srv01'}", "Enabled: True"]);
        assert_eq!(render_record(&r), "Properties: {'name': 'srv01'}\nEnabled: True\n");
    }

    #[test]
    fn test_key_order_is_not_sorted() {
        let r = record(json!({"zeta": 1, "alpha": 2, "Mid": 3}));

        let keys: Vec<String> = render_lines(&r)
            .into_iter()
            .map(|l| l.split(": ").next().unwrap().to_string())
            .collect();

        assert_eq!(keys, vec!["zeta", "alpha", "Mid"]);
    }

    #[test]
    fn test_scalar_forms() {
        assert_eq!(display_value(&json!("plain text")), "plain text");
        assert_eq!(display_value(&json!(false)), "False");
        assert_eq!(display_value(&json!(null)), "None");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(-1.5)), "-1.5");
    }

    #[test]
    fn test_nested_forms() {
        let v = json!({"Aces": [{"RightName": "Owns", "IsInherited": false}], "x": null});
        assert_eq!(
            display_value(&v),
            "{'Aces': [{'RightName': 'Owns', 'IsInherited': False}], 'x': None}"
        );
        assert_eq!(display_value(&json!([])), "[]");
        assert_eq!(display_value(&json!({})), "{}");
    }

    #[test]
    fn test_nested_string_quoting() {
        assert_eq!(display_value(&json!(["it's"])), "[\"it's\"]");
        assert_eq!(display_value(&json!(["a\\b"])), "['a\\\\b']");
        assert_eq!(display_value(&json!(["both ' and \""])), "['both \\' and \"']");
    }

    #[test]
    fn test_pane_state_machine() {
        let node = DisplayNode::new(record(json!({"Properties": {"name": "a"}})), Category::User);
        let other = DisplayNode::new(record(json!({"Properties": {"name": "b"}, "Enabled": false})), Category::Group);
        let mut pane = DetailPane::default();
        assert_eq!(pane.text(), "");
        assert_eq!(pane.selection(), None);

        let first = Selection { category: Category::User, index: 0 };
        pane.show(first, &node);
        assert_eq!(pane.text(), "Properties: {'name': 'a'}\n");

        let second = Selection { category: Category::Group, index: 3 };
        pane.show(second, &other);
        assert_eq!(pane.selection(), Some(second));
        assert_eq!(pane.text(), "Properties: {'name': 'b'}\nEnabled: False\n");

        pane.clear();
        assert_eq!(pane, DetailPane::Empty);
    }
}
