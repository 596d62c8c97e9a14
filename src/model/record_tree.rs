//! 记录列表：把一个数据数组转换为按名称排序的扁平节点集合，并负责名称过滤
//!
//! 节点之间没有父子关系，过滤只切换可见标记，不删除节点，清空查询即可按原排序恢复

use serde_json::{Map, Value};

use crate::model::detail::display_value;

/// 单条目录对象记录（JSON对象，键顺序与文件一致）
pub type Record = Map<String, Value>;

/// 缺少 `Properties.name` 时使用的显示名
pub const UNKNOWN_LABEL: &str = "Unknown";

/// 记录类别，只决定图标与所在标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    User,
    Group,
    Computer,
    Domain,
}

impl Category {
    /// 标签页顺序
    pub const ALL: [Category; 4] = [
        Category::User,
        Category::Group,
        Category::Computer,
        Category::Domain,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::User => 0,
            Category::Group => 1,
            Category::Computer => 2,
            Category::Domain => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 标签页标题
    pub fn title(self) -> &'static str {
        match self {
            Category::User => "Users",
            Category::Group => "Groups",
            Category::Computer => "Computers",
            Category::Domain => "Domains",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    /// 显示名（来自 `Properties.name`）
    pub label: String,
    /// 完整源记录，详情面板直接渲染它
    pub record: Record,
    pub category: Category,
    /// 是否可见（用于搜索过滤）
    pub visible: bool,
}

impl DisplayNode {
    pub fn new(record: Record, category: Category) -> Self {
        Self {
            label: label_of(&record),
            record,
            category,
            visible: true,
        }
    }
}

/// 从记录推导显示名
///
/// `Properties` 不是对象、没有 `name` 或 `name` 为 null 时返回 "Unknown"；
/// 非字符串的 `name` 使用其显示字符串
pub fn label_of(record: &Record) -> String {
    match record.get("Properties").and_then(Value::as_object).and_then(|p| p.get("name")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => UNKNOWN_LABEL.to_string(),
        Some(other) => display_value(other),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Unloaded,
    Populated,
}

/// 单个类别的节点集合
#[derive(Debug, Clone)]
pub struct Panel {
    category: Category,
    nodes: Vec<DisplayNode>,
    state: PanelState,
}

impl Panel {
    /// 尚未加载数据的空面板
    pub fn new(category: Category) -> Self {
        Self {
            category,
            nodes: Vec::new(),
            state: PanelState::Unloaded,
        }
    }

    /// 由记录数组构建面板：跳过非对象条目，按小写显示名稳定升序排序
    pub fn build(records: Vec<Value>, category: Category) -> Self {
        let total = records.len();
        let mut nodes: Vec<DisplayNode> = records
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(record) => Some(DisplayNode::new(record, category)),
                _ => None,
            })
            .collect();

        let skipped = total - nodes.len();
        if skipped > 0 {
            tracing::debug!("{:?}: 跳过 {} 条非对象记录", category, skipped);
        }

        // sort_by_cached_key 为稳定排序，同名节点保持文件中的相对顺序
        nodes.sort_by_cached_key(|n| n.label.to_lowercase());

        tracing::info!("{:?} 面板构建完成: {} 个节点", category, nodes.len());
        Self {
            category,
            nodes,
            state: PanelState::Populated,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// 全部节点（包含被过滤隐藏的），按排序顺序
    pub fn nodes(&self) -> &[DisplayNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&DisplayNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 当前可见节点及其在面板中的下标
    pub fn visible_nodes(&self) -> impl Iterator<Item = (usize, &DisplayNode)> + '_ {
        self.nodes.iter().enumerate().filter(|(_, n)| n.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visible).count()
    }

    pub fn visible_labels(&self) -> Vec<&str> {
        self.visible_nodes().map(|(_, n)| n.label.as_str()).collect()
    }

    /// 应用名称过滤，返回可见节点数
    ///
    /// 每次都从头计算：显示名（小写）包含查询（小写）的节点可见，其余隐藏；
    /// 空查询恢复全部节点
    pub fn apply_filter(&mut self, query: &str) -> usize {
        let query = query.to_lowercase();
        if query.is_empty() {
            for node in &mut self.nodes {
                node.visible = true;
            }
            return self.nodes.len();
        }

        let mut visible = 0;
        for node in &mut self.nodes {
            node.visible = node.label.to_lowercase().contains(&query);
            if node.visible {
                visible += 1;
            }
        }
        visible
    }
}
