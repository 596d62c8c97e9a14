//! AppState：四个类别面板、共享详情面板与搜索框的核心状态

use std::path::PathBuf;

use thiserror::Error;

use crate::model::detail::{DetailPane, Selection};
use crate::model::record_tree::{Category, DisplayNode, Panel, PanelState};
use crate::utils::fs::read_data_array;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON解析失败 {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("状态错误: {0}")]
    State(String),
}

/// 四个数据文件的路径
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub users: PathBuf,
    pub groups: PathBuf,
    pub computers: PathBuf,
    pub domains: PathBuf,
}

impl DataPaths {
    pub fn get(&self, category: Category) -> &PathBuf {
        match category {
            Category::User => &self.users,
            Category::Group => &self.groups,
            Category::Computer => &self.computers,
            Category::Domain => &self.domains,
        }
    }
}

/// 搜索框作用的面板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// 固定过滤某一个面板
    Designated(Category),
    /// 过滤当前标签页；离开标签页时其列表恢复完整
    Active,
}

#[derive(Debug)]
pub struct AppState {
    pub panels: [Panel; 4],
    pub detail: DetailPane,
    pub scope: SearchScope,
    active: Category,
    query: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchScope::Active)
    }
}

impl AppState {
    pub fn new(scope: SearchScope) -> Self {
        Self {
            panels: Category::ALL.map(Panel::new),
            detail: DetailPane::Empty,
            scope,
            active: Category::User,
            query: String::new(),
        }
    }

    /// 读取四个数据文件并构建面板；任一文件失败即整体失败，不修改已有状态
    pub fn load_files(&mut self, paths: &DataPaths) -> Result<(), AppError> {
        if self.panels.iter().any(|p| p.state() == PanelState::Populated) {
            return Err(AppError::State("数据已加载".into()));
        }

        let mut loaded = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            loaded.push(read_data_array(paths.get(category))?);
        }

        for (category, records) in Category::ALL.into_iter().zip(loaded) {
            self.panels[category.index()] = Panel::build(records, category);
        }
        Ok(())
    }

    pub fn panel(&self, category: Category) -> &Panel {
        &self.panels[category.index()]
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 当前查询作用的面板
    pub fn filter_target(&self) -> Category {
        match self.scope {
            SearchScope::Designated(category) => category,
            SearchScope::Active => self.active,
        }
    }

    /// 选中某个面板中的节点，刷新共享详情面板并返回该节点
    pub fn select(&mut self, category: Category, index: usize) -> Result<&DisplayNode, AppError> {
        let panel = &self.panels[category.index()];
        let node = panel.node(index).ok_or_else(|| {
            AppError::State(format!("{:?} 面板没有第 {} 个节点", category, index))
        })?;
        self.detail.show(Selection { category, index }, node);
        tracing::info!("选中 {:?}: {}", category, node.label);
        Ok(node)
    }

    pub fn clear_selection(&mut self) {
        self.detail.clear();
    }

    /// 当前选中节点
    pub fn selected_node(&self) -> Option<&DisplayNode> {
        let selection = self.detail.selection()?;
        self.panel(selection.category).node(selection.index)
    }

    /// 选中记录的格式化JSON（用于复制）
    pub fn selected_record_pretty(&self) -> Result<String, AppError> {
        let node = self
            .selected_node()
            .ok_or_else(|| AppError::State("没有选中的节点".into()))?;
        serde_json::to_string_pretty(&node.record).map_err(|e| AppError::State(e.to_string()))
    }

    /// 更新查询并过滤目标面板，返回 (目标面板, 可见节点数)
    pub fn set_query(&mut self, query: &str) -> (Category, usize) {
        self.query = query.to_string();
        let target = self.filter_target();
        let visible = self.panels[target.index()].apply_filter(&self.query);
        (target, visible)
    }

    /// 切换当前标签页；Active 作用域下把查询转移到新面板
    pub fn set_active(&mut self, category: Category) {
        if category == self.active {
            return;
        }
        let previous = self.active;
        self.active = category;

        if self.scope == SearchScope::Active {
            self.panels[previous.index()].apply_filter("");
            self.panels[category.index()].apply_filter(&self.query);
        }
    }
}
