//! BloodHound 导出数据浏览工具库
//!
//! 提供导出文件加载、分类记录列表构建、名称过滤与详情渲染
//! 遵循MVVM架构模式，UI绑定位于 main.rs

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::data_core::{AppState, AppError, DataPaths, SearchScope};
pub use model::detail::{DetailPane, Selection};
pub use model::record_tree::{Category, DisplayNode, Panel, PanelState};
