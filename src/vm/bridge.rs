//! VM桥接层：连接Slint UI与AppState数据模型
//!
//! 注意：此模块的具体实现在main.rs中，因为依赖于Slint生成的类型
//! 这里只提供公共常量

use crate::model::data_core::SearchScope;
use crate::model::record_tree::Category;

// === 常量定义（消除魔法值） ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_COPIED: &str = "已复制到剪贴板";
pub const STATUS_FILTER_CLEARED: &str = "已清除搜索过滤";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// 搜索框作用范围：跟随当前标签页（原行为只过滤 Users 面板）
pub const SEARCH_SCOPE: SearchScope = SearchScope::Active;

/// 图标文件（相对工作目录），UI中按16x16显示
pub fn icon_file(category: Category) -> &'static str {
    match category {
        Category::User => "user_icon.png",
        Category::Group => "group_icon.png",
        Category::Computer => "computer_icon.png",
        Category::Domain => "domain_icon.png",
    }
}
