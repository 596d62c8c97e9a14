//! 程序入口：解析参数、初始化日志、加载数据与图标，并完成 Slint UI 的 VM 绑定

use std::{cell::RefCell, path::{Path, PathBuf}, rc::Rc, time::Instant};

use anyhow::{bail, Context};
use clap::Parser;
use slint::{ComponentHandle, Image, ModelRc, VecModel};
use tracing_subscriber::fmt::SubscriberBuilder;

slint::include_modules!();

use bloodhound_viewer::{
    utils::clipboard::copy_to_clipboard,
    vm::bridge::*,
    AppState, Category, DataPaths, DisplayNode,
};

#[derive(Parser, Debug)]
#[command(name = "bloodhound_viewer")]
#[command(about = "BloodHound JSON Viewer", long_about = None)]
#[command(version)]
struct Args {
    /// Path to BloodHound users JSON file
    #[arg(long, value_name = "PATH")]
    users: PathBuf,

    /// Path to BloodHound groups JSON file
    #[arg(long, value_name = "PATH")]
    groups: PathBuf,

    /// Path to BloodHound computers JSON file
    #[arg(long, value_name = "PATH")]
    computers: PathBuf,

    /// Path to BloodHound domains JSON file
    #[arg(long, value_name = "PATH")]
    domains: PathBuf,
}

impl From<Args> for DataPaths {
    fn from(args: Args) -> Self {
        Self {
            users: args.users,
            groups: args.groups,
            computers: args.computers,
            domains: args.domains,
        }
    }
}

// RecordRow转换实现
impl From<(usize, &DisplayNode)> for RecordRow {
    fn from((index, node): (usize, &DisplayNode)) -> Self {
        Self {
            label: node.label.clone().into(),
            index: index as i32,
        }
    }
}

/// VM桥接器：管理UI与数据层的交互
struct ViewModelBridge {
    app_state: Rc<RefCell<AppState>>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, app_state: Rc<RefCell<AppState>>) -> Self {
        let bridge = Self { app_state };

        // 绑定所有UI回调
        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        let app_state = self.app_state.clone();

        // === 节点选择回调（四个面板共用） ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_node_selected(move |category, index| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_node_selected(&app_window, &app_state, category, index);
                }
            });
        }

        // === 搜索过滤回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_search_changed(move |filter_text| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_search_changed(&app_window, &app_state, filter_text.as_str());
                }
            });
        }

        // === 标签页切换回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_tab_changed(move |tab| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_tab_changed(&app_window, &app_state, tab);
                }
            });
        }

        // === 复制按钮回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_copy_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_copy_pressed(&app_window, &app_state);
                }
            });
        }
    }

    /// 初始化UI状态：填充四个面板并显示加载摘要
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_selected_category(-1);
        app_window.set_selected_index(-1);
        app_window.set_detail_text("".into());
        app_window.set_search_filter("".into());

        for category in Category::ALL {
            Self::rebuild_rows(app_window, &self.app_state, category);
        }

        let summary = {
            let state = self.app_state.borrow();
            Category::ALL
                .iter()
                .map(|c| format!("{}: {}", c.title(), state.panel(*c).len()))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        app_window.set_status_message(format!("{} | {}", STATUS_READY, summary).into());
    }

    /// 按面板可见节点重建行模型
    fn rebuild_rows(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>, category: Category) {
        let rows: Vec<RecordRow> = app_state
            .borrow()
            .panel(category)
            .visible_nodes()
            .map(RecordRow::from)
            .collect();
        let model = ModelRc::new(VecModel::from(rows));
        match category {
            Category::User => app_window.set_user_rows(model),
            Category::Group => app_window.set_group_rows(model),
            Category::Computer => app_window.set_computer_rows(model),
            Category::Domain => app_window.set_domain_rows(model),
        }
    }

    /// 处理节点选择：最后一次选中覆盖详情面板
    fn handle_node_selected(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        category: i32,
        index: i32,
    ) {
        let Some(category) = usize::try_from(category).ok().and_then(Category::from_index) else {
            tracing::warn!("未知的面板编号: {}", category);
            return;
        };
        let Ok(index) = usize::try_from(index) else {
            tracing::warn!("无效的节点下标: {}", index);
            return;
        };

        let mut state = app_state.borrow_mut();
        let selected = state.select(category, index).map(|node| node.label.clone());
        match selected {
            Ok(label) => {
                app_window.set_selected_category(category.index() as i32);
                app_window.set_selected_index(index as i32);
                app_window.set_detail_text(state.detail.text().into());
                app_window.set_status_message(format!("已选中 {}: {}", category.title(), label).into());
            }
            Err(e) => {
                let error_msg = format!("{}{}", STATUS_ERROR_PREFIX, e);
                app_window.set_status_message(error_msg.into());
                tracing::error!("节点选择失败: {}", e);
            }
        }
    }

    /// 处理搜索框变化：每次从头过滤目标面板
    fn handle_search_changed(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>, filter: &str) {
        let start_time = Instant::now();

        let (target, visible) = app_state.borrow_mut().set_query(filter);
        Self::rebuild_rows(app_window, app_state, target);

        let filter_duration = start_time.elapsed();

        // 更新状态消息
        if filter.is_empty() {
            app_window.set_status_message(STATUS_FILTER_CLEARED.into());
        } else {
            let total = app_state.borrow().panel(target).len();
            app_window.set_status_message(
                format!("搜索过滤 {}: {} (显示 {}/{})", target.title(), filter, visible, total).into(),
            );
        }

        tracing::info!("搜索过滤应用: {}，显示 {} 个节点，耗时: {:.1}ms", filter, visible, filter_duration.as_millis());
    }

    /// 处理标签页切换
    fn handle_tab_changed(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>, tab: i32) {
        let Some(category) = usize::try_from(tab).ok().and_then(Category::from_index) else {
            tracing::warn!("未知的标签页: {}", tab);
            return;
        };

        app_state.borrow_mut().set_active(category);
        for category in Category::ALL {
            Self::rebuild_rows(app_window, app_state, category);
        }

        let (visible, total) = {
            let state = app_state.borrow();
            let panel = state.panel(category);
            (panel.visible_count(), panel.len())
        };
        app_window.set_status_message(format!("{}: {}/{}", category.title(), visible, total).into());
    }

    /// 处理复制按钮：复制选中记录的完整 JSON
    fn handle_copy_pressed(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let pretty = match app_state.borrow().selected_record_pretty() {
            Ok(pretty) => pretty,
            Err(e) => {
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
                return;
            }
        };

        match copy_to_clipboard(&pretty) {
            Ok(()) => {
                app_window.set_status_message(STATUS_COPIED.into());
                tracing::info!("记录已复制到剪贴板，长度: {} 字符", pretty.len());
            }
            Err(e) => {
                let error_msg = format!("{}{}", STATUS_ERROR_PREFIX, e);
                app_window.set_status_message(error_msg.into());
                tracing::error!("复制失败: {}", e);
            }
        }
    }
}

/// 加载类别图标，文件缺失视为致命错误
fn load_icon(category: Category) -> anyhow::Result<Image> {
    let path = Path::new(icon_file(category));
    if !path.is_file() {
        bail!("找不到图标文件: {}", path.display());
    }
    Image::load_from_path(path).map_err(|_| anyhow::anyhow!("无法解码图标文件: {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let args = Args::parse();
    let paths = DataPaths::from(args);

    // 数据与图标在窗口创建前一次性加载，失败直接退出
    let start_time = Instant::now();
    let mut state = AppState::new(SEARCH_SCOPE);
    if let Err(e) = state.load_files(&paths) {
        tracing::error!("数据加载失败: {}", e);
        return Err(e).context("无法加载 BloodHound 数据");
    }
    tracing::info!("数据加载完成，耗时: {:.2}ms", start_time.elapsed().as_millis());

    let app = AppWindow::new().context("UI 初始化失败")?;
    app.set_user_icon(load_icon(Category::User)?);
    app.set_group_icon(load_icon(Category::Group)?);
    app.set_computer_icon(load_icon(Category::Computer)?);
    app.set_domain_icon(load_icon(Category::Domain)?);

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, Rc::new(RefCell::new(state)));
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run().context("UI 事件循环异常退出")?;
    Ok(())
}
