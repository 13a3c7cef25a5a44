use crate::constants::{FALLBACK_HTML, SIDEBAR_WIDTH, STATUS_BAR_HEIGHT, UI_BORDER_WIDTH};
use crate::display::DisplayRegion;
use crate::loader::ContentLoader;
use crate::models::{LoadStatus, NavManifest};
use crate::network::NetworkResponse;
use crate::sidebar::{Sidebar, SidebarRow};
use crate::theme::{Palette, ThemeManager};

use tokio::sync::mpsc;

pub const WELCOME_HTML: &str = include_str!("../assets/welcome.html");

pub struct App {
    pub display: DisplayRegion,
    pub sidebar: Sidebar,
    pub theme: ThemeManager,
    pub loader: ContentLoader,
    pub tx: mpsc::Sender<NetworkResponse>,
    pub rx: mpsc::Receiver<NetworkResponse>,
    pub status: LoadStatus,
    pub status_message: String,
    /// Path of the document currently shown, if any.
    pub current_path: Option<String>,
    /// Path most recently requested; `reload` re-triggers it.
    pub last_requested: Option<String>,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl App {
    pub fn new(
        tx: mpsc::Sender<NetworkResponse>,
        rx: mpsc::Receiver<NetworkResponse>,
        loader: ContentLoader,
        manifest: &NavManifest,
        theme: ThemeManager,
    ) -> Self {
        let display = DisplayRegion::new(80, theme.palette());
        let mut app = Self {
            display,
            sidebar: Sidebar::from_manifest(manifest),
            theme,
            loader,
            tx,
            rx,
            status: LoadStatus::Idle,
            status_message: String::from("Ready"),
            current_path: None,
            last_requested: None,
            terminal_width: 80,
            terminal_height: 24,
        };
        app.display.replace(WELCOME_HTML);
        app.sync_layout();
        app
    }

    /// Page-ready step: the theme is already applied by `ThemeManager::init`,
    /// so this only decides between the welcome page and an initial load.
    pub fn startup(&mut self, open: Option<&str>) {
        if let Some(path) = open {
            self.load(path);
        }
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn load(&mut self, path: &str) {
        self.last_requested = Some(path.to_string());
        self.loader.load(path);
    }

    pub fn reload(&mut self) {
        if let Some(path) = self.last_requested.clone() {
            self.load(&path);
        }
    }

    pub fn apply_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::Loading(path) => {
                self.status = LoadStatus::Loading;
                self.status_message = format!("Fetching {}...", path);
            }
            NetworkResponse::Success(path, html) => {
                self.display.replace(html);
                self.status = LoadStatus::Loaded;
                self.status_message = format!("Loaded {}", path);
                self.current_path = Some(path);
            }
            NetworkResponse::Error(path, msg) => {
                self.display.replace(FALLBACK_HTML);
                self.status = LoadStatus::Failed;
                self.status_message = format!("Error: {}", msg);
                self.current_path = Some(path);
            }
            NetworkResponse::Manifest(manifest) => {
                let active = self.sidebar.active;
                self.sidebar = Sidebar::from_manifest(&manifest);
                self.sidebar.active = active;
                self.sync_layout();
            }
        }
    }

    /// Activates a sidebar row: headers open or close their panel, links
    /// become the sidebar's single active link and load their document.
    pub fn activate_row(&mut self, row: SidebarRow) {
        match row {
            SidebarRow::Control(control) => {
                self.sidebar.toggle_control(control);
            }
            SidebarRow::Link(panel, link) => {
                let path = self
                    .sidebar
                    .activate_link(panel, link)
                    .map(|l| l.path.clone());
                if let Some(path) = path {
                    self.load(&path);
                }
            }
        }
    }

    pub fn activate_selected(&mut self) {
        if let Some(row) = self.sidebar.selected_row() {
            self.activate_row(row);
        }
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.theme.toggle();
        self.display.set_palette(self.theme.palette());
        self.status_message = format!("Theme: {}", mode.as_str());
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar.toggle_active();
        self.sync_layout();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.sync_layout();
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar.is_visible(self.terminal_width)
    }

    pub fn content_width(&self) -> usize {
        let sidebar = if self.sidebar_visible() {
            SIDEBAR_WIDTH
        } else {
            0
        };
        (self.terminal_width.saturating_sub(sidebar) as usize).saturating_sub(UI_BORDER_WIDTH)
    }

    /// Rows available inside the sidebar's border.
    pub fn sidebar_height(&self) -> usize {
        (self.terminal_height.saturating_sub(STATUS_BAR_HEIGHT) as usize)
            .saturating_sub(UI_BORDER_WIDTH)
    }

    fn sync_layout(&mut self) {
        let width = self.content_width();
        self.display.resize(width);
        let rows = self.sidebar_height();
        self.sidebar.set_viewport(rows);
    }
}
