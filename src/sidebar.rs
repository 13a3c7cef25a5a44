use crate::constants::{GLYPH_CLOSED, GLYPH_OPEN, MOBILE_BREAKPOINT};
use crate::models::{NavLink, NavManifest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanelId(pub usize);

/// A section header. It owns the id of the one panel it opens and closes.
#[derive(Clone, Debug)]
pub struct DisclosureControl {
    pub label: String,
    pub panel: PanelId,
}

#[derive(Clone, Debug)]
pub struct Panel {
    pub id: PanelId,
    pub open: bool,
    pub links: Vec<NavLink>,
}

/// One visible line of the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarRow {
    Control(usize),
    Link(PanelId, usize),
}

pub struct Sidebar {
    pub controls: Vec<DisclosureControl>,
    panels: Vec<Panel>,
    /// Mobile visibility flag. Only consulted below the breakpoint width.
    pub active: bool,
    pub cursor: usize,
    /// First row shown in the pane; follows `cursor`.
    pub scroll: usize,
    viewport: usize,
    /// The one active link across every panel.
    active_link: Option<(PanelId, usize)>,
}

impl Sidebar {
    pub fn from_manifest(manifest: &NavManifest) -> Self {
        let mut controls = Vec::with_capacity(manifest.sections.len());
        let mut panels = Vec::with_capacity(manifest.sections.len());
        for (i, section) in manifest.sections.iter().enumerate() {
            let id = PanelId(i);
            controls.push(DisclosureControl {
                label: section.title.clone(),
                panel: id,
            });
            panels.push(Panel {
                id,
                open: false,
                links: section.links.clone(),
            });
        }
        Self {
            controls,
            panels,
            active: false,
            cursor: 0,
            scroll: 0,
            viewport: 0,
            active_link: None,
        }
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    pub fn is_open(&self, id: PanelId) -> bool {
        self.panel(id).is_some_and(|p| p.open)
    }

    /// Flips the panel owned by `control` and returns its new open state.
    pub fn toggle_control(&mut self, control: usize) -> Option<bool> {
        let id = self.controls.get(control)?.panel;
        let panel = self.panel_mut(id)?;
        panel.open = !panel.open;
        let open = panel.open;
        self.clamp_cursor();
        Some(open)
    }

    pub fn glyph(&self, control: usize) -> &'static str {
        match self.controls.get(control) {
            Some(c) if self.is_open(c.panel) => GLYPH_OPEN,
            _ => GLYPH_CLOSED,
        }
    }

    /// Header text as displayed: indicator glyph followed by the section title.
    pub fn control_label(&self, control: usize) -> String {
        match self.controls.get(control) {
            Some(c) => format!("{} {}", self.glyph(control), c.label),
            None => String::new(),
        }
    }

    /// Marks `link` active, clearing the marker from every other link in the
    /// sidebar, and returns the activated link.
    pub fn activate_link(&mut self, id: PanelId, link: usize) -> Option<&NavLink> {
        self.panel(id)?.links.get(link)?;
        self.active_link = Some((id, link));
        self.panel(id).and_then(|p| p.links.get(link))
    }

    /// Index of the active link if it lives in panel `id`.
    pub fn active_link(&self, id: PanelId) -> Option<usize> {
        match self.active_link {
            Some((panel, link)) if panel == id => Some(link),
            _ => None,
        }
    }

    pub fn toggle_active(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Narrow terminals hide the sidebar unless it has been toggled active.
    pub fn is_visible(&self, terminal_width: u16) -> bool {
        terminal_width >= MOBILE_BREAKPOINT || self.active
    }

    pub fn rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for (i, control) in self.controls.iter().enumerate() {
            rows.push(SidebarRow::Control(i));
            if let Some(panel) = self.panel(control.panel) {
                if panel.open {
                    rows.extend((0..panel.links.len()).map(|l| SidebarRow::Link(panel.id, l)));
                }
            }
        }
        rows
    }

    pub fn row_label(&self, row: SidebarRow) -> String {
        match row {
            SidebarRow::Control(c) => self.control_label(c),
            SidebarRow::Link(id, l) => self
                .panel(id)
                .and_then(|p| p.links.get(l))
                .map(|link| format!("  {}", link.label))
                .unwrap_or_default(),
        }
    }

    pub fn selected_row(&self) -> Option<SidebarRow> {
        self.rows().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
        }
        self.follow_cursor();
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.rows().len() {
            self.cursor = index;
            self.follow_cursor();
            true
        } else {
            false
        }
    }

    /// Number of rows the pane can show at once.
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        self.follow_cursor();
    }

    /// Row index under the `offset`-th visible line of the pane.
    pub fn row_at(&self, offset: usize) -> usize {
        self.scroll + offset
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        if self.viewport == 0 {
            self.scroll = 0;
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.viewport {
            self.scroll = self.cursor + 1 - self.viewport;
        }
        let len = self.rows().len();
        self.scroll = self.scroll.min(len.saturating_sub(self.viewport));
    }
}
