use crate::renderer::DomRenderer;
use crate::theme::Palette;

use ratatui::text::Line;
use scraper::Html;

/// The single content pane. Holds the most recent document HTML and its
/// laid-out lines; every `replace` discards what was there before.
pub struct DisplayRegion {
    html: String,
    lines: Vec<Line<'static>>,
    scroll: usize,
    scroll_target: Option<usize>,
    width: usize,
    palette: Palette,
}

impl DisplayRegion {
    pub fn new(width: usize, palette: Palette) -> Self {
        Self {
            html: String::new(),
            lines: Vec::new(),
            scroll: 0,
            scroll_target: None,
            width,
            palette,
        }
    }

    /// Swaps in new content and starts a smooth scroll back to the top.
    pub fn replace(&mut self, html: impl Into<String>) {
        self.html = html.into();
        self.layout();
        self.scroll = self.scroll.min(self.max_scroll());
        self.scroll_to_top();
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Manual scrolling cancels any animation in flight.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_target = None;
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_target = if self.scroll == 0 { None } else { Some(0) };
    }

    pub fn is_animating(&self) -> bool {
        self.scroll_target.is_some()
    }

    /// Advances the smooth scroll by one frame, covering half of the remaining
    /// distance (rounded up). Returns whether the animation is still running.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.scroll_target else {
            return false;
        };
        let distance = self.scroll.abs_diff(target);
        let step = distance.div_ceil(2);
        if self.scroll > target {
            self.scroll -= step;
        } else {
            self.scroll += step;
        }
        if self.scroll == target {
            self.scroll_target = None;
        }
        self.scroll_target.is_some()
    }

    /// Runs the animation to completion.
    pub fn settle(&mut self) {
        while self.tick() {}
    }

    pub fn resize(&mut self, width: usize) {
        if width != self.width {
            self.width = width;
            self.layout();
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if palette != self.palette {
            self.palette = palette;
            self.layout();
        }
    }

    fn layout(&mut self) {
        let document = Html::parse_document(&self.html);
        let mut renderer = DomRenderer::new(self.width, self.palette);
        renderer.render(&document);
        self.lines = renderer.lines;
    }
}
