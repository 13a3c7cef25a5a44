use crate::constants::THEME_KEY;
use crate::models::AppearanceMode;
use crate::storage::KeyValueStore;

use ratatui::style::Color;

/// Colors consumed by the UI and the HTML renderer for one appearance mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub heading: Color,
    pub link: Color,
    pub code: Color,
    pub muted: Color,
    pub error: Color,
    pub accent: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Palette {
    pub fn for_mode(mode: AppearanceMode) -> Self {
        match mode {
            AppearanceMode::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                heading: Color::Blue,
                link: Color::Blue,
                code: Color::Magenta,
                muted: Color::DarkGray,
                error: Color::Red,
                accent: Color::Rgb(176, 114, 25),
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
            },
            AppearanceMode::Dark => Self {
                fg: Color::Gray,
                bg: Color::Black,
                heading: Color::White,
                link: Color::Cyan,
                code: Color::Magenta,
                muted: Color::DarkGray,
                error: Color::LightRed,
                accent: Color::Yellow,
                highlight_fg: Color::Black,
                highlight_bg: Color::Yellow,
            },
        }
    }
}

/// Owns the applied appearance mode and the store it is persisted in.
///
/// The applied mode is only changed through [`ThemeManager::init`] and
/// [`ThemeManager::toggle`], and both write it back to the store so the two
/// agree once either returns.
pub struct ThemeManager {
    applied: AppearanceMode,
    store: Box<dyn KeyValueStore>,
}

impl ThemeManager {
    pub fn init(mut store: Box<dyn KeyValueStore>) -> Self {
        let saved = store.get(THEME_KEY);
        let applied = saved
            .as_deref()
            .and_then(AppearanceMode::parse)
            .unwrap_or_default();

        // Store and applied mode agree from first launch on, even before any toggle.
        if saved.as_deref() != Some(applied.as_str()) {
            if let Err(e) = store.set(THEME_KEY, applied.as_str()) {
                tracing::warn!(error = %e, "failed to persist default theme");
            }
        }

        tracing::info!(theme = applied.as_str(), "theme applied");
        Self { applied, store }
    }

    pub fn toggle(&mut self) -> AppearanceMode {
        let next = self.applied.toggled();
        self.applied = next;
        if let Err(e) = self.store.set(THEME_KEY, next.as_str()) {
            tracing::warn!(error = %e, theme = next.as_str(), "failed to persist theme");
        }
        tracing::info!(theme = next.as_str(), "theme toggled");
        next
    }

    pub fn mode(&self) -> AppearanceMode {
        self.applied
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.applied)
    }

    /// Value currently held by the store, if it parses.
    pub fn persisted(&self) -> Option<AppearanceMode> {
        self.store
            .get(THEME_KEY)
            .as_deref()
            .and_then(AppearanceMode::parse)
    }
}
