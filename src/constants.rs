// User Agent
pub const USER_AGENT: &str = "docnav/0.1.0 reqwest/0.12";

// Network configuration
pub const MAX_REDIRECTS: usize = 10;
pub const MAX_DOCUMENT_SIZE_BYTES: u64 = 10 * 1024 * 1024; // 10MB

// Channel capacity
pub const CHANNEL_CAPACITY: usize = 10;

// Path conventions
pub const INDEX_SUFFIX: &str = "index.md";
pub const EXTENSION_SUFFIX: &str = ".md";
pub const NAV_MANIFEST_NAME: &str = "nav.json";

// Persistence
pub const THEME_KEY: &str = "theme";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

// Display region
pub const FALLBACK_HTML: &str = "<p style=\"color: red;\">Updates are on the way for this course.</p>";

// Disclosure glyphs
pub const GLYPH_CLOSED: &str = "▸";
pub const GLYPH_OPEN: &str = "▾";

// UI layout constants
pub const SIDEBAR_WIDTH: u16 = 32;
pub const MOBILE_BREAKPOINT: u16 = 80;
pub const STATUS_BAR_HEIGHT: u16 = 1;
pub const UI_BORDER_WIDTH: usize = 2;
pub const MOUSE_SCROLL_LINES: usize = 3;
pub const PAGE_SCROLL_LINES: usize = 10;

// Event polling
pub const EVENT_POLL_TIMEOUT_MS: u64 = 16;

// Logging
pub const LOG_ENV_VAR: &str = "DOCNAV_LOG";
pub const DEFAULT_LOG_FILE: &str = "docnav.log";
