use docnav::app::App;
use docnav::config::SiteConfig;
use docnav::constants::{CHANNEL_CAPACITY, FALLBACK_HTML, MOBILE_BREAKPOINT, THEME_KEY};
use docnav::event_handler::{handle_key_event, handle_mouse_event, handle_network_event};
use docnav::loader::ContentLoader;
use docnav::markdown::{CommonMarkRenderer, MarkdownRenderer};
use docnav::models::{AppearanceMode, LoadStatus, NavLink, NavManifest, NavSection, PathConvention};
use docnav::network::{NetworkManager, NetworkResponse};
use docnav::sidebar::PanelId;
use docnav::storage::{FileStore, KeyValueStore, MemoryStore};
use docnav::theme::ThemeManager;
use docnav::ui::ui;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manifest() -> NavManifest {
    NavManifest {
        sections: vec![NavSection {
            title: "Core".to_string(),
            links: vec![
                NavLink {
                    label: "Variables".to_string(),
                    path: "core/variables/".to_string(),
                },
                NavLink {
                    label: "Control Flow".to_string(),
                    path: "core/control-flow/".to_string(),
                },
            ],
        }],
    }
}

fn build_app(base: &str, manifest: &NavManifest, store: Box<dyn KeyValueStore>) -> App {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let config = SiteConfig::new(base, PathConvention::Index).unwrap();
    let loader = ContentLoader::new(
        config,
        Arc::new(NetworkManager::new().expect("Failed to build client")),
        Arc::new(CommonMarkRenderer::default()),
        tx.clone(),
    );
    App::new(tx, rx, loader, manifest, ThemeManager::init(store))
}

/// Applies channel messages until a load finishes, returning the final one unapplied.
async fn next_outcome(app: &mut App) -> NetworkResponse {
    loop {
        let resp = app.rx.recv().await.expect("channel closed");
        match resp {
            NetworkResponse::Loading(_) => handle_network_event(app, resp).unwrap(),
            other => return other,
        }
    }
}

fn press(app: &mut App, code: KeyCode) -> bool {
    handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
}

fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
    let event = MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    handle_mouse_event(app, event).unwrap();
}

fn click(app: &mut App, column: u16, row: u16) {
    mouse(app, MouseEventKind::Down(MouseButton::Left), column, row);
}

fn many_sections(count: usize) -> NavManifest {
    NavManifest {
        sections: (0..count)
            .map(|i| NavSection {
                title: format!("Sec{i}"),
                links: Vec::new(),
            })
            .collect(),
    }
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

async fn mount_markdown(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_successful_load_replaces_display_region() {
    let mock_server = MockServer::start().await;
    mount_markdown(&mock_server, "/docs/index.md", "# Hi").await;

    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(MemoryStore::new()));
    app.display.scroll_by(5);
    app.load("docs/");

    let outcome = next_outcome(&mut app).await;
    assert_eq!(app.status, LoadStatus::Loading);
    handle_network_event(&mut app, outcome).unwrap();

    let expected = CommonMarkRenderer::default().render("# Hi").unwrap();
    assert_eq!(app.display.html(), expected);
    assert_eq!(app.status, LoadStatus::Loaded);
    assert_eq!(app.current_path.as_deref(), Some("docs/"));

    app.display.settle();
    assert_eq!(app.display.scroll(), 0);
    assert!(
        app.display
            .lines()
            .iter()
            .any(|line| line.to_string().contains("Hi"))
    );
}

#[tokio::test]
async fn test_not_found_shows_fallback_only() {
    let mock_server = MockServer::start().await;
    mount_markdown(&mock_server, "/docs/index.md", "# Present").await;
    Mock::given(method("GET"))
        .and(path("/missing/index.md"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(MemoryStore::new()));
    app.load("docs/");
    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();

    app.load("missing/");
    let outcome = next_outcome(&mut app).await;
    assert!(matches!(outcome, NetworkResponse::Error(..)));
    handle_network_event(&mut app, outcome).unwrap();

    assert_eq!(app.display.html(), FALLBACK_HTML);
    assert_eq!(app.status, LoadStatus::Failed);
    let text: String = app.display.lines().iter().map(|l| l.to_string()).collect();
    assert!(!text.contains("Present"));
    assert!(text.contains("Updates are on the way"));
}

#[tokio::test]
async fn test_unreachable_site_shows_fallback() {
    // Nothing listens on port 9 on a test machine.
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.load("docs/");
    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();
    assert_eq!(app.display.html(), FALLBACK_HTML);
}

#[tokio::test]
async fn test_later_completion_wins() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow/index.md"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("# Slow")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    mount_markdown(&mock_server, "/fast/index.md", "# Fast").await;

    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(MemoryStore::new()));
    app.load("slow/");
    app.load("fast/");

    for _ in 0..2 {
        let outcome = next_outcome(&mut app).await;
        handle_network_event(&mut app, outcome).unwrap();
    }

    assert!(app.display.html().contains("Slow"));
    assert_eq!(app.current_path.as_deref(), Some("slow/"));
}

#[tokio::test]
async fn test_sidebar_navigation_loads_and_highlights() {
    let mock_server = MockServer::start().await;
    mount_markdown(&mock_server, "/core/variables/index.md", "# Variables").await;
    mount_markdown(&mock_server, "/core/control-flow/index.md", "# Control Flow").await;

    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(MemoryStore::new()));
    app.resize(120, 40);

    // Open the section, then activate both links in turn
    press(&mut app, KeyCode::Enter);
    assert!(app.sidebar.is_open(PanelId(0)));
    assert_eq!(app.sidebar.control_label(0), "▾ Core");

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();
    assert!(app.display.html().contains("Variables"));

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();
    assert!(app.display.html().contains("Control Flow"));

    assert_eq!(app.sidebar.active_link(PanelId(0)), Some(1));

    // Closing the section again restores the glyph
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    assert!(!app.sidebar.is_open(PanelId(0)));
    assert_eq!(app.sidebar.control_label(0), "▸ Core");
}

#[tokio::test]
async fn test_reload_retriggers_last_request() {
    let mock_server = MockServer::start().await;
    mount_markdown(&mock_server, "/docs/index.md", "# Again").await;

    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(MemoryStore::new()));
    press(&mut app, KeyCode::Char('r'));
    assert!(app.rx.try_recv().is_err(), "nothing to reload yet");

    app.load("docs/");
    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();

    press(&mut app, KeyCode::Char('r'));
    let outcome = next_outcome(&mut app).await;
    assert!(matches!(outcome, NetworkResponse::Success(ref p, _) if p == "docs/"));
}

#[tokio::test]
async fn test_theme_toggle_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");

    let store = FileStore::open(&settings).unwrap();
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(store));
    assert_eq!(app.theme.mode(), AppearanceMode::Light);

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.theme.mode(), AppearanceMode::Dark);
    assert_eq!(app.theme.persisted(), Some(AppearanceMode::Dark));

    let reopened = FileStore::open(&settings).unwrap();
    assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));

    let restarted = ThemeManager::init(Box::new(reopened));
    assert_eq!(restarted.mode(), AppearanceMode::Dark);
}

#[tokio::test]
async fn test_mobile_sidebar_toggle() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.resize(MOBILE_BREAKPOINT - 20, 24);
    assert!(!app.sidebar_visible());

    press(&mut app, KeyCode::Char('m'));
    assert!(app.sidebar_visible());

    press(&mut app, KeyCode::Char('m'));
    assert!(!app.sidebar_visible());
}

#[tokio::test]
async fn test_manifest_fetched_from_site() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nav.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"sections":[{"title":"Advanced","links":[{"label":"Threads","path":"advanced/threads/"}]}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let app = build_app(&mock_server.uri(), &NavManifest::default(), Box::new(MemoryStore::new()));
    let manifest = app.loader.fetch_manifest().await.unwrap();
    assert_eq!(manifest.sections[0].title, "Advanced");
}

#[tokio::test]
async fn test_ui_rendering() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.resize(100, 20);

    let backend = TestBackend::new(100, 20);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|f| ui(f, &app)).unwrap();

    let buffer = terminal.backend().buffer();
    let buffer_string: String = buffer.content().iter().map(|c| c.symbol()).collect();
    assert!(buffer_string.contains("Contents"));
    assert!(buffer_string.contains("Core"));
    assert!(buffer_string.contains("Welcome to the documentation"));
    assert!(buffer_string.contains("theme: light"));
}

#[tokio::test]
async fn test_quit_key() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    assert!(!press(&mut app, KeyCode::Char('j')));
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[tokio::test]
async fn test_click_on_header_toggles_panel() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.resize(100, 20);

    // Row 1 is the first line inside the sidebar border
    click(&mut app, 4, 1);
    assert!(app.sidebar.is_open(PanelId(0)));

    click(&mut app, 4, 1);
    assert!(!app.sidebar.is_open(PanelId(0)));
}

#[tokio::test]
async fn test_click_on_border_or_status_row_is_ignored() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.resize(100, 20);

    click(&mut app, 4, 0);
    click(&mut app, 4, 18);
    click(&mut app, 4, 19);
    assert!(!app.sidebar.is_open(PanelId(0)));
    assert_eq!(app.sidebar.cursor, 0);
}

#[tokio::test]
async fn test_click_on_link_loads_and_highlights() {
    let mock_server = MockServer::start().await;
    mount_markdown(&mock_server, "/core/control-flow/index.md", "# Control Flow").await;

    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(MemoryStore::new()));
    app.resize(100, 20);
    click(&mut app, 4, 1);
    click(&mut app, 4, 3);

    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();
    assert!(app.display.html().contains("Control Flow"));
    assert_eq!(app.sidebar.active_link(PanelId(0)), Some(1));
}

#[tokio::test]
async fn test_wheel_scrolls_content_or_sidebar() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.resize(100, 20);
    let long_doc: String = (0..60).map(|i| format!("<p>Paragraph {i}</p>")).collect();
    handle_network_event(&mut app, NetworkResponse::Success("long/".into(), long_doc)).unwrap();
    app.display.settle();
    click(&mut app, 4, 1);

    // Over the content pane
    mouse(&mut app, MouseEventKind::ScrollDown, 60, 5);
    assert_eq!(app.display.scroll(), 3);
    assert_eq!(app.sidebar.cursor, 0);

    // Over the sidebar
    mouse(&mut app, MouseEventKind::ScrollDown, 4, 5);
    assert_eq!(app.sidebar.cursor, 1);
    assert_eq!(app.display.scroll(), 3);

    mouse(&mut app, MouseEventKind::ScrollUp, 60, 5);
    assert_eq!(app.display.scroll(), 0);
}

#[tokio::test]
async fn test_sidebar_scrolls_to_keep_cursor_visible() {
    let mut app = build_app("http://127.0.0.1:9/", &many_sections(30), Box::new(MemoryStore::new()));
    app.resize(100, 12);
    for _ in 0..25 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(app.sidebar.cursor, 25);

    let screen = draw(&app, 100, 12);
    assert!(screen.contains("Sec25"));
    assert!(!screen.contains("Sec0 "));

    // Clicks map through the scroll offset
    click(&mut app, 4, 1);
    assert_eq!(app.sidebar.cursor, app.sidebar.scroll);
    assert!(app.sidebar.scroll > 0);
}

#[tokio::test]
async fn test_startup_open_loads_after_theme_is_applied() {
    let mock_server = MockServer::start().await;
    mount_markdown(&mock_server, "/docs/index.md", "# Hi").await;

    let store = MemoryStore::with_entry(THEME_KEY, "dark");
    let mut app = build_app(&mock_server.uri(), &manifest(), Box::new(store));
    assert_eq!(app.theme.mode(), AppearanceMode::Dark);

    app.startup(Some("docs/"));
    assert_eq!(app.theme.mode(), AppearanceMode::Dark);

    let outcome = next_outcome(&mut app).await;
    assert!(matches!(outcome, NetworkResponse::Success(ref p, _) if p == "docs/"));
}

#[tokio::test]
async fn test_startup_without_open_keeps_welcome_page() {
    let mut app = build_app("http://127.0.0.1:9/", &manifest(), Box::new(MemoryStore::new()));
    app.startup(None);
    assert!(app.rx.try_recv().is_err());
    assert_eq!(app.display.html(), docnav::app::WELCOME_HTML);
}

#[tokio::test]
async fn test_background_manifest_fills_sidebar() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nav.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"sections":[{"title":"Advanced","links":[{"label":"Threads","path":"advanced/threads/"}]}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let mut app = build_app(&mock_server.uri(), &NavManifest::default(), Box::new(MemoryStore::new()));
    app.resize(60, 20);
    app.toggle_sidebar();
    assert!(app.sidebar.controls.is_empty());

    app.loader.load_manifest();
    let outcome = next_outcome(&mut app).await;
    handle_network_event(&mut app, outcome).unwrap();

    assert_eq!(app.sidebar.control_label(0), "▸ Advanced");
    assert!(app.sidebar_visible(), "mobile toggle survives the refresh");
}
