use docnav::app::App;
use docnav::config::{Args, SiteConfig, read_manifest};
use docnav::constants::{CHANNEL_CAPACITY, EVENT_POLL_TIMEOUT_MS, LOG_ENV_VAR};
use docnav::event_handler::{handle_key_event, handle_mouse_event, handle_network_event};
use docnav::loader::ContentLoader;
use docnav::markdown::CommonMarkRenderer;
use docnav::models::NavManifest;
use docnav::network::NetworkManager;
use docnav::storage::{FileStore, KeyValueStore, MemoryStore};
use docnav::theme::ThemeManager;
use docnav::ui::ui;

use std::{error::Error, io, path::Path, sync::Arc, sync::Mutex, time::Duration};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing_subscriber::EnvFilter;

fn init_logging(path: &Path) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_store() -> Box<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "settings store opened");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "settings store unavailable; theme will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Reads a local `--nav` manifest. Without one the sidebar starts empty and
/// the site's manifest is fetched once the UI is up.
fn local_manifest(args: &Args) -> NavManifest {
    let Some(path) = &args.nav else {
        return NavManifest::default();
    };
    read_manifest(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "no sidebar manifest; starting with an empty sidebar");
        NavManifest::default()
    })
}

/// Panics on load tasks are turned into failed loads, so only the UI thread
/// tears the terminal down.
fn restores_terminal(thread_name: Option<&str>) -> bool {
    thread_name == Some("main")
}

// MAIN LOOP (ASYNC)
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args.log_path())?;

    let config = SiteConfig::new(&args.base_url, args.suffix)?;
    tracing::info!(base = %config.base_url, suffix = config.convention.suffix(), "starting docnav");

    let (tx, rx) = tokio::sync::mpsc::channel(CHANNEL_CAPACITY);
    let loader = ContentLoader::new(
        config,
        Arc::new(NetworkManager::new()?),
        Arc::new(CommonMarkRenderer::default()),
        tx.clone(),
    );
    let manifest = local_manifest(&args);
    let theme = ThemeManager::init(open_store());
    let mut app = App::new(tx, rx, loader, &manifest, theme);

    // This hook catches panics and restores the terminal before printing the error
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if !restores_terminal(std::thread::current().name()) {
            tracing::error!(panic = %panic_info, "background task panicked");
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if args.nav.is_none() {
        app.loader.load_manifest();
    }
    app.startup(args.open.as_deref());
    let res = run_app(&mut terminal, app).await;

    // Teardown
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        eprintln!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        // Apply finished loads in arrival order
        while let Ok(response) = app.rx.try_recv() {
            handle_network_event(&mut app, response)?;
        }
        app.display.tick();

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Resize(width, height) => app.resize(width, height),
                Event::Key(key) => {
                    if handle_key_event(&mut app, key)? {
                        return Ok(()); // Quit signal received
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(&mut app, mouse)?,
                _ => {}
            }
        }
    }
}
