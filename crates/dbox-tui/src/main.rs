//! dbox - a terminal browser and downloader for Dropbox built with ratatui.
//!
//! This binary loads configuration and credentials, initialises the
//! terminal, runs the main event loop, and restores the terminal on exit
//! or panic.

mod executor;
mod icons;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dbox_core::config::settings::{access_token, config_dir};
use dbox_core::{
    ActionRegistry, Config, Controller, DropboxClient, Event, Keymap, Notices, RemoteStore, Theme,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::executor::Executor;
use crate::input::{handle_key, InputState};
use crate::render::{render, View};

/// Everything resolved before the terminal is touched.
struct Session {
    config: Config,
    view: View,
    store: Arc<dyn RemoteStore>,
    download_root: PathBuf,
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file so output never interferes with the terminal UI.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("dbox.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let level = level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn prepare() -> anyhow::Result<Session> {
    let dir = config_dir();
    let config = Config::load_or_default(&dir.join("default.toml"))
        .context("failed to load configuration")?;
    init_tracing(&config.log.level)?;

    let token = access_token()?;

    let download_root = config.general.download_root();
    std::fs::create_dir_all(&download_root).with_context(|| {
        format!("failed to create download folder {}", download_root.display())
    })?;

    let keymap = Keymap::load(&dir.join("keymap.toml")).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "using default keymap");
        Keymap::default()
    });
    let theme = Theme::load(&dir.join("theme.toml")).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "using default theme");
        Theme::default()
    });

    let client = DropboxClient::new(config.dropbox(token))?;
    tracing::info!(root = %download_root.display(), "dbox starting");

    Ok(Session {
        view: View {
            theme,
            keymap,
            registry: ActionRegistry::new(),
            show_icons: config.ui.show_icons,
        },
        config,
        store: Arc::new(client),
        download_root,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let session = match prepare() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, session).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        tracing::error!(error = %e, "dbox exited with an error");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: Session,
) -> anyhow::Result<()> {
    let Session {
        config,
        view,
        store,
        download_root,
    } = session;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut executor = Executor::new(store, tx, download_root);

    let notices = Notices::new(config.ui.status_duration(), config.ui.error_duration());
    let (mut controller, command) = Controller::new(config.remote.web_url.clone(), notices).start();
    if let Some(command) = command {
        executor.dispatch(command);
    }

    let mut input_state = InputState::new();

    loop {
        while let Ok(event) = rx.try_recv() {
            let (next, command) = controller.update(event, Instant::now());
            controller = next;
            if let Some(command) = command {
                executor.dispatch(command);
            }
        }

        let now = Instant::now();
        terminal.draw(|f| render(f, &controller, &view, now))?;

        if controller.should_quit() {
            executor.abort_all();
            tracing::info!("dbox exiting");
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let (action, next_state) = handle_key(key, &input_state, &view.keymap);
                input_state = next_state;

                if let Some(action) = action {
                    let (next, command) = controller.update(Event::Input(action), Instant::now());
                    controller = next;
                    if let Some(command) = command {
                        executor.dispatch(command);
                    }
                }
            }
        }
    }

    Ok(())
}
