//! Runs controller commands off the interaction loop.
//!
//! Each [`Command`] becomes a tokio task whose result is sent back to the
//! main loop as an [`Event`] over an unbounded mpsc channel. Task handles
//! are kept so the batch can be aborted on quit.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use dbox_core::{download_selection, Command, Event, RemoteStore};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub struct Executor {
    store: Arc<dyn RemoteStore>,
    tx: UnboundedSender<Event>,
    local_root: PathBuf,
    tasks: Vec<JoinHandle<()>>,
}

impl Executor {
    pub fn new(store: Arc<dyn RemoteStore>, tx: UnboundedSender<Event>, local_root: PathBuf) -> Self {
        Self {
            store,
            tx,
            local_root,
            tasks: Vec::new(),
        }
    }

    /// Starts the work for `command`.
    pub fn dispatch(&mut self, command: Command) {
        self.tasks.retain(|t| !t.is_finished());
        tracing::debug!(?command, "dispatch");

        let handle = match command {
            Command::FetchListing { path } => spawn_listing(self.store.clone(), self.tx.clone(), path),
            Command::Download { entries } => {
                let store = self.store.clone();
                let tx = self.tx.clone();
                let root = self.local_root.clone();
                tokio::spawn(async move {
                    let report = download_selection(store.as_ref(), &entries, &root).await;
                    let _ = tx.send(Event::DownloadFinished(report));
                })
            }
            Command::OpenUrl { url, label } => {
                let tx = self.tx.clone();
                tokio::task::spawn_blocking(move || {
                    let _ = tx.send(open_in_browser(&url, &label));
                })
            }
        };
        self.tasks.push(handle);
    }

    /// Aborts every task still running.
    pub fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            if !task.is_finished() {
                tracing::info!("aborting in-flight task");
                task.abort();
            }
        }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.abort_all();
    }
}

fn spawn_listing(
    store: Arc<dyn RemoteStore>,
    tx: UnboundedSender<Event>,
    path: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match store.list(&path).await {
            Ok(entries) => Event::ListingLoaded { path, entries },
            Err(e) => Event::ListingFailed {
                path,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event);
    })
}

/// Platform command that opens `url` with the default browser.
fn browser_command(url: &str) -> Option<std::process::Command> {
    let mut cmd = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "linux") {
        std::process::Command::new("xdg-open")
    } else if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/c", "start"]);
        c
    } else {
        return None;
    };
    cmd.arg(url);
    Some(cmd)
}

fn open_in_browser(url: &str, label: &str) -> Event {
    let Some(mut cmd) = browser_command(url) else {
        return Event::Error("Cannot open browser on this platform".to_string());
    };
    match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => Event::Status(format!("Opened {label} in browser")),
        Err(e) => {
            tracing::warn!(url, error = %e, "browser launch failed");
            Event::Error(format!("Failed to open browser: {e}"))
        }
    }
}
