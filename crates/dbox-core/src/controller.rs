//! The browser state machine.
//!
//! [`Controller`] owns the [`NavigationState`] and the [`ListingCache`] and
//! is the only thing that changes them. Every input and every executor
//! result goes through [`Controller::update`], which returns the next state
//! and at most one [`Command`] for the executor.
//!
//! At most one listing fetch and at most one download batch are in flight
//! at any time. A second request for either is turned away with a status
//! message instead of being queued; asking again for the folder already
//! being fetched just waits for that result.

use std::time::Instant;

use crate::action::Action;
use crate::download::DownloadReport;
use crate::event::{Command, Event};
use crate::nav::cache::ListingCache;
use crate::nav::filter::sort_entries;
use crate::nav::panel::NavigationState;
use crate::notice::{Notice, Notices};
use crate::remote::entry::RemoteEntry;
use crate::remote::path::{self, normalize, ROOT};

/// Which long-running operation, if any, the controller is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    AwaitingListing,
    AwaitingDownload,
}

/// The listing fetch currently in flight.
///
/// `apply` is cleared when the user moves to another cached folder before
/// the result arrives, and set again when they return to `path` or ask for
/// it once more. A result with `apply` cleared is cached but not displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingListing {
    path: String,
    apply: bool,
}

#[derive(Debug, Clone)]
pub struct Controller {
    nav: NavigationState,
    cache: ListingCache,
    pending: Option<PendingListing>,
    downloading: bool,
    notices: Notices,
    web_base: String,
    show_help: bool,
    should_quit: bool,
}

impl Controller {
    /// Creates a controller at the root with nothing loaded.
    pub fn new(web_base: impl Into<String>, notices: Notices) -> Self {
        Self {
            nav: NavigationState::new(),
            cache: ListingCache::new(),
            pending: None,
            downloading: false,
            notices,
            web_base: web_base.into(),
            show_help: false,
            should_quit: false,
        }
    }

    /// Issues the initial root listing.
    pub fn start(self) -> (Self, Option<Command>) {
        self.fetch(ROOT)
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn cache(&self) -> &ListingCache {
        &self.cache
    }

    pub fn phase(&self) -> Phase {
        if self.downloading {
            Phase::AwaitingDownload
        } else if self.pending.is_some() {
            Phase::AwaitingListing
        } else {
            Phase::Browsing
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Message to display at `now`, if any.
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notices.visible(now)
    }

    /// Applies one event.
    pub fn update(self, event: Event, now: Instant) -> (Self, Option<Command>) {
        match event {
            Event::Input(action) => self.handle_action(action, now),
            Event::ListingLoaded { path, entries } => (self.apply_listing(&path, entries), None),
            Event::ListingFailed { path, error } => {
                (self.listing_failed(&path, &error, now), None)
            }
            Event::DownloadFinished(report) => (self.download_finished(report, now), None),
            Event::Status(msg) => (self.with_status(msg, now), None),
            Event::Error(msg) => (self.with_error(msg, now), None),
        }
    }

    fn handle_action(self, action: Action, now: Instant) -> (Self, Option<Command>) {
        if self.downloading {
            if action == Action::ForceQuit {
                return (self.quit(), None);
            }
            return (self, None);
        }

        if self.show_help && !matches!(action, Action::Help | Action::Quit | Action::ForceQuit) {
            return (
                Self {
                    show_help: false,
                    ..self
                },
                None,
            );
        }

        match action {
            Action::Quit | Action::ForceQuit => (self.quit(), None),
            Action::Help => {
                let show_help = !self.show_help;
                (Self { show_help, ..self }, None)
            }
            Action::CursorUp => (self.map_nav(NavigationState::move_up), None),
            Action::CursorDown => (self.map_nav(NavigationState::move_down), None),
            Action::PageUp => (self.map_nav(NavigationState::page_up), None),
            Action::PageDown => (self.map_nav(NavigationState::page_down), None),
            Action::CursorTop => (self.map_nav(NavigationState::go_to_first), None),
            Action::CursorBottom => (self.map_nav(NavigationState::go_to_last), None),
            Action::ToggleSelect => (self.map_nav(NavigationState::toggle_cursor_selection), None),
            Action::Open => self.open_cursor(now),
            Action::GoParent => {
                let current = self.nav.current_path().to_string();
                if path::is_root(&current) {
                    return (self, None);
                }
                self.enter_folder(&path::parent(&current), now)
            }
            Action::Reload => {
                let current = self.nav.current_path().to_string();
                self.fetch_or_reject(&current, now)
            }
            Action::ClearCache => {
                let mut cache = self.cache;
                cache.clear();
                tracing::info!("listing cache cleared");
                (Self { cache, ..self }.with_status("Cache cleared", now), None)
            }
            Action::OpenInBrowser => {
                let current = self.nav.current_path();
                let url = path::web_url(&self.web_base, current);
                let label = display_path(current).to_string();
                (self, Some(Command::OpenUrl { url, label }))
            }
            Action::Download => self.start_download(now),
        }
    }

    fn map_nav(self, f: impl FnOnce(NavigationState) -> NavigationState) -> Self {
        Self {
            nav: f(self.nav),
            ..self
        }
    }

    fn quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    fn with_status(self, msg: impl Into<String>, now: Instant) -> Self {
        Self {
            notices: self.notices.with_status(msg, now),
            ..self
        }
    }

    fn with_error(self, msg: impl Into<String>, now: Instant) -> Self {
        Self {
            notices: self.notices.with_error(msg, now),
            ..self
        }
    }

    fn open_cursor(self, now: Instant) -> (Self, Option<Command>) {
        let Some(entry) = self.nav.cursor_entry().cloned() else {
            return (self, None);
        };
        if entry.is_folder() {
            self.enter_folder(entry.path(), now)
        } else {
            let msg = format!("Opening file: {}", entry.name());
            (self.with_status(msg, now), None)
        }
    }

    /// Shows `target` from the cache, or fetches it when it is not cached.
    fn enter_folder(self, target: &str, now: Instant) -> (Self, Option<Command>) {
        let target = normalize(target);
        let Some(entries) = self.cache.get(&target).map(<[RemoteEntry]>::to_vec) else {
            return self.fetch_or_reject(&target, now);
        };

        tracing::debug!(path = %target, "cache hit");
        let pending = self.pending.map(|p| PendingListing {
            apply: p.path == target,
            ..p
        });
        let nav = self.nav.with_listing(&target, entries);
        (
            Self {
                nav,
                pending,
                ..self
            },
            None,
        )
    }

    fn fetch_or_reject(self, target: &str, now: Instant) -> (Self, Option<Command>) {
        let target = normalize(target);
        if let Some(pending) = &self.pending {
            if pending.path == target {
                tracing::debug!(path = %target, "pending listing requested again");
                let pending = Some(PendingListing {
                    path: target,
                    apply: true,
                });
                return (Self { pending, ..self }, None);
            }
            let msg = format!("Still loading {}", display_path(&pending.path));
            return (self.with_status(msg, now), None);
        }
        self.fetch(&target)
    }

    fn fetch(self, target: &str) -> (Self, Option<Command>) {
        let path = normalize(target);
        tracing::debug!(path = %path, "fetch listing");
        let pending = Some(PendingListing {
            path: path.clone(),
            apply: true,
        });
        (
            Self { pending, ..self },
            Some(Command::FetchListing { path }),
        )
    }

    fn apply_listing(self, path: &str, entries: Vec<RemoteEntry>) -> Self {
        let path = normalize(path);
        let sorted = sort_entries(&entries);
        let mut cache = self.cache;
        cache.put(&path, sorted.clone());

        let (apply, pending) = match self.pending {
            Some(p) if p.path == path => (p.apply || self.nav.current_path() == path, None),
            other => (false, other),
        };
        if !apply {
            tracing::debug!(path = %path, "stale listing cached, not shown");
            return Self {
                cache,
                pending,
                ..self
            };
        }

        tracing::info!(path = %path, entries = sorted.len(), "listing loaded");
        Self {
            nav: self.nav.with_listing(&path, sorted),
            cache,
            pending,
            ..self
        }
    }

    fn listing_failed(self, path: &str, error: &str, now: Instant) -> Self {
        let path = normalize(path);
        tracing::warn!(path = %path, error, "listing failed");
        let pending = match self.pending {
            Some(p) if p.path == path => None,
            other => other,
        };
        let msg = format!("Failed to list folder {}: {error}", display_path(&path));
        Self { pending, ..self }.with_error(msg, now)
    }

    fn start_download(self, now: Instant) -> (Self, Option<Command>) {
        let entries = self.nav.selected_entries();
        if entries.is_empty() {
            return (self.with_status("No files selected for download", now), None);
        }
        if let Some(pending) = &self.pending {
            let msg = format!(
                "Cannot download while loading {}",
                display_path(&pending.path)
            );
            return (self.with_status(msg, now), None);
        }
        tracing::info!(count = entries.len(), "download started");
        (
            Self {
                downloading: true,
                ..self
            },
            Some(Command::Download { entries }),
        )
    }

    fn download_finished(self, report: DownloadReport, now: Instant) -> Self {
        Self {
            downloading: false,
            ..self
        }
        .with_status(report.summary(), now)
    }
}

fn display_path(path: &str) -> &str {
    if path::is_root(path) {
        "/"
    } else {
        path
    }
}
