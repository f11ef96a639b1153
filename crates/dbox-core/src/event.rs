//! Event system between the controller and the executor.
//!
//! The frontend feeds [`Event`]s into [`crate::controller::Controller::update`],
//! which may answer with a [`Command`] for the executor to run off the
//! interaction loop. Command results come back as further events.

use crate::action::Action;
use crate::download::DownloadReport;
use crate::remote::entry::RemoteEntry;

/// Long-running work the controller asks the executor to perform.
///
/// Commands flow **Controller → Executor**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the folder at `path` (`""` is the root).
    FetchListing { path: String },
    /// Download the given entries under the local root.
    Download { entries: Vec<RemoteEntry> },
    /// Open `url` in the system browser; `label` names the folder in messages.
    OpenUrl { url: String, label: String },
}

/// Everything the controller reacts to.
///
/// Events flow **Input / Executor → Controller**.
#[derive(Debug, Clone)]
pub enum Event {
    /// A user action resolved from the keymap.
    Input(Action),
    /// A listing fetch succeeded.
    ListingLoaded {
        path: String,
        entries: Vec<RemoteEntry>,
    },
    /// A listing fetch failed.
    ListingFailed { path: String, error: String },
    /// A download batch ran to completion.
    DownloadFinished(DownloadReport),
    /// An informational message from the executor.
    Status(String),
    /// A non-fatal failure reported by the executor.
    Error(String),
}
