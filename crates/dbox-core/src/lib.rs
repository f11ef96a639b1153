//! dbox core library - UI-agnostic remote browsing logic.
//!
//! `dbox-core` holds everything about browsing a remote file store that
//! does not depend on a terminal: entries, the listing cache, navigation
//! and selection, the [`Controller`] state machine, batch downloads and the
//! Dropbox client. The `dbox-tui` binary drives it.
//!
//! # Modules
//!
//! - [`remote`] - [`RemoteStore`] capability, [`RemoteEntry`], path helpers, Dropbox client.
//! - [`nav`] - Navigation state, listing cache, and sorting.
//! - [`controller`] - The state machine consuming [`Event`]s and issuing [`Command`]s.
//! - [`download`] - Selection expansion and local mirroring.
//! - [`notice`] - Transient status and error messages.
//! - [`config`] - User-facing configuration (TOML-based settings, keymaps, theme).
//! - [`action`] - User actions and their metadata.
//! - [`event`] - Event and command types between controller and executor.
//! - [`error`] - Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod controller;
pub mod download;
pub mod error;
pub mod event;
pub mod nav;
pub mod notice;
pub mod remote;

pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};

pub use controller::{Controller, Phase};
pub use download::{download_selection, DownloadReport};
pub use nav::cache::ListingCache;
pub use nav::filter::sort_entries;
pub use nav::panel::NavigationState;
pub use notice::{Notice, NoticeKind, Notices};
pub use remote::dropbox::{DropboxClient, DropboxConfig, DropboxError};
pub use remote::entry::RemoteEntry;
pub use remote::RemoteStore;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
