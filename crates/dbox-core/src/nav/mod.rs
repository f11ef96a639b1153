//! Navigation logic for dbox.
//!
//! This module contains the [`panel::NavigationState`] (current folder,
//! cursor, selection), the [`cache::ListingCache`] of fetched folders, and
//! the listing [`filter::sort_entries`] rule.

pub mod cache;
pub mod filter;
pub mod panel;
