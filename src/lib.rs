//! Terminal board for TLDR digest tiles.
//!
//! A JSON feed of news items is grouped into themed categories, decorated
//! with the user's read and liked state (kept in a local SQLite store) and
//! shown either in a `ratatui` TUI or as plain text.
//!
//! - [`feed`] - Feed document model, sources and fetching
//! - [`storage`] - SQLite key-value store and persisted id sets
//! - [`digest`] - Grouping, ordering and the render-ready view model
//! - [`controller`] - Load lifecycle and user actions
//! - [`app`] / [`ui`] - Terminal front end

pub mod app;
pub mod config;
pub mod controller;
pub mod digest;
pub mod feed;
pub mod storage;
pub mod ui;
pub mod util;
