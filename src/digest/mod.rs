//! Digest reconciliation: grouping, ordering and decorating feed items.
//!
//! - [`organizer`] - Groups items by theme and orders the groups
//! - [`view`] - Builds the render-ready view model from feed + session state
//! - [`state`] - Session state (archive filter, read and liked id sets)
//! - [`date`] - Short-date formatting with raw-text fallback

mod date;
mod organizer;
mod state;
mod view;

pub use date::{format_display_date, parse_date};
pub use organizer::{CategoryGroup, ThemeOrganizer};
pub use state::ViewState;
pub use view::{
    CategoryView, DigestBody, DigestHeader, DigestView, TileView, ViewModelBuilder,
    EMPTY_PLACEHOLDER, NO_TIMESTAMP_LABEL,
};
