//! Feed document loading.
//!
//! - [`model`] - The JSON document shape (`Feed`, `Item`)
//! - [`source`] - Remote URL or local file, with cache busting for URLs
//! - [`fetcher`] - Fetching and decoding with size and timeout limits

mod fetcher;
mod model;
mod source;

pub use fetcher::{build_client, fetch_feed, parse_feed, FetchError};
pub use model::{Feed, Item, DEFAULT_THEME};
pub use source::{cache_busted_url, FeedSource};
