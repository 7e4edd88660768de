//! Session controller: owns the view state, applies user actions and pushes
//! a freshly built screen to the render sink after every change.
//!
//! Load lifecycle: `Idle → Loading → {Rendered | Error}`. Loads are issued
//! with a [`LoadTicket`]; only the most recently issued ticket may complete,
//! so a slow response can never overwrite a newer one.

use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::digest::{DigestView, ViewModelBuilder, ViewState};
use crate::feed::{fetch_feed, Feed, FeedSource, FetchError};
use crate::storage::Database;

/// Shown while a load is in flight.
pub const LOADING_MESSAGE: &str = "Loading TLDR tiles...";

/// Shown when a load fails.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load TLDR tiles. Run the Gmail sync.";

/// Where the controller is in the load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Rendered,
    Error,
}

/// Everything a sink may be asked to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error(String),
    Digest(DigestView),
}

/// Receives every screen the controller produces.
pub trait RenderSink {
    fn present(&mut self, screen: &Screen);
}

/// Identifies one load request. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

pub struct StateController<S: RenderSink> {
    db: Database,
    client: reqwest::Client,
    source: FeedSource,
    timeout: Duration,
    builder: ViewModelBuilder,
    view_state: ViewState,
    feed: Option<Feed>,
    load_state: LoadState,
    load_sequence: u64,
    sink: S,
}

impl<S: RenderSink> StateController<S> {
    pub fn new(
        db: Database,
        client: reqwest::Client,
        source: FeedSource,
        config: &Config,
        sink: S,
    ) -> Self {
        Self {
            db,
            client,
            source,
            timeout: config.request_timeout(),
            builder: ViewModelBuilder::from_config(config),
            view_state: ViewState::new(config.show_archived),
            feed: None,
            load_state: LoadState::Idle,
            load_sequence: 0,
            sink,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn feed(&self) -> Option<&Feed> {
        self.feed.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Label for the archive toggle affordance.
    pub fn archive_toggle_label(&self) -> &'static str {
        if self.view_state.show_archived {
            "Hide archived"
        } else {
            "Show archived"
        }
    }

    /// Build the digest from the last fetched feed, if any.
    pub fn rebuild(&self) -> Option<DigestView> {
        self.feed
            .as_ref()
            .map(|feed| self.builder.build(feed, &self.view_state))
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Enter `Loading`, show the loading screen and issue a new ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_sequence = self.load_sequence.wrapping_add(1);
        self.load_state = LoadState::Loading;
        self.sink.present(&Screen::Loading);
        tracing::debug!(sequence = self.load_sequence, source = %self.source, "Load started");
        LoadTicket(self.load_sequence)
    }

    /// A `'static` future that fetches the feed, for spawning off the UI task.
    pub fn fetch_task(&self) -> impl Future<Output = Result<Feed, FetchError>> + Send + 'static {
        let client = self.client.clone();
        let source = self.source.clone();
        let timeout = self.timeout;
        async move { fetch_feed(&client, &source, timeout).await }
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Returns false (and changes nothing) if a newer load has been issued
    /// since. On success the id sets are re-read from storage before the
    /// rebuild. On failure the error screen is shown and the view state and
    /// last feed are left as they were.
    pub async fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Feed, FetchError>,
    ) -> bool {
        if ticket.0 != self.load_sequence || self.load_state != LoadState::Loading {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.load_sequence,
                "Discarding stale load result"
            );
            return false;
        }

        match result {
            Ok(feed) => {
                self.view_state.reload_sets(&self.db).await;
                self.feed = Some(feed);
                self.load_state = LoadState::Rendered;
                self.render();
            }
            Err(e) => {
                tracing::warn!(source = %self.source, error = %e, "Feed load failed");
                self.load_state = LoadState::Error;
                self.sink
                    .present(&Screen::Error(LOAD_ERROR_MESSAGE.to_string()));
            }
        }
        true
    }

    /// Re-fetch the feed and rebuild.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_load();
        let result = self.fetch_task().await;
        self.finish_load(ticket, result).await;
    }

    /// Flip the archive filter and reload.
    ///
    /// This re-fetches rather than re-filtering the cached feed, so the
    /// toggle also picks up a newer feed document.
    pub async fn toggle_show_archived(&mut self) {
        self.flip_show_archived();
        self.refresh().await;
    }

    /// Flip the archive filter without loading. The caller must follow up
    /// with a load (see [`Self::toggle_show_archived`]).
    pub fn flip_show_archived(&mut self) -> bool {
        self.view_state.show_archived = !self.view_state.show_archived;
        tracing::info!(
            show_archived = self.view_state.show_archived,
            "Archive filter toggled"
        );
        self.view_state.show_archived
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Archive `id`: add it to the read set, persist, rebuild.
    pub async fn mark_read(&mut self, id: &str) {
        if self.view_state.read_ids.insert(id) {
            tracing::debug!(id = %id, "Marked read");
        }
        if let Err(e) = self.view_state.read_ids.save(&self.db).await {
            tracing::warn!(id = %id, error = %e, "Failed to persist read ids");
        }
        self.rerender();
    }

    /// Flip the liked state of `id`, persist, rebuild. Returns the new state.
    pub async fn toggle_liked(&mut self, id: &str) -> bool {
        let liked = self.view_state.liked_ids.toggle(id);
        tracing::debug!(id = %id, liked, "Toggled like");
        if let Err(e) = self.view_state.liked_ids.save(&self.db).await {
            tracing::warn!(id = %id, error = %e, "Failed to persist liked ids");
        }
        self.rerender();
        liked
    }

    /// Rebuild after a mutation. Only a rendered board is redrawn; loading
    /// and error screens stay until the next load completes.
    fn rerender(&mut self) {
        if self.load_state == LoadState::Rendered {
            self.render();
        }
    }

    fn render(&mut self) {
        if let Some(view) = self.rebuild() {
            self.sink.present(&Screen::Digest(view));
        }
    }
}
