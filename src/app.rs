use crate::controller::{LoadState, LoadTicket, RenderSink, Screen, StateController};
use crate::digest::{DigestView, TileView};
use crate::feed::{Feed, FetchError};
use std::borrow::Cow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Events sent from background tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A spawned fetch finished. The ticket decides whether it still applies.
    FeedLoaded {
        ticket: LoadTicket,
        result: Result<Feed, FetchError>,
    },
}

/// Render sink for the TUI: keeps the latest screen for the next draw.
#[derive(Debug)]
pub struct ScreenSlot {
    screen: Screen,
    dirty: bool,
}

impl Default for ScreenSlot {
    fn default() -> Self {
        Self {
            screen: Screen::Loading,
            dirty: true,
        }
    }
}

impl ScreenSlot {
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Returns true once after each new screen.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl RenderSink for ScreenSlot {
    fn present(&mut self, screen: &Screen) {
        self.screen = screen.clone();
        self.dirty = true;
    }
}

/// Terminal UI state wrapped around the session controller.
pub struct App {
    pub controller: StateController<ScreenSlot>,

    /// Index into the visible tiles, in display order.
    pub selected: usize,
    pub show_help: bool,
    pub needs_redraw: bool,
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// In-flight fetch task, aborted when superseded.
    pub load_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(controller: StateController<ScreenSlot>) -> Self {
        Self {
            controller,
            selected: 0,
            show_help: false,
            needs_redraw: true,
            status_message: None,
            load_handle: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        self.controller.sink().screen()
    }

    /// The digest currently on screen, if the board is rendered.
    pub fn digest(&self) -> Option<&DigestView> {
        match self.screen() {
            Screen::Digest(view) => Some(view),
            _ => None,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.digest().map_or(0, DigestView::visible_count)
    }

    pub fn selected_tile(&self) -> Option<&TileView> {
        self.digest()?
            .visible_tiles()
            .nth(self.selected)
            .map(|(_, tile)| tile)
    }

    /// Pick up a new screen from the controller, keeping the selection in range.
    pub fn sync_screen(&mut self) {
        if self.controller.sink_mut().take_dirty() {
            self.clamp_selection();
            self.needs_redraw = true;
        }
    }

    pub fn clamp_selection(&mut self) {
        let count = self.visible_count();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_count() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_count().saturating_sub(1);
    }

    /// Move to the first visible tile of the next category that has one.
    pub fn select_next_category(&mut self) {
        if let Some(index) = self.category_starts().into_iter().find(|&i| i > self.selected) {
            self.selected = index;
        }
    }

    /// Move to the start of the current category, or of the previous one
    /// if already there.
    pub fn select_prev_category(&mut self) {
        if let Some(index) = self
            .category_starts()
            .into_iter()
            .rev()
            .find(|&i| i < self.selected)
        {
            self.selected = index;
        }
    }

    /// Visible-tile index of the first tile in each non-empty category.
    fn category_starts(&self) -> Vec<usize> {
        let Some(view) = self.digest() else {
            return Vec::new();
        };
        let mut starts = Vec::new();
        let mut index = 0;
        for category in view.categories() {
            if !category.tiles.is_empty() {
                starts.push(index);
            }
            index += category.tiles.len();
        }
        starts
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Start a load and fetch the feed in the background.
    ///
    /// The previous fetch, if still running, is aborted; its ticket is stale
    /// anyway.
    pub fn start_load(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous feed fetch");
        }

        let ticket = self.controller.begin_load();
        let fetch = self.controller.fetch_task();
        let tx = event_tx.clone();

        self.load_handle = Some(tokio::spawn(async move {
            let result = fetch.await;
            if let Err(e) = tx.send(AppEvent::FeedLoaded { ticket, result }).await {
                tracing::warn!(error = %e, "Failed to send feed result (receiver dropped)");
            }
        }));
        self.sync_screen();
    }

    pub fn refresh(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.start_load(event_tx);
        self.set_status("Refreshing...");
    }

    pub fn toggle_show_archived(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        let showing = self.controller.flip_show_archived();
        self.start_load(event_tx);
        self.set_status(if showing {
            "Showing archived tiles"
        } else {
            "Hiding archived tiles"
        });
    }

    /// Archive the selected tile.
    pub async fn mark_selected_read(&mut self) {
        let Some((id, is_read)) = self.selected_tile().map(|t| (t.id.clone(), t.is_read)) else {
            return;
        };
        if is_read {
            self.set_status("Already archived");
            return;
        }
        self.controller.mark_read(&id).await;
        self.sync_screen();
        self.set_status("Archived");
    }

    /// Toggle like on the selected tile.
    pub async fn toggle_selected_liked(&mut self) {
        let Some(id) = self.selected_tile().map(|tile| tile.id.clone()) else {
            return;
        };
        let liked = self.controller.toggle_liked(&id).await;
        self.sync_screen();
        self.set_status(if liked { "Liked" } else { "Like removed" });
    }

    pub async fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FeedLoaded { ticket, result } => {
                let applied = self.controller.finish_load(ticket, result).await;
                if applied {
                    self.load_handle = None;
                    if self.controller.load_state() == LoadState::Error {
                        self.set_status("Load failed");
                    }
                }
                self.sync_screen();
            }
        }
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted feed fetch on App drop");
        }
    }
}
