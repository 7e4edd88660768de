//! Render-ready view model for the board.
//!
//! [`ViewModelBuilder::build`] is a pure function of the feed and the
//! [`ViewState`]: calling it twice with the same inputs produces equal output.

use crate::config::Config;
use crate::feed::{Feed, Item};

use super::date::format_display_date;
use super::organizer::ThemeOrganizer;
use super::state::ViewState;

/// Shown instead of categories when the feed has no items at all.
pub const EMPTY_PLACEHOLDER: &str = "No TLDR emails yet. Check back tomorrow.";

/// Shown as the last-updated label when the feed carries no timestamp.
pub const NO_TIMESTAMP_LABEL: &str = "—";

/// One visible tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub display_tag: String,
    pub display_date: String,
    pub is_read: bool,
    pub is_liked: bool,
}

impl TileView {
    /// Label for the archive action.
    pub fn read_label(&self) -> &'static str {
        if self.is_read {
            "Archived"
        } else {
            "Archive"
        }
    }

    /// Label for the like action.
    pub fn like_label(&self) -> &'static str {
        if self.is_liked {
            "Liked"
        } else {
            "Like"
        }
    }
}

/// A category section.
///
/// `tile_count` counts every item in the category, including tiles hidden
/// by the archive filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub theme: String,
    pub tile_count: usize,
    pub tiles: Vec<TileView>,
}

impl CategoryView {
    pub fn count_label(&self) -> String {
        format!("{} tiles", self.tile_count)
    }
}

/// Feed-level summary shown above the categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestHeader {
    pub updated_label: String,
    /// Items not marked read, regardless of the archive filter.
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestBody {
    /// The feed has no items.
    Empty,
    /// At least one category; its tiles may all be hidden.
    Categories(Vec<CategoryView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestView {
    pub header: DigestHeader,
    pub body: DigestBody,
}

impl DigestView {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, DigestBody::Empty)
    }

    pub fn categories(&self) -> &[CategoryView] {
        match &self.body {
            DigestBody::Empty => &[],
            DigestBody::Categories(categories) => categories,
        }
    }

    /// Visible tiles in display order, with their category.
    pub fn visible_tiles(&self) -> impl Iterator<Item = (&CategoryView, &TileView)> {
        self.categories()
            .iter()
            .flat_map(|category| category.tiles.iter().map(move |tile| (category, tile)))
    }

    pub fn visible_count(&self) -> usize {
        self.categories().iter().map(|c| c.tiles.len()).sum()
    }
}

/// Turns a feed plus session state into a [`DigestView`].
#[derive(Debug, Clone)]
pub struct ViewModelBuilder {
    organizer: ThemeOrganizer,
    fallback_tag: String,
}

impl ViewModelBuilder {
    pub fn new(organizer: ThemeOrganizer, fallback_tag: impl Into<String>) -> Self {
        Self {
            organizer,
            fallback_tag: fallback_tag.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ThemeOrganizer::new(config.theme_order.iter().cloned(), config.default_theme.clone()),
            config.fallback_tag.clone(),
        )
    }

    pub fn build(&self, feed: &Feed, state: &ViewState) -> DigestView {
        let unread_count = feed
            .items
            .iter()
            .filter(|item| !state.is_read(&item.id))
            .count();

        let updated_label = match feed.updated_at.as_deref() {
            Some(ts) if !ts.is_empty() => format_display_date(Some(ts)),
            _ => NO_TIMESTAMP_LABEL.to_string(),
        };

        let header = DigestHeader {
            updated_label,
            unread_count,
        };

        let groups = self.organizer.group(&feed.items);
        if groups.is_empty() {
            return DigestView {
                header,
                body: DigestBody::Empty,
            };
        }

        let categories = groups
            .into_iter()
            .map(|group| {
                let tile_count = group.items.len();
                let tiles = group
                    .items
                    .into_iter()
                    .map(|item| self.tile_for(item, state))
                    .filter(|tile| state.show_archived || !tile.is_read)
                    .collect();
                CategoryView {
                    theme: group.theme,
                    tile_count,
                    tiles,
                }
            })
            .collect();

        DigestView {
            header,
            body: DigestBody::Categories(categories),
        }
    }

    fn tile_for(&self, item: &Item, state: &ViewState) -> TileView {
        let display_tag = match item.source.as_deref() {
            Some(source) if !source.is_empty() => source.to_string(),
            _ => self.fallback_tag.clone(),
        };

        TileView {
            id: item.id.clone(),
            title: item.title.clone(),
            summary: item.summary.clone().unwrap_or_default(),
            display_tag,
            display_date: format_display_date(item.date.as_deref()),
            is_read: state.is_read(&item.id),
            is_liked: state.is_liked(&item.id),
        }
    }
}
