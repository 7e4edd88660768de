use std::cmp::Reverse;
use std::collections::HashMap;

use crate::feed::Item;

/// Items sharing one category label, in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub theme: String,
    pub items: Vec<&'a Item>,
}

/// Groups items by theme and orders the groups by a priority list.
///
/// Listed themes come first, by list position. Unlisted themes follow,
/// largest group first; equal sizes keep first-seen order.
#[derive(Debug, Clone)]
pub struct ThemeOrganizer {
    rank: HashMap<String, usize>,
    default_theme: String,
}

impl ThemeOrganizer {
    pub fn new<I, S>(priority: I, default_theme: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rank = HashMap::new();
        for (index, theme) in priority.into_iter().enumerate() {
            // First occurrence wins if the list repeats a theme
            rank.entry(theme.into()).or_insert(index);
        }
        Self {
            rank,
            default_theme: default_theme.into(),
        }
    }

    /// Position of `theme` in the priority list, if listed.
    pub fn rank_of(&self, theme: &str) -> Option<usize> {
        self.rank.get(theme).copied()
    }

    /// Partition `items` by theme and sort the groups.
    pub fn group<'a>(&self, items: &'a [Item]) -> Vec<CategoryGroup<'a>> {
        let mut groups = self.partition(items);
        // sort_by_cached_key is stable, which keeps first-seen order on ties
        groups.sort_by_cached_key(|group| match self.rank_of(&group.theme) {
            Some(index) => (0, index, Reverse(0)),
            None => (1, 0, Reverse(group.items.len())),
        });
        groups
    }

    /// Groups in first-seen order, items in feed order within each.
    fn partition<'a>(&self, items: &'a [Item]) -> Vec<CategoryGroup<'a>> {
        let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
        let mut index_by_theme: HashMap<&str, usize> = HashMap::new();

        for item in items {
            let theme = item.theme_or(&self.default_theme);
            match index_by_theme.get(theme) {
                Some(&idx) => groups[idx].items.push(item),
                None => {
                    index_by_theme.insert(theme, groups.len());
                    groups.push(CategoryGroup {
                        theme: theme.to_string(),
                        items: vec![item],
                    });
                }
            }
        }

        groups
    }
}
