use super::state::Page;

/// Anything whose rendered text the search box can match.
pub trait Searchable {
    fn search_text(&self) -> String;
}

impl Searchable for &str {
    fn search_text(&self) -> String {
        self.to_string()
    }
}

/// Case-insensitive substring filter over rendered elements.
///
/// Elements are hidden, never removed, so clearing the query restores everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self { query: query.to_lowercase() }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.query)
    }

    /// Whether `item` stays visible on `page`.
    pub fn is_visible(&self, page: Page, item: &impl Searchable) -> bool {
        !page.is_searchable() || self.matches(&item.search_text())
    }

    /// Visibility mask for every element on the active page.
    pub fn apply<T: Searchable>(&self, page: Page, items: &[T]) -> Vec<bool> {
        items.iter().map(|item| self.is_visible(page, item)).collect()
    }
}
