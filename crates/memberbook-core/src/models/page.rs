use serde::{Deserialize, Serialize};

/// Uniform pagination wrapper used by the collection endpoints:
/// `{count, next, previous, results}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            count: self.count,
            next: self.next.clone(),
            previous: self.previous.clone(),
        }
    }
}

/// Pagination metadata a store keeps alongside its list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Some lookup collections are served either as a bare array or wrapped in
/// the pagination envelope depending on the server's configuration. Accept
/// both shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListOrPage<T> {
    Plain(Vec<T>),
    Page(Paginated<T>),
}

impl<T> ListOrPage<T> {
    pub fn into_results(self) -> Vec<T> {
        match self {
            ListOrPage::Plain(items) => items,
            ListOrPage::Page(page) => page.results,
        }
    }
}
