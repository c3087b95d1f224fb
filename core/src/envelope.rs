//! Wire envelope and pagination types.
//!
//! Every success body from the backend arrives as `{ "data": ... }`; failure
//! bodies carry `{ "message": ... }`. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` wrapper around every success payload.
///
/// `data` is `None` both for an explicit `"data": null` and for a body with
/// no `data` key at all; the per-operation rules in
/// [`ResourceClient`](crate::client::ResourceClient) decide whether that is
/// an empty result or an error.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Envelope for an empty 2xx body.
    pub fn empty() -> Self {
        Self { data: None }
    }
}

/// Failure body shape. `message` is optional so a bare error body still
/// classifies; callers substitute "Request failed" when it is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// A paginated list result.
///
/// `hasMore` is intentionally not a field: it is derivable from the two page
/// numbers and storing it would let the three values desynchronize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub total_count: u64,
    pub per_page: u32,
}

impl<T> PageData<T> {
    /// Whether another page exists after the current one.
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// A list response: either a bare array or a [`PageData`] object, depending
/// on whether the endpoint paginates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListData<T> {
    Page(PageData<T>),
    Items(Vec<T>),
}

impl<T> ListData<T> {
    /// The empty, unpaginated result. Returned when a list endpoint answers
    /// with no `data`.
    pub fn empty() -> Self {
        ListData::Items(Vec::new())
    }

    pub fn len(&self) -> usize {
        match self {
            ListData::Page(page) => page.items.len(),
            ListData::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page metadata, when the response was paginated.
    pub fn page(&self) -> Option<&PageData<T>> {
        match self {
            ListData::Page(page) => Some(page),
            ListData::Items(_) => None,
        }
    }

    /// Flatten to the items, discarding page metadata.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListData::Page(page) => page.items,
            ListData::Items(items) => items,
        }
    }
}
