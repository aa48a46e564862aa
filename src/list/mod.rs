//! Remote, server-paginated lists with a page-local search filter.
//!
//! [`PagedListController`] keeps one page of a remote resource in memory and
//! mediates the row actions a table offers (delete, edit). Search only ever
//! looks at the page that is currently loaded: records on other pages are not
//! found until the user pages to them.

mod controller;

pub use controller::{
    DeleteOutcome, ListOptions, ListView, LoadOutcome, LoadState, PagedListController,
};

use crate::error::FetchError;
use crate::shared::types::ListPage;

/// A row that can be shown in a paged table.
pub trait ListRecord: Clone {
    type Id: Clone + PartialEq + std::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// `term` is already lowercased.
    fn matches(&self, term: &str) -> bool;
}

/// Fetch-by-page contract of a remote resource.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    type Record: ListRecord;

    async fn fetch_page(&self, page: u32, limit: u32)
        -> Result<ListPage<Self::Record>, FetchError>;

    async fn delete(&self, id: &<Self::Record as ListRecord>::Id) -> Result<(), FetchError>;
}

#[cfg(test)]
mod tests;
