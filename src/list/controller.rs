use std::cell::{Cell, RefCell};

use dioxus::logger::tracing::{debug, info, warn};

use super::{DataSource, ListRecord};
use crate::error::FetchError;
use crate::notify::Notifier;
use crate::shared::types::ListPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Fixed page size sent with every fetch.
    pub page_limit: u32,
    /// Lowercase nouns used in notifications, e.g. "user" / "users".
    pub singular: &'static str,
    pub plural: &'static str,
}

impl ListOptions {
    pub fn new(page_limit: u32, singular: &'static str, plural: &'static str) -> Self {
        Self {
            page_limit: page_limit.max(1),
            singular,
            plural,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { seq: u64, page: u32 },
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched page replaced the current one.
    Applied,
    /// The fetch failed; the previous page is still shown.
    Failed(FetchError),
    /// A newer request was issued while this one was in flight.
    Stale,
    /// Page number out of range; nothing was requested.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(FetchError),
}

/// What the presentation layer gets to see.
///
/// `items` is the search-filtered view of the loaded page, not the page itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<R> {
    pub items: Vec<R>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub search_term: String,
    pub editing: Option<R>,
}

impl<R> ListView<R> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl<R> Default for ListView<R> {
    fn default() -> Self {
        let page = ListPage::<R>::default();
        Self {
            items: Vec::new(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_count: page.total_count,
            loading: false,
            error: None,
            search_term: String::new(),
            editing: None,
        }
    }
}

struct ListState<R> {
    page: ListPage<R>,
    term: String,
    derived: Vec<R>,
    load: LoadState,
    error: Option<String>,
    editing: Option<R>,
}

impl<R: ListRecord> ListState<R> {
    fn rederive(&mut self) {
        self.derived = if self.term.is_empty() {
            self.page.items.clone()
        } else {
            self.page
                .items
                .iter()
                .filter(|r| r.matches(&self.term))
                .cloned()
                .collect()
        };
    }
}

type Observer<R> = Box<dyn Fn(&ListView<R>)>;

/// Owns one page of a remote list plus the local search filter.
///
/// All methods take `&self` so several page loads can be in flight at once on
/// a single-threaded executor. Every load is tagged with a sequence number;
/// only the completion of the most recently issued load is applied, older
/// ones are dropped when they arrive.
pub struct PagedListController<S: DataSource, N: Notifier> {
    source: S,
    notifier: N,
    options: ListOptions,
    state: RefCell<ListState<S::Record>>,
    issued: Cell<u64>,
    observer: RefCell<Option<Observer<S::Record>>>,
}

impl<S: DataSource, N: Notifier> PagedListController<S, N> {
    pub fn new(source: S, notifier: N, options: ListOptions) -> Self {
        Self {
            source,
            notifier,
            options,
            state: RefCell::new(ListState {
                page: ListPage::default(),
                term: String::new(),
                derived: Vec::new(),
                load: LoadState::Idle,
                error: None,
                editing: None,
            }),
            issued: Cell::new(0),
            observer: RefCell::new(None),
        }
    }

    /// Called with a fresh view after every state change.
    pub fn with_observer(self, f: impl Fn(&ListView<S::Record>) + 'static) -> Self {
        *self.observer.borrow_mut() = Some(Box::new(f));
        self
    }

    pub fn view(&self) -> ListView<S::Record> {
        let st = self.state.borrow();
        ListView {
            items: st.derived.clone(),
            current_page: st.page.current_page,
            total_pages: st.page.total_pages,
            total_count: st.page.total_count,
            loading: matches!(st.load, LoadState::Loading { .. }),
            error: st.error.clone(),
            search_term: st.term.clone(),
            editing: st.editing.clone(),
        }
    }

    /// The unfiltered page as last received from the server.
    #[cfg(test)]
    pub fn page(&self) -> ListPage<S::Record> {
        self.state.borrow().page.clone()
    }

    #[cfg(test)]
    pub fn load_state(&self) -> LoadState {
        self.state.borrow().load
    }

    fn publish(&self) {
        if let Some(observer) = self.observer.borrow().as_ref() {
            let view = self.view();
            observer(&view);
        }
    }

    /// Fetches `page` and, if it is still the latest request when it
    /// completes, replaces the loaded page with it.
    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        if page < 1 {
            return LoadOutcome::Rejected;
        }
        let seq = self.begin_load(page);
        let result = self
            .source
            .fetch_page(page, self.options.page_limit)
            .await;
        self.finish_load(seq, page, result)
    }

    fn begin_load(&self, page: u32) -> u64 {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        debug!("[{}] loading page {} (request #{})", self.options.plural, page, seq);
        self.state.borrow_mut().load = LoadState::Loading { seq, page };
        self.publish();
        seq
    }

    fn finish_load(
        &self,
        seq: u64,
        page: u32,
        result: Result<ListPage<S::Record>, FetchError>,
    ) -> LoadOutcome {
        if seq != self.issued.get() {
            debug!(
                "[{}] dropping stale response for page {} (request #{}, latest #{})",
                self.options.plural,
                page,
                seq,
                self.issued.get()
            );
            return LoadOutcome::Stale;
        }
        match result {
            Ok(fetched) => {
                let fetched = self.normalize(fetched, page);
                {
                    let mut st = self.state.borrow_mut();
                    st.page = fetched;
                    st.error = None;
                    st.load = LoadState::Loaded;
                    st.rederive();
                }
                self.publish();
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!("[{}] error fetching page {}: {}", self.options.plural, page, err);
                let message = err.user_message(&format!("Error fetching {}", self.options.plural));
                {
                    let mut st = self.state.borrow_mut();
                    st.error = Some(message.clone());
                    st.load = LoadState::Failed;
                }
                self.publish();
                self.notifier.error(&message);
                LoadOutcome::Failed(err)
            }
        }
    }

    fn normalize(&self, mut fetched: ListPage<S::Record>, requested: u32) -> ListPage<S::Record> {
        if fetched.current_page == 0 {
            fetched.current_page = requested;
        }
        if fetched.total_pages < fetched.current_page {
            warn!(
                "[{}] server reported page {} of {}; treating it as the last page",
                self.options.plural, fetched.current_page, fetched.total_pages
            );
        }
        fetched.total_pages = fetched.total_pages.max(fetched.current_page).max(1);
        let limit = self.options.page_limit as usize;
        if fetched.items.len() > limit {
            warn!(
                "[{}] server returned {} items for a page of {}; truncating",
                self.options.plural,
                fetched.items.len(),
                limit
            );
            fetched.items.truncate(limit);
        }
        fetched
    }

    /// Filters the loaded page by name/email, case-insensitively.
    ///
    /// Never fetches: records on other pages are not searched.
    pub fn set_search_term(&self, term: &str) {
        {
            let mut st = self.state.borrow_mut();
            st.term = term.to_lowercase();
            st.rederive();
        }
        self.publish();
    }

    /// Moves to `target` if it is within `1..=total_pages`; otherwise does nothing.
    pub async fn change_page(&self, target: u32) -> LoadOutcome {
        let total_pages = self.state.borrow().page.total_pages;
        if target < 1 || target > total_pages {
            debug!(
                "[{}] ignoring page change to {} (of {})",
                self.options.plural, target, total_pages
            );
            return LoadOutcome::Rejected;
        }
        self.load_page(target).await
    }

    /// Deletes `id` once `confirm` says yes, then reloads the current page so
    /// counts stay in sync with the server.
    pub async fn request_delete(
        &self,
        id: &<S::Record as ListRecord>::Id,
        confirm: impl FnOnce() -> bool,
    ) -> DeleteOutcome {
        if !confirm() {
            return DeleteOutcome::Cancelled;
        }
        match self.source.delete(id).await {
            Ok(()) => {
                info!("[{}] deleted {}", self.options.plural, id);
                let current = self.state.borrow().page.current_page;
                self.load_page(current).await;
                self.notifier.success(&format!(
                    "{} deleted successfully",
                    capitalize(self.options.singular)
                ));
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!("[{}] error deleting {}: {}", self.options.plural, id, err);
                let message = match &err {
                    FetchError::Application { message, .. } => format!("Delete Error: {message}"),
                    FetchError::Transport(e) => {
                        format!("Error deleting {}: {}", self.options.singular, e)
                    }
                };
                self.notifier.error(&message);
                DeleteOutcome::Failed(err)
            }
        }
    }

    /// Marks `record` as being edited. Advisory only, nothing is changed on the server.
    pub fn request_edit(&self, record: S::Record) {
        self.state.borrow_mut().editing = Some(record);
        self.publish();
    }

    pub fn clear_edit(&self) {
        self.state.borrow_mut().editing = None;
        self.publish();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
