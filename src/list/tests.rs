use std::cell::RefCell;
use std::collections::HashMap;
use std::pin::pin;
use std::rc::Rc;

use futures::poll;
use tokio::sync::oneshot;

use super::*;
use crate::notify::{Notifier, Severity};
use crate::shared::types::{Role, Status, User, UserId};

#[derive(Default)]
struct MockInner {
    pages: RefCell<HashMap<u32, Result<ListPage<User>, FetchError>>>,
    delete_result: RefCell<Option<FetchError>>,
    gates: RefCell<HashMap<u32, oneshot::Receiver<()>>>,
    fetches: RefCell<Vec<(u32, u32)>>,
    deletes: RefCell<Vec<UserId>>,
}

#[derive(Clone, Default)]
struct MockSource {
    inner: Rc<MockInner>,
}

impl MockSource {
    fn with_page(self, page: u32, result: Result<ListPage<User>, FetchError>) -> Self {
        self.inner.pages.borrow_mut().insert(page, result);
        self
    }

    fn set_page(&self, page: u32, result: Result<ListPage<User>, FetchError>) {
        self.inner.pages.borrow_mut().insert(page, result);
    }

    fn fail_deletes_with(&self, err: FetchError) {
        *self.inner.delete_result.borrow_mut() = Some(err);
    }

    /// Holds the next fetch of `page` until the returned sender fires.
    fn gate(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.gates.borrow_mut().insert(page, rx);
        tx
    }

    fn fetches(&self) -> Vec<(u32, u32)> {
        self.inner.fetches.borrow().clone()
    }

    fn deletes(&self) -> Vec<UserId> {
        self.inner.deletes.borrow().clone()
    }
}

impl DataSource for MockSource {
    type Record = User;

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ListPage<User>, FetchError> {
        self.inner.fetches.borrow_mut().push((page, limit));
        let gate = self.inner.gates.borrow_mut().remove(&page);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.inner
            .pages
            .borrow()
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::application(404, "Page not found")))
    }

    async fn delete(&self, id: &UserId) -> Result<(), FetchError> {
        self.inner.deletes.borrow_mut().push(id.clone());
        match self.inner.delete_result.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    seen: Rc<RefCell<Vec<(Severity, String)>>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<(Severity, String)> {
        self.seen.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, text: &str) {
        self.seen.borrow_mut().push((severity, text.to_string()));
    }
}

fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role: Role::Viewer,
        status: Status::Active,
    }
}

fn page_of(count: usize, page: u32, total_pages: u32, total_count: u64) -> ListPage<User> {
    let items = (0..count)
        .map(|i| {
            let id = format!("{page}-{i}");
            user(&id, &format!("User {id}"), &format!("user{id}@example.com"))
        })
        .collect();
    ListPage {
        items,
        current_page: page,
        total_pages,
        total_count,
    }
}

fn three_page_source() -> MockSource {
    MockSource::default()
        .with_page(1, Ok(page_of(10, 1, 3, 25)))
        .with_page(2, Ok(page_of(10, 2, 3, 25)))
        .with_page(3, Ok(page_of(5, 3, 3, 25)))
}

fn controller(
    source: MockSource,
    notes: RecordingNotifier,
) -> PagedListController<MockSource, RecordingNotifier> {
    PagedListController::new(source, notes, ListOptions::new(10, "user", "users"))
}

#[tokio::test]
async fn pages_through_a_three_page_listing() {
    let source = three_page_source();
    let ctrl = controller(source.clone(), RecordingNotifier::default());

    assert_eq!(ctrl.load_page(1).await, LoadOutcome::Applied);
    let view = ctrl.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.total_count, 25);
    assert_eq!(view.items.len(), 10);
    assert!(!view.loading);

    assert_eq!(ctrl.change_page(4).await, LoadOutcome::Rejected);
    assert_eq!(ctrl.view().current_page, 1);
    assert_eq!(source.fetches(), vec![(1, 10)]);

    assert_eq!(ctrl.change_page(2).await, LoadOutcome::Applied);
    assert_eq!(ctrl.view().current_page, 2);
    assert_eq!(source.fetches(), vec![(1, 10), (2, 10)]);
}

#[tokio::test]
async fn change_page_outside_bounds_is_a_no_op() {
    let source = three_page_source();
    let ctrl = controller(source.clone(), RecordingNotifier::default());
    ctrl.load_page(2).await;

    for target in [0, 4, 100, u32::MAX] {
        assert_eq!(ctrl.change_page(target).await, LoadOutcome::Rejected);
        assert_eq!(ctrl.view().current_page, 2);
    }
    assert_eq!(source.fetches().len(), 1);
}

#[tokio::test]
async fn change_page_before_first_load_only_allows_page_one() {
    let source = three_page_source();
    let ctrl = controller(source.clone(), RecordingNotifier::default());

    assert_eq!(ctrl.change_page(2).await, LoadOutcome::Rejected);
    assert_eq!(ctrl.change_page(1).await, LoadOutcome::Applied);
    assert_eq!(ctrl.view().total_pages, 3);
}

#[tokio::test]
async fn load_page_zero_is_rejected_without_fetching() {
    let source = three_page_source();
    let ctrl = controller(source.clone(), RecordingNotifier::default());

    assert_eq!(ctrl.load_page(0).await, LoadOutcome::Rejected);
    assert!(source.fetches().is_empty());
    assert_eq!(ctrl.load_state(), LoadState::Idle);
}

#[tokio::test]
async fn failed_load_keeps_previous_page() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(1).await;
    let before = ctrl.page();

    source.set_page(2, Err(FetchError::application(500, "Database unavailable")));
    let outcome = ctrl.load_page(2).await;

    assert!(matches!(outcome, LoadOutcome::Failed(FetchError::Application { status: 500, .. })));
    assert_eq!(ctrl.page(), before);
    assert_eq!(ctrl.view().current_page, 1);
    assert_eq!(ctrl.view().error.as_deref(), Some("Database unavailable"));
    assert_eq!(ctrl.load_state(), LoadState::Failed);
    assert_eq!(
        notes.messages(),
        vec![(Severity::Error, "Database unavailable".to_string())]
    );
}

#[tokio::test]
async fn transport_failure_uses_generic_message() {
    let source = MockSource::default().with_page(1, Err(FetchError::transport("connection refused")));
    let notes = RecordingNotifier::default();
    let ctrl = controller(source, notes.clone());

    ctrl.load_page(1).await;

    assert_eq!(ctrl.view().error.as_deref(), Some("Error fetching users"));
    assert_eq!(
        notes.messages(),
        vec![(Severity::Error, "Error fetching users".to_string())]
    );
    assert_eq!(ctrl.page(), ListPage::default());
}

#[tokio::test]
async fn successful_load_clears_previous_error() {
    let source = MockSource::default().with_page(1, Err(FetchError::transport("timeout")));
    let ctrl = controller(source.clone(), RecordingNotifier::default());
    ctrl.load_page(1).await;
    assert!(ctrl.view().error.is_some());

    source.set_page(1, Ok(page_of(3, 1, 1, 3)));
    assert_eq!(ctrl.load_page(1).await, LoadOutcome::Applied);
    assert_eq!(ctrl.view().error, None);
    assert_eq!(ctrl.load_state(), LoadState::Loaded);
}

#[tokio::test]
async fn search_filters_current_page_by_name() {
    let page = ListPage {
        items: vec![
            user("1", "Alice", "alice@example.com"),
            user("2", "Bob", "bob@example.com"),
        ],
        current_page: 1,
        total_pages: 4,
        total_count: 40,
    };
    let source = MockSource::default().with_page(1, Ok(page));
    let ctrl = controller(source.clone(), RecordingNotifier::default());
    ctrl.load_page(1).await;

    ctrl.set_search_term("al");
    let names: Vec<_> = ctrl.view().items.into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Alice"]);

    ctrl.set_search_term("al");
    assert_eq!(ctrl.view().items.len(), 1);

    let view = ctrl.view();
    assert_eq!(view.total_pages, 4);
    assert_eq!(view.total_count, 40);
    assert_eq!(source.fetches().len(), 1);
}

#[tokio::test]
async fn search_is_case_insensitive_and_checks_email() {
    let page = ListPage {
        items: vec![
            user("1", "Alice", "alice@example.com"),
            user("2", "Bob", "bob@corp.io"),
            user("3", "Carol", "carol@CORP.io"),
        ],
        current_page: 1,
        total_pages: 1,
        total_count: 3,
    };
    let ctrl = controller(
        MockSource::default().with_page(1, Ok(page)),
        RecordingNotifier::default(),
    );
    ctrl.load_page(1).await;

    ctrl.set_search_term("Corp");
    let ids: Vec<_> = ctrl.view().items.into_iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec!["2", "3"]);
    assert_eq!(ctrl.view().search_term, "corp");

    ctrl.set_search_term("ALICE");
    assert_eq!(ctrl.view().items.len(), 1);

    ctrl.set_search_term("zzz");
    assert!(ctrl.view().items.is_empty());

    ctrl.set_search_term("");
    assert_eq!(ctrl.view().items, ctrl.page().items);
}

#[tokio::test]
async fn search_term_is_reapplied_to_new_pages() {
    let source = MockSource::default()
        .with_page(
            1,
            Ok(ListPage {
                items: vec![user("1", "Alice", "a@x.io"), user("2", "Bob", "b@x.io")],
                current_page: 1,
                total_pages: 2,
                total_count: 4,
            }),
        )
        .with_page(
            2,
            Ok(ListPage {
                items: vec![user("3", "Alan", "al@x.io"), user("4", "Dora", "d@x.io")],
                current_page: 2,
                total_pages: 2,
                total_count: 4,
            }),
        );
    let ctrl = controller(source, RecordingNotifier::default());
    ctrl.load_page(1).await;
    ctrl.set_search_term("al");

    ctrl.change_page(2).await;

    let names: Vec<_> = ctrl.view().items.into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Alan"]);
}

#[tokio::test]
async fn delete_reloads_current_page_once() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(2).await;

    source.set_page(2, Ok(page_of(10, 2, 3, 24)));
    let outcome = ctrl.request_delete(&UserId::from("2-3"), || true).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(source.deletes(), vec![UserId::from("2-3")]);
    assert_eq!(source.fetches(), vec![(2, 10), (2, 10)]);
    assert_eq!(ctrl.view().total_count, 24);
    assert_eq!(
        notes.messages(),
        vec![(Severity::Success, "User deleted successfully".to_string())]
    );
}

#[tokio::test]
async fn declined_confirmation_does_nothing() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(1).await;

    let outcome = ctrl.request_delete(&UserId::from("1-0"), || false).await;

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(source.deletes().is_empty());
    assert_eq!(source.fetches().len(), 1);
    assert!(notes.messages().is_empty());
}

#[tokio::test]
async fn delete_failure_reports_server_message() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(1).await;
    let before = ctrl.page();

    source.fail_deletes_with(FetchError::application(403, "Admins cannot be deleted"));
    let outcome = ctrl.request_delete(&UserId::from("1-0"), || true).await;

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert_eq!(source.fetches().len(), 1);
    assert_eq!(ctrl.page(), before);
    assert_eq!(
        notes.messages(),
        vec![(Severity::Error, "Delete Error: Admins cannot be deleted".to_string())]
    );
}

#[tokio::test]
async fn delete_transport_failure_mentions_the_error() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(1).await;

    source.fail_deletes_with(FetchError::transport("connection refused"));
    ctrl.request_delete(&UserId::from("1-0"), || true).await;

    assert_eq!(
        notes.messages(),
        vec![(Severity::Error, "Error deleting user: connection refused".to_string())]
    );
}

#[tokio::test]
async fn edit_intent_is_advisory() {
    let source = three_page_source();
    let ctrl = controller(source.clone(), RecordingNotifier::default());
    ctrl.load_page(1).await;
    let before = ctrl.page();
    let target = before.items[4].clone();

    ctrl.request_edit(target.clone());
    assert_eq!(ctrl.view().editing, Some(target));
    assert_eq!(ctrl.page(), before);
    assert_eq!(source.fetches().len(), 1);

    ctrl.clear_edit();
    assert_eq!(ctrl.view().editing, None);
}

#[tokio::test]
async fn newer_request_wins_when_it_completes_first() {
    let source = three_page_source();
    let ctrl = controller(source.clone(), RecordingNotifier::default());
    ctrl.load_page(1).await;

    let release_two = source.gate(2);
    let release_three = source.gate(3);
    let mut older = pin!(ctrl.load_page(2));
    let mut newer = pin!(ctrl.load_page(3));
    assert!(poll!(older.as_mut()).is_pending());
    assert!(poll!(newer.as_mut()).is_pending());
    assert!(ctrl.view().loading);

    release_three.send(()).unwrap();
    assert_eq!(newer.await, LoadOutcome::Applied);
    release_two.send(()).unwrap();
    assert_eq!(older.await, LoadOutcome::Stale);

    assert_eq!(ctrl.view().current_page, 3);
    assert!(!ctrl.view().loading);
}

#[tokio::test]
async fn late_response_for_an_older_request_is_dropped() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(1).await;

    source.set_page(2, Err(FetchError::transport("reset by peer")));
    let release_two = source.gate(2);
    let release_three = source.gate(3);
    let mut older = pin!(ctrl.load_page(2));
    let mut newer = pin!(ctrl.load_page(3));
    assert!(poll!(older.as_mut()).is_pending());
    assert!(poll!(newer.as_mut()).is_pending());

    release_two.send(()).unwrap();
    assert_eq!(older.await, LoadOutcome::Stale);
    assert_eq!(ctrl.view().current_page, 1);
    assert!(ctrl.view().loading);

    release_three.send(()).unwrap();
    assert_eq!(newer.await, LoadOutcome::Applied);
    assert_eq!(ctrl.view().current_page, 3);
    assert!(notes.messages().is_empty());
}

#[tokio::test]
async fn observer_sees_loading_transitions() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let ctrl = PagedListController::new(
        three_page_source(),
        RecordingNotifier::default(),
        ListOptions::new(10, "user", "users"),
    )
    .with_observer({
        let seen = seen.clone();
        move |view: &ListView<User>| seen.borrow_mut().push((view.loading, view.current_page))
    });

    ctrl.load_page(2).await;

    assert_eq!(*seen.borrow(), vec![(true, 1), (false, 2)]);
}

#[tokio::test]
async fn oversized_pages_are_truncated_and_normalized() {
    let mut page = page_of(15, 0, 0, 15);
    page.current_page = 0;
    let ctrl = controller(
        MockSource::default().with_page(1, Ok(page)),
        RecordingNotifier::default(),
    );

    ctrl.load_page(1).await;

    let view = ctrl.view();
    assert_eq!(view.items.len(), 10);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_pages, 1);
}

#[tokio::test]
async fn error_payload_on_ok_status_keeps_previous_page() {
    let source = three_page_source();
    let notes = RecordingNotifier::default();
    let ctrl = controller(source.clone(), notes.clone());
    ctrl.load_page(1).await;
    let before = ctrl.page();

    let body = br#"{"success": false, "message": "Database unavailable"}"#;
    source.set_page(2, crate::api::decode::<ListPage<User>>(200, body));
    let outcome = ctrl.load_page(2).await;

    assert_eq!(
        outcome,
        LoadOutcome::Failed(FetchError::application(200, "Database unavailable"))
    );
    assert_eq!(ctrl.page(), before);
    assert_eq!(ctrl.view().total_count, 25);
    assert_eq!(
        notes.messages(),
        vec![(Severity::Error, "Database unavailable".to_string())]
    );
}

#[tokio::test]
async fn current_page_beyond_total_pages_is_clamped() {
    let ctrl = controller(
        MockSource::default().with_page(5, Ok(page_of(2, 5, 3, 22))),
        RecordingNotifier::default(),
    );

    ctrl.load_page(5).await;

    let view = ctrl.view();
    assert_eq!(view.current_page, 5);
    assert_eq!(view.total_pages, 5);
    assert!(!view.has_next());
    assert!(view.has_previous());
}
