use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::application::{
    api::ApiError,
    deletion::PendingDeletion,
    notifications::{Notification, NotificationLevel},
    pagination::PaginationView,
    rows::TableRow,
};
use crate::domain::records::{CommentPatch, CommentRecord, PostPatch, PostRecord, UserRecord};
use crate::presentation::target::RenderError;
use deaddit_admin_types::MutationResponse;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List(ListQuery),
    Update(ResourceKind, String, RecordPatch),
    Delete(ResourceKind, String),
    BulkDelete(ResourceKind, Vec<String>),
}

/// In-memory backend: serves pages from a fixed dataset and answers
/// mutations from a script.
#[derive(Default)]
struct FakeApi {
    records: BTreeMap<ResourceKind, Vec<ResourceRecord>>,
    fail_lists: Mutex<bool>,
    failing_kinds: Mutex<BTreeSet<ResourceKind>>,
    mutations: Mutex<VecDeque<Result<MutationResponse, ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    fn with(mut self, kind: ResourceKind, records: Vec<ResourceRecord>) -> Self {
        self.records.insert(kind, records);
        self
    }

    fn script(self, response: Result<MutationResponse, ApiError>) -> Self {
        self.mutations.lock().expect("lock").push_back(response);
        self
    }

    fn fail_lists(&self, fail: bool) {
        *self.fail_lists.lock().expect("lock") = fail;
    }

    fn fail_kind(self, kind: ResourceKind) -> Self {
        self.failing_kinds.lock().expect("lock").insert(kind);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push(call);
    }

    fn next_mutation(&self) -> Result<MutationResponse, ApiError> {
        self.mutations
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(MutationResponse {
                    success: true,
                    ..MutationResponse::default()
                })
            })
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list(&self, query: &ListQuery) -> Result<ListResult, ApiError> {
        self.record(Call::List(query.clone()));
        if *self.fail_lists.lock().expect("lock")
            || self.failing_kinds.lock().expect("lock").contains(&query.kind)
        {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            });
        }
        let all = self.records.get(&query.kind).cloned().unwrap_or_default();
        let matching: Vec<_> = all
            .into_iter()
            .filter(|record| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| record.id().contains(term))
            })
            .collect();
        let per_page = query.per_page.get() as usize;
        let total = matching.len();
        let pages = total.div_ceil(per_page) as u32;
        let start = (query.page.get() as usize - 1) * per_page;
        let items = matching.into_iter().skip(start).take(per_page).collect();
        Ok(ListResult::new(
            query.kind,
            items,
            query.page.get(),
            pages,
            Some(total as u64),
        ))
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<MutationResponse, ApiError> {
        self.record(Call::Update(kind, id.to_string(), patch.clone()));
        self.next_mutation()
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<MutationResponse, ApiError> {
        self.record(Call::Delete(kind, id.to_string()));
        self.next_mutation()
    }

    async fn bulk_delete(
        &self,
        kind: ResourceKind,
        ids: &[String],
    ) -> Result<MutationResponse, ApiError> {
        self.record(Call::BulkDelete(kind, ids.to_vec()));
        self.next_mutation()
    }
}

#[derive(Default)]
struct RecordingTarget {
    rows: BTreeMap<ResourceKind, Vec<TableRow>>,
    pagination: BTreeMap<ResourceKind, Option<PaginationView>>,
    select_all: BTreeMap<ResourceKind, bool>,
    categories: Vec<String>,
    edit_form: Option<ResourceRecord>,
    confirmation: Option<PendingDeletion>,
    notifications: Vec<Notification>,
    render_calls: usize,
}

impl RecordingTarget {
    fn last_notification(&self) -> Option<(NotificationLevel, &str)> {
        self.notifications
            .last()
            .map(|n| (n.level, n.text.as_str()))
    }

    fn row_ids(&self, kind: ResourceKind) -> Vec<String> {
        self.rows
            .get(&kind)
            .map(|rows| rows.iter().map(|row| row.id.clone()).collect())
            .unwrap_or_default()
    }
}

impl RenderTarget for RecordingTarget {
    fn render_rows(&mut self, kind: ResourceKind, rows: &[TableRow]) -> Result<(), RenderError> {
        self.render_calls += 1;
        self.rows.insert(kind, rows.to_vec());
        Ok(())
    }

    fn render_pagination(
        &mut self,
        kind: ResourceKind,
        pagination: Option<&PaginationView>,
        _total: Option<u64>,
    ) -> Result<(), RenderError> {
        self.pagination.insert(kind, pagination.cloned());
        Ok(())
    }

    fn set_row_checked(
        &mut self,
        kind: ResourceKind,
        id: &str,
        checked: bool,
    ) -> Result<(), RenderError> {
        if let Some(row) = self
            .rows
            .get_mut(&kind)
            .and_then(|rows| rows.iter_mut().find(|row| row.id == id))
        {
            row.checked = checked;
        }
        Ok(())
    }

    fn set_select_all(&mut self, kind: ResourceKind, checked: bool) -> Result<(), RenderError> {
        self.select_all.insert(kind, checked);
        Ok(())
    }

    fn clear_search(&mut self, _kind: ResourceKind) -> Result<(), RenderError> {
        Ok(())
    }

    fn set_category_options(&mut self, names: &[String]) -> Result<(), RenderError> {
        self.categories = names.to_vec();
        Ok(())
    }

    fn show_edit_form(&mut self, record: &ResourceRecord) -> Result<(), RenderError> {
        self.edit_form = Some(record.clone());
        Ok(())
    }

    fn close_edit_form(&mut self, _kind: ResourceKind) -> Result<(), RenderError> {
        self.edit_form = None;
        Ok(())
    }

    fn show_delete_confirmation(&mut self, pending: &PendingDeletion) -> Result<(), RenderError> {
        self.confirmation = Some(pending.clone());
        Ok(())
    }

    fn close_delete_confirmation(&mut self) -> Result<(), RenderError> {
        self.confirmation = None;
        Ok(())
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), RenderError> {
        self.notifications.push(notification.clone());
        Ok(())
    }
}

fn post(id: i64) -> ResourceRecord {
    ResourceRecord::Post(PostRecord {
        id,
        title: format!("Post {id}"),
        content: "body".into(),
        username: "ada".into(),
        subdeaddit_name: "rust".into(),
        upvote_count: 0,
        comments_count: 0,
        post_type: "text".into(),
        created_at: Some("2024-03-05T10:11:12".into()),
    })
}

fn comment(id: i64) -> ResourceRecord {
    ResourceRecord::Comment(CommentRecord {
        id,
        content: format!("comment {id}"),
        username: "bob".into(),
        post_id: Some(1),
        post_title: "Post 1".into(),
        parent_id: None,
        upvote_count: 0,
        created_at: None,
    })
}

fn user(name: &str) -> ResourceRecord {
    ResourceRecord::User(UserRecord {
        username: name.into(),
        age: Some(30),
        gender: String::new(),
        occupation: String::new(),
        education: String::new(),
        bio: String::new(),
        interests: String::new(),
        personality_traits: String::new(),
        writing_style: String::new(),
        posts_count: 0,
        comments_count: 0,
    })
}

fn subdeaddit(name: &str) -> ResourceRecord {
    ResourceRecord::Subdeaddit(crate::domain::records::SubdeadditRecord {
        name: name.into(),
        description: String::new(),
        post_types: String::new(),
        posts_count: 0,
    })
}

fn controller(api: FakeApi) -> ResourceListController<FakeApi, RecordingTarget> {
    ResourceListController::new(api, RecordingTarget::default(), ControllerOptions::default())
}

fn list_calls(calls: &[Call]) -> Vec<&ListQuery> {
    calls
        .iter()
        .filter_map(|call| match call {
            Call::List(query) => Some(query),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn first_page_of_posts_links_forward_only() {
    let api = FakeApi::default().with(ResourceKind::Post, (1..=47).map(post).collect());
    let mut console = controller(api);

    let outcome = console
        .switch_kind(ResourceKind::Post)
        .await
        .expect("first page");

    let LoadOutcome::Rendered(result) = outcome else {
        panic!("expected rendered page");
    };
    assert_eq!(result.current_page, 1);
    assert_eq!(result.total_pages, 2);
    assert_eq!(console.target().row_ids(ResourceKind::Post).len(), 25);

    let pagination = console.target().pagination[&ResourceKind::Post]
        .clone()
        .expect("pagination shown");
    let numbers: Vec<_> = pagination
        .numbered()
        .map(|link| (link.page, link.active))
        .collect();
    assert_eq!(numbers, vec![(1, true), (2, false)]);
    assert!(pagination.previous().is_none());
    assert_eq!(pagination.next().map(|link| link.page), Some(2));
}

#[tokio::test]
async fn second_page_of_posts_renders_remaining_rows() {
    let api = FakeApi::default().with(ResourceKind::Post, (1..=47).map(post).collect());
    let mut console = controller(api);

    console
        .switch_kind(ResourceKind::Post)
        .await
        .expect("first page");
    let outcome = console.go_to_page(2).await.expect("second page");

    let LoadOutcome::Rendered(result) = outcome else {
        panic!("expected rendered page");
    };
    assert_eq!(result.current_page, 2);
    assert_eq!(result.total_pages, 2);
    assert_eq!(console.target().row_ids(ResourceKind::Post).len(), 22);

    let pagination = console.target().pagination[&ResourceKind::Post]
        .clone()
        .expect("pagination shown");
    let numbers: Vec<_> = pagination.numbered().map(|link| link.page).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!(pagination.previous().is_some());
    assert!(pagination.next().is_none());
}

#[tokio::test]
async fn single_page_hides_pagination() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada"), user("bob")]);
    let mut console = controller(api);

    console.reload().await.expect("load");

    assert_eq!(console.target().row_ids(ResourceKind::User), vec!["ada", "bob"]);
    assert_eq!(console.target().pagination[&ResourceKind::User], None);
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada")]);
    let mut console = controller(api);

    let stale = console.begin_load(console.state().current_query());
    let fresh = console.begin_load(console.state().current_query());

    let fresh_result = ListResult::new(ResourceKind::User, vec![user("ada")], 1, 1, Some(1));
    let outcome = console
        .complete_load(fresh, Ok(fresh_result))
        .expect("fresh load");
    assert!(matches!(outcome, LoadOutcome::Rendered(_)));

    let stale_result = ListResult::new(ResourceKind::User, vec![user("zed")], 1, 1, Some(1));
    let outcome = console
        .complete_load(stale, Ok(stale_result))
        .expect("stale load");
    assert_eq!(outcome, LoadOutcome::Discarded);
    assert_eq!(console.target().row_ids(ResourceKind::User), vec!["ada"]);
    assert_eq!(console.target().render_calls, 1);
}

#[tokio::test]
async fn failed_load_keeps_previous_rows() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada")]);
    let mut console = controller(api);
    console.reload().await.expect("initial load");

    console.api.fail_lists(true);
    let err = console.go_to_page(2).await.expect_err("load fails");

    assert!(matches!(err, ConsoleError::Api(ApiError::Status { status: 500, .. })));
    assert_eq!(console.target().row_ids(ResourceKind::User), vec!["ada"]);
    assert_eq!(
        console.target().last_notification(),
        Some((NotificationLevel::Error, "Error loading content"))
    );
    assert_eq!(
        console.state().tab(ResourceKind::User).phase,
        crate::application::state::LoadPhase::LoadError
    );
}

#[tokio::test]
async fn search_sends_term_and_resets_page() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada"), user("bob")]);
    let mut console = controller(api);
    console.go_to_page(3).await.expect("page 3");

    console
        .set_search(Some(" ad ".into()))
        .await
        .expect("search");

    let calls = console.api.calls();
    let last = list_calls(&calls).pop().cloned().expect("list call");
    assert_eq!(last.search.as_deref(), Some("ad"));
    assert_eq!(last.page.get(), 1);
    assert_eq!(console.target().row_ids(ResourceKind::User), vec!["ada"]);
}

#[tokio::test]
async fn category_filter_reloads_posts_from_first_page() {
    let api = FakeApi::default().with(ResourceKind::Post, vec![post(1)]);
    let mut console = controller(api);
    console.switch_kind(ResourceKind::Post).await.expect("posts");

    console
        .set_category_filter(Some("rust".into()))
        .await
        .expect("filter");

    let calls = console.api.calls();
    let last = list_calls(&calls).pop().cloned().expect("list call");
    assert_eq!(last.kind, ResourceKind::Post);
    assert_eq!(last.category.as_deref(), Some("rust"));
    assert_eq!(last.to_pairs().last(), Some(&("subdeaddit", "rust".to_string())));
}

#[tokio::test]
async fn category_options_come_from_subdeaddit_lookup() {
    let api = FakeApi::default().with(
        ResourceKind::Subdeaddit,
        vec![ResourceRecord::Subdeaddit(
            crate::domain::records::SubdeadditRecord {
                name: "rust".into(),
                description: String::new(),
                post_types: String::new(),
                posts_count: 0,
            },
        )],
    );
    let mut console = controller(api);

    let names = console.load_category_options().await.expect("options");

    assert_eq!(names, vec!["rust"]);
    assert_eq!(console.target().categories, vec!["rust"]);
    let calls = console.api.calls();
    assert_eq!(list_calls(&calls)[0].per_page.get(), 1000);
}

#[tokio::test]
async fn edit_post_opens_form_and_saves_patch() {
    let api = FakeApi::default().with(ResourceKind::Post, (1..=10).map(post).collect());
    let mut console = controller(api);
    console.switch_kind(ResourceKind::Post).await.expect("posts");

    let record = console
        .fetch_record_for_edit(ResourceKind::Post, "7")
        .await
        .expect("record");
    assert_eq!(record.id(), "7");
    assert_eq!(console.target().edit_form.as_ref().map(ResourceRecord::id), Some("7".into()));
    assert_eq!(console.editing(), Some((ResourceKind::Post, "7")));

    let patch = RecordPatch::Post(PostPatch {
        title: "Renamed".into(),
        content: "body".into(),
        upvote_count: 3,
        post_type: "text".into(),
    });
    console
        .save_record(ResourceKind::Post, "7", &patch)
        .await
        .expect("save");

    assert!(console.target().edit_form.is_none());
    assert_eq!(console.editing(), None);
    assert_eq!(
        console.target().last_notification(),
        Some((NotificationLevel::Success, "Post updated successfully"))
    );
    let calls = console.api.calls();
    assert!(calls.contains(&Call::Update(ResourceKind::Post, "7".into(), patch)));
    assert!(matches!(calls.last(), Some(Call::List(query)) if query.kind == ResourceKind::Post));
}

#[tokio::test]
async fn rejected_save_keeps_form_open() {
    let api = FakeApi::default()
        .with(ResourceKind::Comment, vec![comment(4)])
        .script(Ok(MutationResponse {
            success: false,
            error: Some("content too long".into()),
            deleted: None,
        }));
    let mut console = controller(api);
    console
        .fetch_record_for_edit(ResourceKind::Comment, "4")
        .await
        .expect("record");

    let patch = RecordPatch::Comment(CommentPatch {
        content: "x".repeat(10_000),
        upvote_count: 0,
    });
    let err = console
        .save_record(ResourceKind::Comment, "4", &patch)
        .await
        .expect_err("rejected");

    assert!(matches!(err, ConsoleError::Rejected { .. }));
    assert!(console.target().edit_form.is_some());
    assert_eq!(
        console.target().last_notification(),
        Some((
            NotificationLevel::Error,
            "Error updating comment: content too long"
        ))
    );
}

#[tokio::test]
async fn missing_record_reports_not_found() {
    let api = FakeApi::default().with(ResourceKind::Post, vec![post(1), post(2)]);
    let mut console = controller(api);

    let err = console
        .fetch_record_for_edit(ResourceKind::Post, "99")
        .await
        .expect_err("missing");

    assert!(err.is_not_found());
    assert!(console.target().edit_form.is_none());
    assert_eq!(
        console.target().last_notification().map(|(level, _)| level),
        Some(NotificationLevel::Error)
    );
}

#[tokio::test]
async fn non_numeric_post_id_is_rejected_before_any_request() {
    let mut console = controller(FakeApi::default());

    let err = console
        .fetch_record_for_edit(ResourceKind::Post, "abc")
        .await
        .expect_err("invalid id");

    assert!(matches!(err, ConsoleError::Domain(_)));
    assert!(console.api.calls().is_empty());
}

#[tokio::test]
async fn bulk_delete_sends_selected_comments() {
    let mut deleted = BTreeMap::new();
    deleted.insert("comments".to_string(), 3);
    let api = FakeApi::default()
        .with(ResourceKind::Comment, (1..=5).map(comment).collect())
        .script(Ok(MutationResponse {
            success: true,
            error: None,
            deleted: Some(deleted.clone()),
        }));
    let mut console = controller(api);
    console
        .switch_kind(ResourceKind::Comment)
        .await
        .expect("comments");

    for id in ["1", "2", "3"] {
        console
            .select(ResourceKind::Comment, id, true)
            .expect("select");
    }
    let pending = console
        .request_bulk_delete(ResourceKind::Comment)
        .expect("request")
        .expect("pending");
    assert_eq!(
        pending.confirm_message,
        "Are you sure you want to delete 3 comments?"
    );

    let outcome = console.confirm_delete().await.expect("delete");

    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            deleted: Some(deleted)
        }
    );
    assert!(console.api.calls().contains(&Call::BulkDelete(
        ResourceKind::Comment,
        vec!["1".into(), "2".into(), "3".into()]
    )));
    assert!(console.state().selection().is_empty());
    assert!(console.pending_deletion().is_none());
    assert!(console.target().confirmation.is_none());
    assert_eq!(
        console.target().last_notification(),
        Some((NotificationLevel::Success, "Deleted: 3 comments"))
    );
}

#[tokio::test]
async fn bulk_delete_with_empty_selection_only_warns() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada")]);
    let mut console = controller(api);
    console.reload().await.expect("load");
    let before = console.api.calls().len();

    let pending = console
        .request_bulk_delete(ResourceKind::User)
        .expect("request");

    assert!(pending.is_none());
    assert_eq!(console.api.calls().len(), before);
    assert_eq!(
        console.target().last_notification(),
        Some((NotificationLevel::Warning, "No items selected"))
    );
}

#[tokio::test]
async fn select_all_marks_every_visible_row() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada"), user("bob")]);
    let mut console = controller(api);
    console.reload().await.expect("load");

    console
        .select_all(ResourceKind::User, true)
        .expect("select all");

    assert_eq!(console.state().selection().ids(), vec!["ada", "bob"]);
    assert!(console.target().rows[&ResourceKind::User]
        .iter()
        .all(|row| row.checked));
    assert_eq!(console.target().select_all[&ResourceKind::User], true);

    console
        .select(ResourceKind::User, "bob", false)
        .expect("uncheck");
    assert_eq!(console.target().select_all[&ResourceKind::User], false);
    assert_eq!(console.state().selection().ids(), vec!["ada"]);
}

#[tokio::test]
async fn selecting_on_another_tab_is_refused() {
    let mut console = controller(FakeApi::default());

    let err = console
        .select(ResourceKind::Post, "1", true)
        .expect_err("mismatch");

    assert!(matches!(
        err,
        ConsoleError::KindMismatch {
            expected: ResourceKind::User,
            found: ResourceKind::Post
        }
    ));
}

#[tokio::test]
async fn single_delete_cancel_and_confirm() {
    let api = FakeApi::default().with(ResourceKind::User, vec![user("ada")]);
    let mut console = controller(api);

    let pending = console
        .request_delete(ResourceKind::User, "ada")
        .expect("request");
    assert_eq!(
        pending.confirm_message,
        "Are you sure you want to delete user \"ada\"?"
    );
    console.cancel_delete().expect("cancel");
    assert!(console.target().confirmation.is_none());
    assert_eq!(
        console.confirm_delete().await.expect("noop"),
        DeleteOutcome::NothingPending
    );
    assert!(console.api.calls().is_empty());

    console
        .request_delete(ResourceKind::User, "ada")
        .expect("request again");
    console.confirm_delete().await.expect("delete");
    assert_eq!(
        console.api.calls().first(),
        Some(&Call::Delete(ResourceKind::User, "ada".into()))
    );
    assert_eq!(
        console.target().last_notification(),
        Some((NotificationLevel::Success, "Deleted successfully"))
    );
}

#[tokio::test]
async fn failed_delete_stays_pending() {
    let api = FakeApi::default()
        .with(ResourceKind::User, vec![user("ada")])
        .script(Err(ApiError::transport("connection refused")));
    let mut console = controller(api);

    console
        .request_delete(ResourceKind::User, "ada")
        .expect("request");
    let err = console.confirm_delete().await.expect_err("fails");

    assert!(matches!(err, ConsoleError::Api(ApiError::Transport(_))));
    assert!(console.pending_deletion().is_some());
    assert_eq!(
        console.target().last_notification(),
        Some((NotificationLevel::Error, "Error deleting content"))
    );
}

#[tokio::test]
async fn notifications_use_configured_ttl() {
    let options = ControllerOptions {
        notification_ttl: Duration::from_secs(9),
        ..ControllerOptions::default()
    };
    let mut console =
        ResourceListController::new(FakeApi::default(), RecordingTarget::default(), options);

    console
        .request_bulk_delete(ResourceKind::User)
        .expect("request");

    assert_eq!(
        console.target().notifications[0].ttl,
        Duration::from_secs(9)
    );
}

#[tokio::test]
async fn open_applies_query_in_one_request() {
    let api = FakeApi::default().with(ResourceKind::Post, (1..=30).map(post).collect());
    let mut console = controller(api);

    let mut query = ListQuery::new(ResourceKind::Post, DEFAULT_PER_PAGE)
        .with_page(NonZeroU32::new(2).expect("non-zero"))
        .with_search(Some("1".into()));
    query.category = Some("rust".into());
    console.open(query).await.expect("open");

    let calls = console.api.calls();
    let lists = list_calls(&calls);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].kind, ResourceKind::Post);
    assert_eq!(lists[0].search.as_deref(), Some("1"));
    assert_eq!(lists[0].category.as_deref(), Some("rust"));
    assert_eq!(lists[0].page.get(), 2);
    assert_eq!(console.state().kind(), ResourceKind::Post);
}

#[tokio::test]
async fn focus_switches_kind_without_loading() {
    let mut console = controller(FakeApi::default());

    console.focus(ResourceKind::Comment).expect("focus");

    assert_eq!(console.state().kind(), ResourceKind::Comment);
    assert!(console.api.calls().is_empty());
    console
        .select(ResourceKind::Comment, "3", true)
        .expect("select after focus");
}

#[tokio::test]
async fn init_fills_category_filter_even_when_users_fail() {
    let api = FakeApi::default()
        .with(ResourceKind::Subdeaddit, vec![subdeaddit("rust"), subdeaddit("golang")])
        .fail_kind(ResourceKind::User);
    let mut console = controller(api);

    let err = console.init().await.expect_err("users load fails");

    assert!(matches!(err, ConsoleError::Api(ApiError::Status { status: 500, .. })));
    assert_eq!(console.target().categories, vec!["rust", "golang"]);
    let calls = console.api.calls();
    let kinds: Vec<_> = list_calls(&calls).iter().map(|query| query.kind).collect();
    assert_eq!(kinds, vec![ResourceKind::User, ResourceKind::Subdeaddit]);
}

#[tokio::test]
async fn init_loads_users_and_categories() {
    let api = FakeApi::default()
        .with(ResourceKind::User, vec![user("ada")])
        .with(ResourceKind::Subdeaddit, vec![subdeaddit("rust")]);
    let mut console = controller(api);

    console.init().await.expect("init");

    assert_eq!(console.target().row_ids(ResourceKind::User), vec!["ada"]);
    assert_eq!(console.target().categories, vec!["rust"]);
}

#[tokio::test]
async fn switching_tabs_drops_staged_bulk_delete() {
    let api = FakeApi::default()
        .with(ResourceKind::Comment, (1..=3).map(comment).collect())
        .with(ResourceKind::User, vec![user("ada")]);
    let mut console = controller(api);
    console
        .switch_kind(ResourceKind::Comment)
        .await
        .expect("comments");
    console
        .select(ResourceKind::Comment, "1", true)
        .expect("select");
    console
        .request_bulk_delete(ResourceKind::Comment)
        .expect("request")
        .expect("pending");

    console.switch_kind(ResourceKind::User).await.expect("users");
    assert!(console.pending_deletion().is_none());
    assert!(console.target().confirmation.is_none());

    console
        .select(ResourceKind::User, "ada", true)
        .expect("select user");
    assert_eq!(
        console.confirm_delete().await.expect("noop"),
        DeleteOutcome::NothingPending
    );

    assert!(
        !console
            .api
            .calls()
            .iter()
            .any(|call| matches!(call, Call::BulkDelete(..)))
    );
    assert_eq!(console.state().selection().ids(), vec!["ada"]);
}

#[tokio::test]
async fn focus_on_another_kind_drops_staged_delete() {
    let mut console = controller(FakeApi::default());
    console
        .request_delete(ResourceKind::User, "ada")
        .expect("request");

    console.focus(ResourceKind::User).expect("same kind");
    assert!(console.pending_deletion().is_some());

    console.focus(ResourceKind::Post).expect("focus");
    assert!(console.pending_deletion().is_none());
    assert!(console.target().confirmation.is_none());
}
