//! The to-do list view state and the operations that reconcile it with the store.
//!
//! The view lock is never held across a store round trip, so the `loading`
//! and `adding` flags are visible to renders happening while a call is in
//! flight. Failures never escape: they are logged and turned into a pending
//! [`Alert`] that the next render shows once.

use tokio::sync::RwLock;

use crate::error::Operation;
use crate::models::{Title, Todo};
use crate::service::TodoService;

pub const DELETE_PROMPT: &str = "정말 삭제하시겠습니까?";

/// A failed operation waiting to be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub operation: Operation,
}
impl Alert {
    pub fn message(&self) -> &'static str {
        self.operation.alert_message()
    }
}

/// Asks the user whether to go ahead with a destructive action.
pub trait Confirm {
    fn confirm(self, prompt: &str) -> bool;
}
impl Confirm for bool {
    fn confirm(self, _prompt: &str) -> bool {
        self
    }
}
impl<F: FnOnce(&str) -> bool> Confirm for F {
    fn confirm(self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub todos: Vec<Todo>,
    pub input: String,
    pub loading: bool,
    pub adding: bool,
    pub alert: Option<Alert>,
    pub(crate) load_started: bool,
}
impl ViewState {
    fn mounted() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    fn fail(&mut self, operation: Operation, err: &anyhow::Error) {
        tracing::error!(%operation, error = ?err, "todo operation failed");
        self.alert = Some(Alert { operation });
    }
}

#[derive(Debug)]
pub struct TodoList {
    service: TodoService,
    view: RwLock<ViewState>,
}
impl TodoList {
    pub fn new(service: TodoService) -> Self {
        Self {
            service,
            view: RwLock::new(ViewState::mounted()),
        }
    }

    /// Starts a fresh view; the next [`TodoList::load`] fetches again.
    pub async fn mount(&self) {
        *self.view.write().await = ViewState::mounted();
    }

    /// Initial fetch. Runs once per mount; later calls leave the view alone.
    pub async fn load(&self) {
        {
            let mut view = self.view.write().await;
            if view.load_started {
                return;
            }
            view.load_started = true;
            view.loading = true;
        }

        let result = self.service.fetch_todos().await;

        let mut view = self.view.write().await;
        match result {
            Ok(todos) => view.todos = todos,
            Err(err) => view.fail(Operation::Fetch, &err),
        }
        view.loading = false;
    }

    /// Creates a todo from the submitted input, then re-reads the whole list.
    ///
    /// Blank input is ignored without a round trip. The input is cleared only
    /// once the create call has gone through.
    pub async fn add(&self, input: &str) {
        let title = {
            let mut view = self.view.write().await;
            view.input = input.to_string();
            let Some(title) = Title::parse(input) else {
                return;
            };
            view.adding = true;
            title
        };

        let result = self.create_then_fetch(&title).await;

        let mut view = self.view.write().await;
        match result {
            Ok(todos) => view.todos = todos,
            Err(err) => view.fail(Operation::Add, &err),
        }
        view.adding = false;
    }

    async fn create_then_fetch(&self, title: &Title) -> anyhow::Result<Vec<Todo>> {
        self.service.add_todo(title).await?;
        self.view.write().await.input.clear();
        self.service.fetch_todos().await
    }

    /// Sets `completed` in the store, then patches the matching row.
    pub async fn toggle(&self, id: &str, completed: bool) {
        let result = self.service.toggle_todo(id, completed).await;

        let mut view = self.view.write().await;
        match result {
            Ok(()) => {
                if let Some(todo) = view.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.completed = completed;
                }
            }
            Err(err) => view.fail(Operation::Update, &err),
        }
    }

    /// Deletes a todo after confirmation, then drops its row.
    pub async fn delete(&self, id: &str, confirmation: impl Confirm) {
        if !confirmation.confirm(DELETE_PROMPT) {
            return;
        }

        let result = self.service.delete_todo(id).await;

        let mut view = self.view.write().await;
        match result {
            Ok(()) => view.todos.retain(|todo| todo.id != id),
            Err(err) => view.fail(Operation::Delete, &err),
        }
    }

    /// Snapshot for rendering. Takes the pending alert so it is shown once.
    pub async fn present(&self) -> ViewState {
        let mut view = self.view.write().await;
        let snapshot = view.clone();
        view.alert = None;
        snapshot
    }

    pub fn service(&self) -> &TodoService {
        &self.service
    }

    pub async fn snapshot(&self) -> ViewState {
        self.view.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{now_millis, TodoDocument};
    use crate::repository::MemoryTodoRepository;

    fn todo_list() -> (Arc<MemoryTodoRepository>, TodoList) {
        let repo = Arc::new(MemoryTodoRepository::new());
        let list = TodoList::new(TodoService::new(repo.clone()));
        (repo, list)
    }

    fn document(title: &str, created_at: i64) -> TodoDocument {
        TodoDocument {
            title: title.to_string(),
            completed: false,
            created_at,
        }
    }

    fn titles(view: &ViewState) -> Vec<&str> {
        view.todos.iter().map(|todo| todo.title.as_str()).collect()
    }

    #[tokio::test]
    async fn starts_loading() {
        let (_repo, list) = todo_list();
        let view = list.snapshot().await;
        assert!(view.loading);
        assert!(view.todos.is_empty());
    }

    #[tokio::test]
    async fn load_renders_newest_first() {
        let (repo, list) = todo_list();
        repo.seed(document("A", 1)).await;
        repo.seed(document("B", 2)).await;
        list.load().await;
        let view = list.snapshot().await;
        assert!(!view.loading);
        assert_eq!(titles(&view), ["B", "A"]);
        assert_eq!(view.alert, None);
    }

    #[tokio::test]
    async fn load_of_empty_collection_ends_empty() {
        let (_repo, list) = todo_list();
        list.load().await;
        let view = list.snapshot().await;
        assert!(!view.loading);
        assert!(view.todos.is_empty());
    }

    #[tokio::test]
    async fn failed_load_alerts_and_stops_loading() {
        let (repo, list) = todo_list();
        repo.fail(Operation::Fetch).await;
        list.load().await;
        let view = list.snapshot().await;
        assert!(!view.loading);
        assert!(view.todos.is_empty());
        assert_eq!(view.alert, Some(Alert { operation: Operation::Fetch }));
    }

    #[tokio::test]
    async fn load_runs_once_per_mount() {
        let (repo, list) = todo_list();
        list.load().await;
        list.load().await;
        assert_eq!(repo.calls().await, 1);

        list.mount().await;
        assert!(list.snapshot().await.loading);
        list.load().await;
        assert_eq!(repo.calls().await, 2);
    }

    #[tokio::test]
    async fn add_creates_one_record_and_refetches() {
        let (repo, list) = todo_list();
        list.load().await;
        let before = now_millis();
        list.add("  buy milk  ").await;

        assert_eq!(repo.len().await, 1);
        let view = list.snapshot().await;
        assert_eq!(titles(&view), ["buy milk"]);
        let todo = &view.todos[0];
        assert!(!todo.completed);
        assert!(todo.created_at >= before);
        assert!(view.input.is_empty());
        assert!(!view.adding);
        assert_eq!(view.alert, None);
    }

    #[tokio::test]
    async fn blank_add_makes_no_calls() {
        let (repo, list) = todo_list();
        repo.seed(document("A", 1)).await;
        list.load().await;
        let calls = repo.calls().await;
        let before = list.snapshot().await.todos;

        for input in ["", " ", "\t \n"] {
            list.add(input).await;
        }

        assert_eq!(repo.calls().await, calls);
        let view = list.snapshot().await;
        assert_eq!(view.todos, before);
        assert!(!view.adding);
        assert_eq!(view.alert, None);
    }

    #[tokio::test]
    async fn failed_create_alerts_and_keeps_input() {
        let (repo, list) = todo_list();
        list.load().await;
        repo.fail(Operation::Add).await;
        list.add("A").await;
        let view = list.snapshot().await;
        assert_eq!(view.alert, Some(Alert { operation: Operation::Add }));
        assert_eq!(view.input, "A");
        assert!(view.todos.is_empty());
        assert!(!view.adding);
    }

    #[tokio::test]
    async fn failed_refetch_after_add_reports_add() {
        let (repo, list) = todo_list();
        list.load().await;
        repo.fail(Operation::Fetch).await;
        list.add("A").await;
        let view = list.snapshot().await;
        assert_eq!(view.alert, Some(Alert { operation: Operation::Add }));
        assert!(view.input.is_empty());
        assert!(view.todos.is_empty());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn toggle_patches_only_completed() {
        let (repo, list) = todo_list();
        let id = repo.seed(document("A", 1)).await;
        list.load().await;
        let before = list.snapshot().await.todos[0].clone();

        list.toggle(&id, true).await;

        let after = list.snapshot().await.todos[0].clone();
        assert!(after.completed);
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.created_at, before.created_at);
        assert!(repo.document(&id).await.unwrap().completed);

        list.toggle(&id, false).await;
        assert!(!list.snapshot().await.todos[0].completed);
        assert!(!repo.document(&id).await.unwrap().completed);
    }

    #[tokio::test]
    async fn failed_toggle_leaves_state_alone() {
        let (repo, list) = todo_list();
        let id = repo.seed(document("A", 1)).await;
        list.load().await;
        repo.fail(Operation::Update).await;
        list.toggle(&id, true).await;
        let view = list.snapshot().await;
        assert!(!view.todos[0].completed);
        assert_eq!(view.alert, Some(Alert { operation: Operation::Update }));
    }

    #[tokio::test]
    async fn confirmed_delete_removes_exactly_one() {
        let (repo, list) = todo_list();
        let a = repo.seed(document("A", 1)).await;
        repo.seed(document("B", 2)).await;
        list.load().await;

        list.delete(&a, true).await;

        assert!(repo.document(&a).await.is_none());
        assert_eq!(repo.len().await, 1);
        assert_eq!(titles(&list.snapshot().await), ["B"]);
    }

    #[tokio::test]
    async fn declined_delete_is_a_no_op() {
        let (repo, list) = todo_list();
        let a = repo.seed(document("A", 1)).await;
        list.load().await;
        let calls = repo.calls().await;

        let mut asked = None;
        list.delete(&a, |prompt: &str| {
            asked = Some(prompt.to_string());
            false
        })
        .await;

        assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
        assert_eq!(repo.calls().await, calls);
        assert_eq!(repo.len().await, 1);
        assert_eq!(titles(&list.snapshot().await), ["A"]);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let (repo, list) = todo_list();
        let a = repo.seed(document("A", 1)).await;
        list.load().await;
        repo.fail(Operation::Delete).await;
        list.delete(&a, true).await;
        let view = list.snapshot().await;
        assert_eq!(titles(&view), ["A"]);
        assert_eq!(view.alert, Some(Alert { operation: Operation::Delete }));
    }

    #[tokio::test]
    async fn present_shows_an_alert_once() {
        let (repo, list) = todo_list();
        repo.fail(Operation::Fetch).await;
        list.load().await;
        assert!(list.present().await.alert.is_some());
        assert!(list.present().await.alert.is_none());
    }
}
