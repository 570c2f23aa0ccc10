//! Todo List Controller
//!
//! Owns the working set. Every successful mutation is followed by a full
//! reload, so the list on screen is always the server's list.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::{self, ApiClient, CreateTodoArgs};
use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::models::{SortKey, TodoId, TodoItem, TodoPatch, UserId};
use crate::session::SessionStore;
use crate::todos::draft::{NewTodo, TITLE_REQUIRED};

/// First half of a delete: nothing has been sent yet
#[derive(Debug, PartialEq, Eq)]
pub struct PendingDelete {
    id: TodoId,
}

impl PendingDelete {
    pub fn id(&self) -> TodoId {
        self.id
    }

    /// The user said yes
    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { id: self.id }
    }

    pub fn cancel(self) {
        log::debug!("Delete of todo {} cancelled", self.id);
    }
}

/// Only obtainable from `PendingDelete::confirm`
#[derive(Debug, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: TodoId,
}

#[derive(Clone)]
pub struct TodoListController {
    api: ApiClient,
    session: SessionStore,
    clock: Rc<dyn Clock>,
    todos: Rc<RefCell<Vec<TodoItem>>>,
    sort: Rc<Cell<SortKey>>,
    user_id: Rc<Cell<Option<UserId>>>,
}

impl TodoListController {
    pub fn new(api: ApiClient, session: SessionStore, clock: Rc<dyn Clock>) -> Self {
        Self {
            api,
            session,
            clock,
            todos: Rc::new(RefCell::new(Vec::new())),
            sort: Rc::new(Cell::new(SortKey::default())),
            user_id: Rc::new(Cell::new(None)),
        }
    }

    /// Current working set
    pub fn todos(&self) -> Vec<TodoItem> {
        self.todos.borrow().clone()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.get()
    }

    /// Forget the working set and its owner, e.g. after logout
    pub fn reset(&self) {
        self.todos.borrow_mut().clear();
        self.user_id.set(None);
    }

    /// Fetch the user's full list in server order and make it the working set
    pub async fn list(&self, user_id: UserId, sort: SortKey) -> AppResult<Vec<TodoItem>> {
        let mut todos = api::list_todos(&self.api, user_id, sort).await?;
        settle_ties(&mut todos, sort);
        log::debug!("Loaded {} todos sorted by {}", todos.len(), sort.as_query());

        self.user_id.set(Some(user_id));
        self.sort.set(sort);
        *self.todos.borrow_mut() = todos.clone();
        Ok(todos)
    }

    /// Reload for the last listed user, or the session's user
    pub async fn refresh(&self) -> AppResult<Vec<TodoItem>> {
        self.list(self.current_user()?, self.sort.get()).await
    }

    /// The key is only kept if the reload under it succeeds
    pub async fn set_sort(&self, sort: SortKey) -> AppResult<Vec<TodoItem>> {
        self.list(self.current_user()?, sort).await
    }

    /// Blank titles never reach the server; a missing due date means today
    pub async fn create(&self, new_todo: &NewTodo, user_id: UserId) -> AppResult<Committed<TodoItem>> {
        let title = new_todo.title.trim();
        if title.is_empty() {
            return Err(AppError::validation(TITLE_REQUIRED));
        }
        let args = CreateTodoArgs {
            title,
            description: &new_todo.description,
            user_id,
            due_date: new_todo.due_date.unwrap_or_else(|| self.clock.today()),
        };

        let created = api::create_todo(&self.api, &args).await?;
        log::info!("Created todo {}", created.id);
        let reload = self.list(user_id, self.sort.get()).await;
        Ok(Committed::new(created, reload))
    }

    pub async fn update(&self, id: TodoId, patch: &TodoPatch) -> AppResult<Committed<TodoItem>> {
        let updated = api::update_todo(&self.api, id, patch).await?;
        let reload = self.refresh().await;
        Ok(Committed::new(updated, reload))
    }

    pub async fn toggle_complete(&self, item: &TodoItem) -> AppResult<Committed<TodoItem>> {
        let patch = TodoPatch {
            is_completed: Some(!item.is_completed),
            ..Default::default()
        };
        self.update(item.id, &patch).await
    }

    /// Start a delete; nothing is sent until the returned value is confirmed
    pub fn request_delete(&self, id: TodoId) -> PendingDelete {
        PendingDelete { id }
    }

    pub async fn remove(&self, confirmed: ConfirmedDelete) -> AppResult<Committed<()>> {
        api::delete_todo(&self.api, confirmed.id).await?;
        log::info!("Deleted todo {}", confirmed.id);
        let reload = self.refresh().await;
        Ok(Committed::new((), reload))
    }

    fn current_user(&self) -> AppResult<UserId> {
        self.user_id
            .get()
            .or_else(|| self.session.user().map(|u| u.id))
            .ok_or(AppError::Unauthenticated)
    }
}

/// A mutation the server accepted. The follow-up reload may still have
/// failed, in which case the working set is the one from before.
#[derive(Debug, PartialEq)]
pub struct Committed<T> {
    pub value: T,
    pub reload_error: Option<AppError>,
}

impl<T> Committed<T> {
    fn new(value: T, reload: AppResult<Vec<TodoItem>>) -> Self {
        let reload_error = reload.err();
        if let Some(e) = &reload_error {
            log::warn!("Reload after mutation failed: {}", e);
        }
        Self { value, reload_error }
    }
}

/// Equal sort keys carry no server-defined order; order such runs by id
pub fn settle_ties(todos: &mut [TodoItem], sort: SortKey) {
    let same_key = |a: &TodoItem, b: &TodoItem| match sort {
        SortKey::CreationTime => a.created_at == b.created_at,
        SortKey::DueDate => a.due_date == b.due_date,
    };

    let mut start = 0;
    while start < todos.len() {
        let mut end = start + 1;
        while end < todos.len() && same_key(&todos[start], &todos[end]) {
            end += 1;
        }
        todos[start..end].sort_by_key(|t| t.id);
        start = end;
    }
}
