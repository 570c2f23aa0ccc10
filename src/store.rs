//! Todo Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! view mirror of the controller's working set and is only written from
//! controller results.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{SortKey, TodoItem};
use crate::todos::EditDraft;

/// Todo page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoPageState {
    /// Working set as last loaded from the server
    pub todos: Vec<TodoItem>,
    /// Active server-side ordering
    pub sort_key: SortKey,
    /// First load still running
    pub loading: bool,
    /// Add form visible
    pub adding: bool,
    /// Open edit modal, if any
    pub editing: Option<EditDraft>,
}

impl TodoPageState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type TodoStore = Store<TodoPageState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the whole list with a fresh server snapshot
pub fn store_set_todos(store: &TodoStore, todos: Vec<TodoItem>) {
    store.todos().set(todos);
    store.loading().set(false);
}

/// Back to the first-load state, for the next user
pub fn store_reset(store: &TodoStore) {
    store.todos().set(Vec::new());
    store.loading().set(true);
    store.adding().set(false);
    store.editing().set(None);
}

pub fn store_set_sort(store: &TodoStore, sort_key: SortKey) {
    store.sort_key().set(sort_key);
}

pub fn store_set_adding(store: &TodoStore, adding: bool) {
    store.adding().set(adding);
}

pub fn store_open_editor(store: &TodoStore, item: &TodoItem) {
    store.editing().set(Some(EditDraft::from_item(item)));
}

/// Closing without saving leaves the list untouched
pub fn store_close_editor(store: &TodoStore) {
    store.editing().set(None);
}

pub fn store_update_draft(store: &TodoStore, edit: impl FnOnce(&mut EditDraft)) {
    store.editing().update(|draft| {
        if let Some(draft) = draft.as_mut() {
            edit(draft);
        }
    });
}
