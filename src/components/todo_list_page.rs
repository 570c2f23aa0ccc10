//! Todo List Page
//!
//! Greeting, sort selector, add form, the list itself and the edit modal.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{EditTodoModal, NewTodoForm, TodoCard};
use crate::context::{use_app_context, AppContext};
use crate::error::AppResult;
use crate::models::{SortKey, TodoItem};
use crate::store::{
    store_set_adding, store_set_sort, store_set_todos, use_todo_store, TodoPageStateStoreFields,
    TodoStore,
};
use crate::todos::Committed;

/// Mirror a reload into the store, or show why it failed
pub fn finish_reload(ctx: AppContext, store: TodoStore, result: AppResult<Vec<TodoItem>>) {
    match result {
        Ok(todos) => store_set_todos(&store, todos),
        Err(e) => {
            store.loading().set(false);
            ctx.notify_error(&e);
        }
    }
}

/// Mirror the controller's working set after a mutation and report it.
/// Returns whether the server accepted the change, even if the reload after it failed.
pub fn finish_mutation<T>(
    ctx: AppContext,
    store: TodoStore,
    result: AppResult<Committed<T>>,
    success: Option<&str>,
) -> bool {
    match result {
        Ok(committed) => {
            store_set_todos(&store, ctx.services().todos.todos());
            match (&committed.reload_error, success) {
                (Some(e), _) => ctx.notify_stale_list(success, e),
                (None, Some(message)) => ctx.notify_success(message),
                (None, None) => {}
            }
            true
        }
        Err(e) => {
            ctx.notify_error(&e);
            false
        }
    }
}

/// How often the page checks whether the calendar day has changed
const DAY_CHECK_INTERVAL: Duration = Duration::from_secs(60);

#[component]
pub fn TodoListPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    // Load on mount
    Effect::new(move |_| {
        let user_id = ctx.session.get_untracked().user_id();
        let sort = store.sort_key().get_untracked();
        spawn_local(async move {
            let todos = ctx.services().todos;
            let result = match user_id {
                Some(id) => todos.list(id, sort).await,
                None => todos.refresh().await,
            };
            finish_reload(ctx, store, result);
        });
    });

    // Urgency depends on the date, so roll it over at midnight
    let (today, set_today) = signal(ctx.services().clock.today());
    spawn_local(async move {
        loop {
            gloo_timers::future::sleep(DAY_CHECK_INTERVAL).await;
            let Some(shown) = today.try_get_untracked() else {
                break;
            };
            let now = ctx.services().clock.today();
            if now != shown {
                let _ = set_today.try_set(now);
            }
        }
    });

    let on_sort = move |ev: leptos::ev::Event| {
        let sort = SortKey::from_query(&event_target_value(&ev));
        spawn_local(async move {
            let todos = ctx.services().todos;
            let result = todos.set_sort(sort).await;
            // On failure this puts the selector back on the key still in use
            store_set_sort(&store, todos.sort_key());
            finish_reload(ctx, store, result);
        });
    };

    let greeting = move || {
        let name = ctx
            .session
            .get()
            .user
            .map(|u| u.greeting_name().to_string())
            .unwrap_or_else(|| "user".to_string());
        format!("Hello, {}", name)
    };

    view! {
        <div class="todo-page">
            <div class="todo-header">
                <h1>{greeting}</h1>
                <select
                    class="sort-select"
                    prop:value=move || store.sort_key().get().as_query()
                    on:change=on_sort
                >
                    {SortKey::ALL.iter().map(|key| {
                        view! { <option value=key.as_query()>{key.label()}</option> }
                    }).collect_view()}
                </select>
                <button
                    class="btn btn-primary"
                    on:click=move |_| store_set_adding(&store, !store.adding().get_untracked())
                >
                    {move || if store.adding().get() { "Cancel" } else { "Add Todo" }}
                </button>
            </div>

            <Show when=move || store.adding().get()>
                <NewTodoForm />
            </Show>

            <Show
                when=move || !store.loading().get()
                fallback=|| view! { <div class="loading">"Loading your todos..."</div> }
            >
                <Show
                    when=move || !store.todos().get().is_empty()
                    fallback=|| view! {
                        <div class="empty-state">
                            <h3>"No todos yet!"</h3>
                            <p>"Click \"Add Todo\" to create your first task."</p>
                        </div>
                    }
                >
                    <div class="todo-list">
                        <For
                            each=move || store.todos().get()
                            key=|item| {
                                (item.id, item.is_completed, item.title.clone(), item.description.clone(), item.due_date)
                            }
                            children=move |item| view! { <TodoCard item=item today=today /> }
                        />
                    </div>
                </Show>
            </Show>

            <EditTodoModal />
        </div>
    }
}
