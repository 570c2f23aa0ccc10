//! Todo Card Component
//!
//! One todo in the list, coloured by urgency.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::todo_list_page::finish_mutation;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::TodoItem;
use crate::store::{store_open_editor, use_todo_store};
use crate::todos::{classify, PendingDelete};

/// A single todo row
#[component]
pub fn TodoCard(item: TodoItem, #[prop(into)] today: Signal<NaiveDate>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    // One request at a time per card
    let (busy, set_busy) = signal(false);
    // Set by the first delete click, consumed by Yes or No
    let pending = StoredValue::new(None::<PendingDelete>);

    let id = item.id;
    let (due_date, is_completed) = (item.due_date, item.is_completed);
    let urgency = move || classify(due_date, is_completed, today.get());
    let title = item.title.clone();
    let description = item.description.clone().filter(|d| !d.trim().is_empty());
    let due_label = due_date.map(|d| format!("Due: {}", d.format("%b %-d, %Y")));
    let toggle_label = if is_completed { "Undo" } else { "Complete" };
    let card_class = move || {
        format!(
            "todo-card {}{}",
            urgency().css_class(),
            if is_completed { " completed" } else { "" }
        )
    };

    let toggle_item = item.clone();
    let on_toggle = move |_: web_sys::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        let item = toggle_item.clone();
        spawn_local(async move {
            let result = ctx.services().todos.toggle_complete(&item).await;
            finish_mutation(ctx, store, result, None);
            let _ = set_busy.try_set(false);
        });
    };

    let edit_item = item.clone();
    let on_edit = move |_: web_sys::MouseEvent| store_open_editor(&store, &edit_item);

    let on_request_delete = move |_: ()| {
        pending.set_value(Some(ctx.services().todos.request_delete(id)));
    };

    let on_cancel_delete = move |_: ()| {
        if let Some(request) = pending.try_update_value(Option::take).flatten() {
            request.cancel();
        }
    };

    let on_confirm_delete = move |_: ()| {
        if busy.get_untracked() {
            return;
        }
        let Some(request) = pending.try_update_value(Option::take).flatten() else {
            return;
        };
        set_busy.set(true);
        let confirmed = request.confirm();
        spawn_local(async move {
            let result = ctx.services().todos.remove(confirmed).await;
            finish_mutation(ctx, store, result, Some("Todo deleted successfully!"));
            let _ = set_busy.try_set(false);
        });
    };

    view! {
        <div class=card_class style=move || format!("border-left-color: {};", urgency().color())>
            <div class="todo-content">
                <h3 class="todo-title">{title}</h3>
                {description.map(|d| view! { <p class="todo-description">{d}</p> })}
                {due_label.map(|label| view! {
                    <p class="todo-due" style=move || format!("color: {};", urgency().color())>{label}</p>
                })}
            </div>

            <div class="todo-actions">
                <button class="btn btn-small" disabled=move || busy.get() on:click=on_toggle>
                    {toggle_label}
                </button>
                <button class="btn btn-small" on:click=on_edit>"Edit"</button>
                <DeleteConfirmButton
                    button_class="btn btn-small btn-danger"
                    on_request=on_request_delete
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                    disabled=busy
                />
            </div>
        </div>
    }
}
