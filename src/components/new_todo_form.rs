//! New Todo Form Component
//!
//! Form for creating a todo with optional description and due date.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::todo_list_page::finish_mutation;
use crate::context::use_app_context;
use crate::error::AppError;
use crate::store::{store_set_adding, use_todo_store};
use crate::todos::{format_date_input, parse_date_input, NewTodo};

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let min_date = format_date_input(Some(ctx.services().clock.today()));

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let draft = NewTodo::new(
            &title.get_untracked(),
            &description.get_untracked(),
            parse_date_input(&due_date.get_untracked()),
        );
        let Some(user_id) = ctx.session.get_untracked().user_id() else {
            ctx.notify_error(&AppError::Unauthenticated);
            return;
        };

        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.services().todos.create(&draft, user_id).await;
            // Saved on the server: clear the form even if the reload failed
            if finish_mutation(ctx, store, result, Some("Todo added successfully!")) {
                let _ = set_title.try_set(String::new());
                let _ = set_description.try_set(String::new());
                let _ = set_due_date.try_set(String::new());
                store_set_adding(&store, false);
            }
            let _ = set_busy.try_set(false);
        });
    };

    view! {
        <div class="todo-form">
            <h3>"Add New Todo"</h3>
            <form on:submit=create_todo>
                <div class="form-group">
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Todo title"
                        required
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <textarea
                        class="form-input"
                        placeholder="Description (optional)"
                        rows="3"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <input
                        type="date"
                        class="form-input"
                        min=min_date
                        prop:value=move || due_date.get()
                        on:input=move |ev| set_due_date.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-actions">
                    <button type="submit" class="btn btn-success" disabled=move || busy.get()>
                        "Add Todo"
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        on:click=move |_| store_set_adding(&store, false)
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
