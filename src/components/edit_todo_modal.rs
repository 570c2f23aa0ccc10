//! Edit Todo Modal Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::todo_list_page::finish_mutation;
use crate::context::use_app_context;
use crate::store::{
    store_close_editor, store_update_draft, use_todo_store, TodoPageStateStoreFields,
};
use crate::todos::{format_date_input, parse_date_input};

/// Modal over the list while `editing` holds a draft.
/// Closing it (Cancel or overlay click) discards the draft.
#[component]
pub fn EditTodoModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let draft_field = move |read: fn(&crate::todos::EditDraft) -> String| {
        move || store.editing().get().map(|d| read(&d)).unwrap_or_default()
    };

    let (busy, set_busy) = signal(false);

    let save = move |_: web_sys::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        let Some(draft) = store.editing().get_untracked() else {
            return;
        };
        let id = draft.id;
        let patch = match draft.into_patch() {
            Ok(patch) => patch,
            Err(e) => {
                ctx.notify_error(&e);
                return;
            }
        };
        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.services().todos.update(id, &patch).await;
            if finish_mutation(ctx, store, result, Some("Todo updated successfully!")) {
                store_close_editor(&store);
            }
            let _ = set_busy.try_set(false);
        });
    };

    let min_date = format_date_input(Some(ctx.services().clock.today()));

    view! {
        <Show when=move || store.editing().get().is_some()>
            <div class="edit-modal-overlay" on:click=move |_| store_close_editor(&store)>
                <div class="edit-modal" on:click=|ev| ev.stop_propagation()>
                    <h3>"Edit Todo"</h3>
                    <input
                        type="text"
                        class="form-input"
                        prop:value=draft_field(|d| d.title.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            store_update_draft(&store, |d| d.title = value);
                        }
                    />
                    <textarea
                        class="form-input"
                        rows="3"
                        prop:value=draft_field(|d| d.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            store_update_draft(&store, |d| d.description = value);
                        }
                    />
                    <input
                        type="date"
                        class="form-input"
                        min=min_date.clone()
                        prop:value=draft_field(|d| format_date_input(d.due_date))
                        on:input=move |ev| {
                            let value = parse_date_input(&event_target_value(&ev));
                            store_update_draft(&store, |d| d.due_date = value);
                        }
                    />
                    <div class="form-actions">
                        <button class="btn btn-success" disabled=move || busy.get() on:click=save>
                            "Update"
                        </button>
                        <button class="btn btn-secondary" on:click=move |_| store_close_editor(&store)>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
