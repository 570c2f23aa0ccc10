//! ClearTick App
//!
//! Builds the services, provides context and switches pages on the guarded route.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::auth::Route;
use crate::components::{Header, LoginPage, ProfilePage, SignupPage, StatusBanner, TodoListPage};
use crate::config::AppConfig;
use crate::context::{AppContext, Services};
use crate::store::{store_reset, TodoPageState, TodoStore};

#[component]
pub fn App() -> impl IntoView {
    let services = Services::browser(AppConfig::from_build_env());
    log::info!("API base URL: {}", services.config.api_base_url);

    let ctx = AppContext::new(services);
    provide_context(ctx);

    let store: TodoStore = Store::new(TodoPageState::new());
    provide_context(store);

    // Signing out drops the previous user's list
    Effect::new(move |_| {
        if !ctx.session.get().is_authenticated() {
            ctx.services().todos.reset();
            store_reset(&store);
        }
    });

    Effect::new(move |_| {
        let title = format!("{} | ClearTick", ctx.route.get().title());
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&title);
        }
    });

    view! {
        <div class="page-container">
            <Header />
            <main class="main-content">
                <div class="container">
                    <StatusBanner />
                    {move || match ctx.route.get() {
                        Route::Login => view! { <LoginPage /> }.into_any(),
                        Route::Signup => view! { <SignupPage /> }.into_any(),
                        Route::Todos => view! { <TodoListPage /> }.into_any(),
                        Route::Profile => view! { <ProfilePage /> }.into_any(),
                    }}
                </div>
            </main>
        </div>
    }
}
