//! Header Component
//!
//! Navigation bar, shown only while signed in.

use leptos::prelude::*;

use crate::auth::Route;
use crate::context::use_app_context;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();

    let nav_button = move |route: Route, label: &'static str| {
        view! {
            <button
                class=move || if ctx.route.get() == route { "nav-link active" } else { "nav-link" }
                on:click=move |_| ctx.navigate(route)
            >
                {label}
            </button>
        }
    };

    let logout = move |_: web_sys::MouseEvent| {
        ctx.services().auth.logout();
        ctx.clear_status();
        ctx.navigate(Route::Login);
    };

    view! {
        <Show when=move || ctx.session.get().is_authenticated()>
            <header class="header">
                <div class="header-content">
                    <div class="logo">
                        <img class="logo-img" src="/todo_app_logo.png" alt="ClearTick logo" />
                        <h2>"ClearTick"</h2>
                    </div>
                    <nav class="nav">
                        {nav_button(Route::Todos, "Todos")}
                        {nav_button(Route::Profile, "Profile")}
                        <button class="nav-link logout" on:click=logout>"Logout"</button>
                    </nav>
                </div>
            </header>
        </Show>
    }
}
