//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{AuthState, Route};
use crate::components::ForgotPasswordModal;
use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (loading, set_loading) = signal(false);
    let (show_forgot, set_show_forgot) = signal(false);

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() || ctx.services().auth.state() == AuthState::Authenticating {
            return;
        }
        set_loading.set(true);
        ctx.clear_status();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match ctx.services().auth.login(&email, &password).await {
                Ok(_) => {
                    ctx.notify_success("Login successful! Redirecting...");
                    ctx.navigate(Route::Todos);
                }
                Err(e) => ctx.notify_error(&e),
            }
            let _ = set_loading.try_set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-left">
                <div class="brand">
                    <img src="/todo_app_logo.png" alt="logo" class="app-logo" />
                    <h1 class="app-name">"ClearTick"</h1>
                </div>
                <p class="slide-slogan">"Organize your day, the ClearTick way!"</p>
            </div>

            <div class="login-right">
                <div class="form-container">
                    <h2 class="text-center mb-4">"Welcome Back"</h2>
                    <form on:submit=handle_submit>
                        <div class="form-group">
                            <label class="form-label" for="email">"Email"</label>
                            <input
                                type="email"
                                id="email"
                                class="form-input"
                                required
                                disabled=move || loading.get()
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label" for="password">"Password"</label>
                            <input
                                type=move || if show_password.get() { "text" } else { "password" }
                                id="password"
                                class="form-input"
                                required
                                disabled=move || loading.get()
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                            <span
                                class="password-toggle-icon"
                                on:click=move |_| set_show_password.update(|s| *s = !*s)
                            >
                                {move || if show_password.get() { "Hide" } else { "Show" }}
                            </span>
                        </div>
                        <div class="forgot-password-link">
                            <button type="button" class="btn-link" on:click=move |_| set_show_forgot.set(true)>
                                "Forgot Password?"
                            </button>
                        </div>
                        <button
                            type="submit"
                            class="btn btn-login mb-4 btn-fullwidth"
                            disabled=move || loading.get()
                        >
                            {move || if loading.get() { "Signing In..." } else { "Sign In" }}
                        </button>
                    </form>
                    <p class="text-center">
                        "Don't have an account? "
                        <a class="text-link" href="#" on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(Route::Signup);
                        }>
                            "Sign up here"
                        </a>
                    </p>
                </div>
            </div>

            <Show when=move || show_forgot.get()>
                <ForgotPasswordModal on_close=move |_| set_show_forgot.set(false) />
            </Show>
        </div>
    }
}
