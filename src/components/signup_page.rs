//! Signup Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::SignupArgs;
use crate::auth::Route;
use crate::context::use_app_context;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_app_context();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (loading, set_loading) = signal(false);

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        ctx.clear_status();
        let args = SignupArgs {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            let result = ctx.services().auth.signup(&args).await;
            let _ = set_loading.try_set(false);
            match result {
                Ok(()) => {
                    ctx.notify_success("Account created successfully! Redirecting...");
                    gloo_timers::future::sleep(ctx.config().redirect_delay).await;
                    ctx.navigate(Route::Login);
                }
                Err(e) => ctx.notify_error(&e),
            }
        });
    };

    let text_field = move |id: &'static str,
                           label: &'static str,
                           input_type: &'static str,
                           value: ReadSignal<String>,
                           set_value: WriteSignal<String>| {
        view! {
            <div class="form-group">
                <label class="form-label" for=id>{label}</label>
                <input
                    type=input_type
                    id=id
                    class="form-input"
                    required
                    disabled=move || loading.get()
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="login-container">
            <div class="login-left">
                <div class="brand">
                    <img src="/todo_app_logo.png" alt="logo" class="app-logo" />
                    <h1 class="app-name">"ClearTick"</h1>
                </div>
            </div>

            <div class="login-right">
                <div class="form-container">
                    <h2 class="text-center mb-4">"Create Account"</h2>
                    <form on:submit=handle_submit>
                        {text_field("firstName", "First Name", "text", first_name, set_first_name)}
                        {text_field("lastName", "Last Name", "text", last_name, set_last_name)}
                        {text_field("email", "Email", "email", email, set_email)}
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
                        <button
                            type="submit"
                            class="btn btn-login mb-4 btn-fullwidth"
                            disabled=move || loading.get()
                        >
                            {move || if loading.get() { "Creating Account..." } else { "Create Account" }}
                        </button>
                    </form>
                    <p class="text-center">
                        "Already have an account? "
                        <a class="text-link" href="#" on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(Route::Login);
                        }>
                            "Sign in here"
                        </a>
                    </p>
                </div>
            </div>
        </div>
    }
}
