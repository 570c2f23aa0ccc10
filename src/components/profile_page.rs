//! Profile Page
//!
//! Profile view/edit form and the change-password form.

use chrono::{DateTime, Local, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::error::AppError;
use crate::models::{ProfileUpdate, UserSnapshot};
use crate::profile::PasswordChange;

fn local_date(at: Option<DateTime<Utc>>, missing: &'static str) -> String {
    at.map(|t| t.with_timezone(&Local).format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| missing.to_string())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app_context();

    // Last snapshot from the server; Cancel restores the form from it
    let profile = RwSignal::new(UserSnapshot::default());
    let form = RwSignal::new(ProfileUpdate::default());
    let passwords = RwSignal::new(PasswordChange::default());
    let (loading, set_loading) = signal(true);
    let (editing, set_editing) = signal(false);
    let (show_change_password, set_show_change_password) = signal(false);
    let (saving, set_saving) = signal(false);
    let (changing_password, set_changing_password) = signal(false);

    Effect::new(move |_| {
        let user_id = ctx.session.get_untracked().user_id();
        spawn_local(async move {
            let result = match user_id {
                Some(id) => ctx.services().profile.fetch(id).await,
                None => Err(AppError::Unauthenticated),
            };
            match result {
                Ok(user) => {
                    let _ = form.try_set(ProfileUpdate::from_user(&user));
                    let _ = profile.try_set(user);
                }
                Err(e) => ctx.notify_error(&e),
            }
            let _ = set_loading.try_set(false);
        });
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(user_id) = ctx.session.get_untracked().user_id() else {
            ctx.notify_error(&AppError::Unauthenticated);
            return;
        };
        let fields = form.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match ctx.services().profile.update(user_id, &fields).await {
                Ok(user) => {
                    let _ = form.try_set(ProfileUpdate::from_user(&user));
                    let _ = profile.try_set(user);
                    let _ = set_editing.try_set(false);
                    ctx.notify_success("Profile updated successfully!");
                }
                Err(e) => ctx.notify_error(&e),
            }
            let _ = set_saving.try_set(false);
        });
    };

    let cancel = move |_: web_sys::MouseEvent| {
        form.set(ProfileUpdate::from_user(&profile.get_untracked()));
        set_editing.set(false);
    };

    let change_password = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if changing_password.get_untracked() {
            return;
        }
        let email = ctx
            .session
            .get_untracked()
            .user
            .map(|u| u.email)
            .unwrap_or_default();
        let change = passwords.get_untracked();
        set_changing_password.set(true);
        spawn_local(async move {
            match ctx.services().profile.change_password(&email, &change).await {
                Ok(()) => {
                    let _ = passwords.try_set(PasswordChange::default());
                    let _ = set_show_change_password.try_set(false);
                    ctx.notify_success("Password updated successfully!");
                }
                Err(e) => ctx.notify_error(&e),
            }
            let _ = set_changing_password.try_set(false);
        });
    };

    let field = move |id: &'static str,
                      label: &'static str,
                      input_type: &'static str,
                      read: fn(&ProfileUpdate) -> String,
                      write: fn(&mut ProfileUpdate, String)| {
        view! {
            <div class="form-group">
                <label class="form-label" for=id>{label}</label>
                <input
                    type=input_type
                    id=id
                    class="form-input"
                    prop:value=move || form.with(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| write(f, value));
                    }
                />
            </div>
        }
    };

    let password_field = move |label: &'static str,
                               read: fn(&PasswordChange) -> String,
                               write: fn(&mut PasswordChange, String)| {
        view! {
            <div class="form-group">
                <label class="form-label">{label}</label>
                <input
                    type="password"
                    class="form-input"
                    required
                    prop:value=move || passwords.with(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        passwords.update(|p| write(p, value));
                    }
                />
            </div>
        }
    };

    let greeting = move || {
        let name = ctx
            .session
            .get()
            .user
            .map(|u| u.greeting_name().to_string())
            .unwrap_or_else(|| "user".to_string());
        format!("Hi, {}", name)
    };

    // Shown as typed, like the form it mirrors
    let preview = move || {
        let f = form.get();
        UserSnapshot {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            bio: Some(f.bio).filter(|b| !b.is_empty()),
            ..UserSnapshot::default()
        }
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <div class="loading">"Loading your profile..."</div> }
        >
            <div class="profile-header">
                <h1>{greeting}</h1>
                <Show when=move || !editing.get()>
                    <button class="btn btn-primary" on:click=move |_| set_editing.set(true)>
                        "Edit Profile"
                    </button>
                </Show>
            </div>

            <div class="profile-container">
                <div class="profile-card">
                    <div class="profile-avatar">
                        <div class="avatar-circle">{move || preview().initial().to_string()}</div>
                    </div>

                    <Show
                        when=move || editing.get()
                        fallback=move || view! {
                            <div class="profile-info">
                                <div class="info-section">
                                    <h2>{move || preview().display_name()}</h2>
                                    <p class="email">{move || form.with(|f| f.email.clone())}</p>
                                </div>
                                {move || preview().bio.map(|bio| view! {
                                    <div class="info-section">
                                        <h3>"Bio"</h3>
                                        <p class="bio">{bio}</p>
                                    </div>
                                })}
                                <div class="info-section">
                                    <h3>"Account Info"</h3>
                                    <div class="info-grid">
                                        <div>
                                            <strong>"Member Since: "</strong>
                                            <span>{move || local_date(profile.get().created_at, "Unknown")}</span>
                                        </div>
                                        <div>
                                            <strong>"Last Updated: "</strong>
                                            <span>{move || local_date(profile.get().modified_at, "Never")}</span>
                                        </div>
                                    </div>
                                </div>
                                <div class="change-password-section">
                                    <button
                                        class="btn btn-secondary"
                                        on:click=move |_| set_show_change_password.update(|s| *s = !*s)
                                    >
                                        {move || if show_change_password.get() { "Cancel" } else { "Change Password" }}
                                    </button>
                                    <Show when=move || show_change_password.get()>
                                        <form class="change-password-form" on:submit=change_password>
                                            {password_field("Current Password", |p| p.current_password.clone(), |p, v| p.current_password = v)}
                                            {password_field("New Password", |p| p.new_password.clone(), |p, v| p.new_password = v)}
                                            {password_field("Confirm New Password", |p| p.confirm_password.clone(), |p, v| p.confirm_password = v)}
                                            <div class="form-actions">
                                                <button type="submit" class="btn btn-success" disabled=move || changing_password.get()>
                                                    "Update Password"
                                                </button>
                                            </div>
                                        </form>
                                    </Show>
                                </div>
                            </div>
                        }
                    >
                        <form class="profile-form" on:submit=save>
                            {field("firstName", "First Name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                            {field("lastName", "Last Name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                            {field("email", "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                            <div class="form-group">
                                <label class="form-label" for="bio">"Bio"</label>
                                <textarea
                                    id="bio"
                                    class="form-input"
                                    rows="4"
                                    placeholder="Tell us about yourself..."
                                    prop:value=move || form.with(|f| f.bio.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.update(|f| f.bio = value);
                                    }
                                />
                            </div>
                            <div class="form-actions">
                                <button type="submit" class="btn btn-success" disabled=move || saving.get()>"Save"</button>
                                <button type="button" class="btn btn-secondary" on:click=cancel>"Cancel"</button>
                            </div>
                        </form>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
