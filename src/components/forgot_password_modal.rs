//! Forgot Password Modal Component
//!
//! Email, then OTP, then new password. Each step shows its own input.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{PasswordResetFlow, PasswordResetSession, ResetStep};
use crate::context::use_app_context;

#[component]
pub fn ForgotPasswordModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (session, set_session) = signal(PasswordResetSession::default());
    let (input, set_input) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let reset = PasswordResetFlow::new(ctx.services().api);
    reset.on_change(move |snapshot| {
        let _ = set_session.try_set(snapshot.clone());
    });
    let flow = StoredValue::new_local(Rc::new(reset));

    let submit = move |_: web_sys::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        let Some(flow) = flow.try_get_value() else {
            return;
        };
        let value = input.get_untracked();
        set_busy.set(true);
        spawn_local(async move {
            let result = match flow.step() {
                ResetStep::AwaitingEmail => flow.request_otp(&value).await,
                ResetStep::AwaitingOtp => flow.verify_otp(&value).await,
                ResetStep::AwaitingNewPassword => flow.set_new_password(&value).await,
                ResetStep::Completed => Ok(()),
            };
            let _ = set_busy.try_set(false);
            if result.is_ok() {
                let _ = set_input.try_set(String::new());
            }
            if flow.step() == ResetStep::Completed {
                gloo_timers::future::sleep(ctx.config().reset_close_delay).await;
                let _ = on_close.try_run(());
            }
        });
    };

    let step = move || session.get().step;
    let placeholder = move || match step() {
        ResetStep::AwaitingEmail => "Enter your email",
        ResetStep::AwaitingOtp => "Enter OTP",
        _ => "Enter new password",
    };
    let input_type = move || match step() {
        ResetStep::AwaitingEmail => "email",
        ResetStep::AwaitingOtp => "text",
        _ => "password",
    };
    let action = move || match step() {
        ResetStep::AwaitingEmail => "Send OTP",
        ResetStep::AwaitingOtp => "Verify OTP",
        _ => "Update Password",
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-container" on:click=|ev| ev.stop_propagation()>
                <h3>"Forgot Password"</h3>
                {move || {
                    let status = session.get().status;
                    (!status.is_empty()).then(|| view! { <p class="status-text">{status}</p> })
                }}
                <Show when=move || step() != ResetStep::Completed>
                    <input
                        type=input_type
                        class="form-input"
                        placeholder=placeholder
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                    />
                </Show>
                <div class="modal-actions">
                    <Show when=move || step() != ResetStep::Completed>
                        <button class="btn btn-success" disabled=move || busy.get() on:click=submit>
                            {action}
                        </button>
                    </Show>
                    <button class="btn btn-secondary" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}
