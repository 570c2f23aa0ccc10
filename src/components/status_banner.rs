//! Status Banner Component
//!
//! Shows the current success/error message until it expires.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::status::visible;

#[component]
pub fn StatusBanner() -> impl IntoView {
    let ctx = use_app_context();
    // Bumped when the current message should have expired
    let (tick, set_tick) = signal(0u32);

    Effect::new(move |_| {
        let Some(message) = ctx.status.get() else {
            return;
        };
        let wait = message.remaining(ctx.now());
        spawn_local(async move {
            gloo_timers::future::sleep(wait).await;
            let _ = set_tick.try_update(|t| *t = t.wrapping_add(1));
        });
    });

    view! {
        {move || {
            tick.track();
            let status = ctx.status.get();
            visible(status.as_ref(), ctx.now()).map(|message| {
                view! { <div class=message.css_class()>{message.text.clone()}</div> }
            })
        }}
    }
}
