//! Alert Banner Component
//!
//! Single place where errors and notices reach the user.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn AlertBanner() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        {move || ctx.alert.get().map(|message| view! {
            <div class="alert-banner" role="alert">
                <span class="alert-text">{message}</span>
                <button class="alert-close" on:click=move |_| ctx.dismiss_alert()>"×"</button>
            </div>
        })}
    }
}
