//! Gift Registry Frontend App
//!
//! Picks the screen from the page URL and switches between the list index
//! and a list's detail.

use gift_registry_lib::{DomainResult, RegistryConfig, Screen};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AlertBanner, ListDetail, ListIndex};
use crate::context::AppContext;
use crate::store::{store_open_detail, AppState};

#[component]
pub fn App(config: DomainResult<RegistryConfig>) -> impl IntoView {
    let href = window().location().href().unwrap_or_default();
    let ctx = config.and_then(|config| {
        let screen = Screen::from_url(&href, &config.share_param);
        AppContext::new(config, screen)
    });
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("cannot start: {}", e);
            return view! {
                <main class="app-layout">
                    <p class="config-error">{format!("The gift store is not configured: {}", e)}</p>
                </main>
            }
            .into_any();
        }
    };

    let store = Store::new(AppState::default());
    // A deep link goes straight to the list; the index is never fetched.
    if let Screen::Detail(id) = ctx.screen.get_untracked() {
        store_open_detail(&store, id);
    }
    provide_context(ctx);
    provide_context(store);

    view! {
        <main class="app-layout">
            <AlertBanner />
            {move || match ctx.screen.get() {
                Screen::Index => view! { <ListIndex /> }.into_any(),
                Screen::Detail(id) => view! { <ListDetail list_id=id /> }.into_any(),
            }}
        </main>
    }
    .into_any()
}
