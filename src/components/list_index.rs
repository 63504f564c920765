//! List Index Component
//!
//! Create, expand, open, share and delete lists. Only one list is expanded
//! at a time.

use gift_registry_lib::{DomainError, ListSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{ConfirmDelete, Deletion};
use crate::context::use_app_context;
use crate::store::{store_toggle_expanded, use_app_store, AppStateStoreFields};

#[component]
pub fn ListIndex() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());

    // Load lists on mount
    spawn_local(commands::load_index(ctx, store));

    let create_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() {
            ctx.report(&DomainError::InvalidInput("Give the list a name".to_string()));
            return;
        }
        spawn_local(async move {
            if commands::create_list(ctx, store, name).await {
                set_new_name.set(String::new());
            }
        });
    };

    let lists = move || store.index().read().lists.clone();
    let loaded = move || store.index().read().loaded;

    view! {
        <section class="list-index">
            <h1>"Gift Lists"</h1>

            <form class="new-list-form" on:submit=create_list>
                <input
                    type="text"
                    placeholder="Whose list is it?"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || new_name.get().trim().is_empty()>
                    "Create list"
                </button>
            </form>

            <Show
                when=move || loaded()
                fallback=|| view! { <p class="loading">"Loading lists..."</p> }
            >
                <Show
                    when=move || !lists().is_empty()
                    fallback=|| view! { <p class="empty">"No lists yet."</p> }
                >
                    <ul class="lists">
                        <For
                            each=lists
                            key=|summary| (summary.id.clone(), summary.name.clone())
                            children=move |summary| view! { <ListRow summary=summary /> }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}

#[component]
fn ListRow(summary: ListSummary) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = StoredValue::new(summary.id.clone());
    let is_expanded = move || id.with_value(|id| store.index().read().is_expanded(id));

    let delete = Callback::new(move |_: ()| {
        spawn_local(commands::delete_list(ctx, store, id.get_value()));
    });

    view! {
        <li class=move || if is_expanded() { "list-row expanded" } else { "list-row" }>
            <div
                class="list-row-header"
                on:click=move |_| id.with_value(|id| store_toggle_expanded(&store, id))
            >
                <span class="list-name">{format!("{}'s list", summary.name)}</span>
                <ConfirmDelete target=Deletion::List(summary.name.clone()) on_confirm=delete />
            </div>
            <Show when=is_expanded>
                <div class="list-row-actions">
                    <button on:click=move |_| commands::open_list(ctx, store, id.get_value())>
                        "Open"
                    </button>
                    <button on:click=move |_| spawn_local(commands::copy_share_link(ctx, id.get_value()))>
                        "Copy share link"
                    </button>
                </div>
            </Show>
        </li>
    }
}
