//! Reserve Dialog Component
//!
//! Asks who is reserving. Nothing is written until a name is given; closing
//! the dialog abandons the reservation.

use gift_registry_lib::{Gift, ListId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::store::use_app_store;

#[component]
pub fn ReserveDialog(list_id: ListId, gift: RwSignal<Option<Gift>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let list_id = StoredValue::new(list_id);
    let (reserver, set_reserver) = signal(String::new());

    let close = move || {
        gift.set(None);
        set_reserver.set(String::new());
    };

    let reserve = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = reserver.get_untracked();
        let Some(target) = gift.get_untracked() else {
            return;
        };
        if name.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            if commands::reserve_gift(ctx, store, list_id.get_value(), target.id, name).await {
                close();
            }
        });
    };

    let gift_name = move || {
        gift.with(|g| g.as_ref().map(|g| g.display_name().to_string()))
            .unwrap_or_default()
    };

    view! {
        <Show when=move || gift.with(Option::is_some)>
            <div class="dialog-backdrop" on:click=move |_| close()>
                <form
                    class="dialog"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=reserve
                >
                    <h2>"Reserve " {gift_name}</h2>
                    <label class="dialog-field">
                        <span>"Your name"</span>
                        <input
                            type="text"
                            autofocus=true
                            prop:value=move || reserver.get()
                            on:input=move |ev| set_reserver.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="dialog-actions">
                        <button type="button" on:click=move |_| close()>"Cancel"</button>
                        <button type="submit" disabled=move || reserver.get().trim().is_empty()>
                            "Reserve"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
