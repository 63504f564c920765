//! Gift Card Component
//!
//! One gift with its status and the actions that move it through
//! available / reserved / purchased.

use gift_registry_lib::{Gift, GiftStatus, ListId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{ConfirmDelete, Deletion};
use crate::context::use_app_context;
use crate::store::use_app_store;

fn format_price(price: f64) -> String {
    format!("{:.2} €", price)
}

#[component]
pub fn GiftCard(
    list_id: ListId,
    gift: Gift,
    #[prop(into)] on_edit: Callback<Gift>,
    #[prop(into)] on_reserve: Callback<Gift>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let status = gift.status();
    let list_id = StoredValue::new(list_id);
    let stored_gift = StoredValue::new(gift.clone());

    let toggle_purchased = move |_| {
        spawn_local(async move {
            commands::toggle_purchased(ctx, store, list_id.get_value(), stored_gift.get_value()).await;
        });
    };
    let cancel_reservation = move |_| {
        spawn_local(async move {
            commands::cancel_reservation(ctx, store, list_id.get_value(), stored_gift.get_value().id)
                .await;
        });
    };
    let delete = Callback::new(move |_: ()| {
        spawn_local(async move {
            commands::delete_gift(ctx, store, list_id.get_value(), stored_gift.get_value().id).await;
        });
    });

    let card_class = format!("gift-card {}", status.as_str());
    let title = gift.display_name().to_string();

    view! {
        <article class=card_class>
            {gift.image_url.clone().map(|src| view! {
                <img class="gift-image" src=src alt=title.clone() />
            })}
            <div class="gift-body">
                <h3 class="gift-name">{gift.name.clone().unwrap_or_else(|| title.clone())}</h3>
                {gift.price.map(|price| view! { <p class="gift-price">{format_price(price)}</p> })}
                {gift.url.clone().map(|href| view! {
                    <a class="gift-link" href=href target="_blank" rel="noopener">"View product"</a>
                })}
                <p class="gift-status">
                    {match (status, gift.reserved_by.clone()) {
                        (GiftStatus::Purchased, Some(by)) => format!("Purchased by {}", by),
                        (GiftStatus::Purchased, None) => "Purchased".to_string(),
                        (_, Some(by)) => format!("Reserved by {}", by),
                        (_, None) => "Available".to_string(),
                    }}
                </p>
            </div>
            <div class="gift-actions">
                <Show when=move || status == GiftStatus::Available>
                    <button on:click=move |_| on_reserve.run(stored_gift.get_value())>"Reserve"</button>
                </Show>
                <Show when=move || status == GiftStatus::Reserved>
                    <button on:click=cancel_reservation>"Cancel reservation"</button>
                </Show>
                <button on:click=toggle_purchased>
                    {if status == GiftStatus::Purchased { "Not purchased" } else { "Mark purchased" }}
                </button>
                <button on:click=move |_| on_edit.run(stored_gift.get_value())>"Edit"</button>
                <ConfirmDelete target=Deletion::Gift(title.clone()) on_confirm=delete />
            </div>
        </article>
    }
}
