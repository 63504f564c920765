//! List Detail Component
//!
//! One list and its gifts. The cache is kept current for as long as the
//! component is mounted.

use gift_registry_lib::{DetailState, Gift, GiftList, ListId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{GiftCard, GiftDialog, GiftEditor, ReserveDialog};
use crate::context::use_app_context;
use crate::store::{store_open_detail, use_app_store, AppStateStoreFields};

#[component]
pub fn ListDetail(list_id: ListId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let already_open = store
        .detail()
        .read_untracked()
        .as_ref()
        .is_some_and(|detail| detail.list_id == list_id);
    if !already_open {
        store_open_detail(&store, list_id.clone());
    }
    let follow = commands::follow_list(ctx, store, list_id.clone());
    on_cleanup(move || follow.abort());

    let editor = RwSignal::new(None::<GiftEditor>);
    let reserving = RwSignal::new(None::<Gift>);
    let id = StoredValue::new(list_id.clone());

    let state = move || {
        store
            .detail()
            .read()
            .as_ref()
            .map(|detail| detail.state.clone())
            .unwrap_or_default()
    };

    view! {
        <section class="list-detail">
            <div class="detail-toolbar">
                <button class="back-btn" on:click=move |_| commands::close_list(ctx, store)>
                    "← Back to lists"
                </button>
                <button
                    class="share-btn"
                    on:click=move |_| spawn_local(commands::copy_share_link(ctx, id.get_value()))
                >
                    "Copy share link"
                </button>
            </div>
            {move || match state() {
                DetailState::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                DetailState::Missing => view! {
                    <p class="missing">"This list does not exist (it may have been deleted)."</p>
                }
                .into_any(),
                DetailState::Ready(list) => view! {
                    <GiftListView list=list editor=editor reserving=reserving />
                }
                .into_any(),
            }}
            <GiftDialog list_id=list_id.clone() editor=editor />
            <ReserveDialog list_id=list_id gift=reserving />
        </section>
    }
}

#[component]
fn GiftListView(
    list: GiftList,
    editor: RwSignal<Option<GiftEditor>>,
    reserving: RwSignal<Option<Gift>>,
) -> impl IntoView {
    let summary = format!(
        "{} gifts, {} reserved, {} purchased",
        list.gifts.len(),
        list.reserved_count(),
        list.purchased_count()
    );
    let title = format!("{}'s list", list.name);
    let list_id = list.id.clone();
    let on_edit = Callback::new(move |gift: Gift| editor.set(Some(GiftEditor::Edit(gift))));
    let on_reserve = Callback::new(move |gift: Gift| reserving.set(Some(gift)));
    let is_empty = list.gifts.is_empty();

    view! {
        <header class="detail-header">
            <h1>{title}</h1>
            <p class="detail-summary">{summary}</p>
            <button class="add-btn" on:click=move |_| editor.set(Some(GiftEditor::New))>
                "Add a gift"
            </button>
        </header>
        {is_empty.then(|| view! { <p class="empty">"No gifts yet."</p> })}
        <div class="gift-grid">
            {list
                .gifts
                .into_iter()
                .map(|gift| view! {
                    <GiftCard
                        list_id=list_id.clone()
                        gift=gift
                        on_edit=on_edit
                        on_reserve=on_reserve
                    />
                })
                .collect_view()}
        </div>
    }
}
