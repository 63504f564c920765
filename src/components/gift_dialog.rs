//! Gift Dialog Component
//!
//! Modal form for adding a gift or editing one. At least one of name, URL
//! or image URL must be filled before anything is sent.

use gift_registry_lib::{DomainError, Gift, GiftDraft, ListId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::store::use_app_store;

/// What the dialog is doing
#[derive(Clone, Debug, PartialEq)]
pub enum GiftEditor {
    New,
    Edit(Gift),
}

/// Text fields of the form, as typed
#[derive(Clone, Debug, Default, PartialEq)]
struct GiftForm {
    name: String,
    price: String,
    url: String,
    image_url: String,
}

impl GiftForm {
    fn from_gift(gift: &Gift) -> Self {
        let draft = GiftDraft::from_gift(gift);
        Self {
            name: draft.name.unwrap_or_default(),
            price: draft.price.map(|p| p.to_string()).unwrap_or_default(),
            url: draft.url.unwrap_or_default(),
            image_url: draft.image_url.unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> Result<GiftDraft, DomainError> {
        let draft = GiftDraft {
            name: Some(self.name.clone()),
            price: GiftDraft::parse_price(&self.price)?,
            url: Some(self.url.clone()),
            image_url: Some(self.image_url.clone()),
        }
        .normalized();
        draft.validate()?;
        Ok(draft)
    }
}

#[component]
pub fn GiftDialog(list_id: ListId, editor: RwSignal<Option<GiftEditor>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let list_id = StoredValue::new(list_id);
    let form = RwSignal::new(GiftForm::default());

    // Prefill whenever the dialog opens
    Effect::new(move |_| {
        let prefilled = match editor.get() {
            Some(GiftEditor::Edit(gift)) => GiftForm::from_gift(&gift),
            _ => GiftForm::default(),
        };
        form.set(prefilled);
    });

    let close = move || editor.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = editor.get_untracked() else {
            return;
        };
        let draft = match form.with_untracked(GiftForm::to_draft) {
            Ok(draft) => draft,
            Err(e) => {
                ctx.report(&e);
                return;
            }
        };
        spawn_local(async move {
            let saved = match target {
                GiftEditor::New => commands::add_gift(ctx, store, list_id.get_value(), draft).await,
                GiftEditor::Edit(gift) => {
                    commands::edit_gift(ctx, store, list_id.get_value(), gift.id, draft).await
                }
            };
            if saved {
                close();
            }
        });
    };

    let can_save = move || form.with(|f| f.to_draft().is_ok());
    let heading = move || match editor.get() {
        Some(GiftEditor::Edit(_)) => "Edit gift",
        _ => "Add a gift",
    };

    let field = move |label: &'static str,
                      kind: &'static str,
                      get: fn(&GiftForm) -> String,
                      set: fn(&mut GiftForm, String)| {
        view! {
            <label class="dialog-field">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <Show when=move || editor.get().is_some()>
            <div class="dialog-backdrop" on:click=move |_| close()>
                <form
                    class="dialog"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=save
                >
                    <h2>{heading}</h2>
                    {field("Gift name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {field("Estimated price (€)", "text", |f| f.price.clone(), |f, v| f.price = v)}
                    {field("Product URL", "url", |f| f.url.clone(), |f, v| f.url = v)}
                    {field("Image URL", "url", |f| f.image_url.clone(), |f, v| f.image_url = v)}
                    <p class="dialog-hint">"Fill in at least a name, a product URL or an image URL."</p>
                    <div class="dialog-actions">
                        <button type="button" on:click=move |_| close()>"Cancel"</button>
                        <button type="submit" disabled=move || !can_save()>"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
