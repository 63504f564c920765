//! Confirm Delete Component
//!
//! Deleting a list or a gift takes two clicks: the first arms the button
//! and says what will go, the second removes it.

use leptos::prelude::*;

/// What a delete button removes
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion {
    /// A whole list, named by its owner
    List(String),
    /// One gift, named by its display name
    Gift(String),
}

impl Deletion {
    fn action(&self) -> &'static str {
        match self {
            Deletion::List(_) => "Delete list",
            Deletion::Gift(_) => "Remove",
        }
    }

    fn prompt(&self) -> String {
        match self {
            Deletion::List(owner) => format!("Delete {}'s list and all its gifts?", owner),
            Deletion::Gift(name) => format!("Remove {} from the list?", name),
        }
    }
}

#[component]
pub fn ConfirmDelete(target: Deletion, #[prop(into)] on_confirm: Callback<()>) -> impl IntoView {
    let armed = RwSignal::new(false);
    let target = StoredValue::new(target);

    move || {
        if armed.get() {
            view! {
                <span class="delete-confirm" role="alert">
                    <span class="delete-confirm-text">{target.with_value(Deletion::prompt)}</span>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            armed.set(false);
                            on_confirm.run(());
                        }
                    >
                        "Yes"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            armed.set(false);
                        }
                    >
                        "Keep"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    class="delete-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >
                    {target.with_value(Deletion::action)}
                </button>
            }
            .into_any()
        }
    }
}
