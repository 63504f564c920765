//! UI Components
//!
//! Reusable Leptos components.

mod alert_banner;
mod confirm_delete;
mod gift_card;
mod gift_dialog;
mod list_detail;
mod list_index;
mod reserve_dialog;

pub use alert_banner::AlertBanner;
pub use confirm_delete::{ConfirmDelete, Deletion};
pub use gift_card::GiftCard;
pub use gift_dialog::{GiftDialog, GiftEditor};
pub use list_detail::ListDetail;
pub use list_index::ListIndex;
pub use reserve_dialog::ReserveDialog;
