//! Frontend Commands
//!
//! Run controller operations and fold their results into the store,
//! organized by domain. Failures go to the alert banner.

mod list;
mod gift;
mod clipboard;

use gift_registry_lib::{DomainResult, ViewChange};
use std::future::Future;

use crate::context::AppContext;
use crate::store::{store_apply, AppStore};

pub use list::*;
pub use gift::*;
pub use clipboard::*;

/// Await a write, applying its change on success. Returns whether it
/// succeeded so forms know when to close.
async fn run_write(
    ctx: AppContext,
    store: AppStore,
    write: impl Future<Output = DomainResult<Option<ViewChange>>>,
) -> bool {
    match write.await {
        Ok(change) => {
            if let Some(change) = change {
                store_apply(&store, &change);
            }
            true
        }
        Err(e) => {
            ctx.report(&e);
            false
        }
    }
}
