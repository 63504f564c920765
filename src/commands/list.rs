//! List Commands

use futures::future::{AbortHandle, Abortable};
use futures::StreamExt;
use gift_registry_lib::{ListId, Screen, SyncStrategy};
use leptos::task::spawn_local;

use super::run_write;
use crate::context::AppContext;
use crate::store::{store_apply, store_close_detail, store_open_detail, store_replace_detail, store_set_index, AppStore};

pub async fn load_index(ctx: AppContext, store: AppStore) {
    match ctx.controller().load_index().await {
        Ok(lists) => store_set_index(&store, lists),
        Err(e) => ctx.report(&e),
    }
}

/// Create a list and open it.
pub async fn create_list(ctx: AppContext, store: AppStore, name: String) -> bool {
    let controller = ctx.controller();
    let change = match controller.create_list(&name).await {
        Ok(change) => change,
        Err(e) => {
            ctx.report(&e);
            return false;
        }
    };
    store_apply(&store, &change);
    open_list(ctx, store, change.list_id().clone());
    true
}

pub async fn delete_list(ctx: AppContext, store: AppStore, id: ListId) {
    let write = async { ctx.controller().delete_list(&id).await.map(Some) };
    run_write(ctx, store, write).await;
}

pub fn open_list(ctx: AppContext, store: AppStore, id: ListId) {
    store_open_detail(&store, id.clone());
    ctx.navigate(Screen::Detail(id));
}

pub fn close_list(ctx: AppContext, store: AppStore) {
    store_close_detail(&store);
    ctx.navigate(Screen::Index);
}

/// Keep the detail cache of `id` current until the handle is aborted.
///
/// With subscriptions every pushed snapshot replaces the cache; otherwise
/// the list is read once and later writes patch it.
pub fn follow_list(ctx: AppContext, store: AppStore, id: ListId) -> AbortHandle {
    let (handle, registration) = AbortHandle::new_pair();
    let task = async move {
        let controller = ctx.controller();
        match controller.strategy() {
            SyncStrategy::Optimistic => match controller.open_list(&id).await {
                Ok(list) => store_replace_detail(&store, &id, Some(list)),
                Err(e) if e.is_not_found() => store_replace_detail(&store, &id, None),
                Err(e) => ctx.report(&e),
            },
            SyncStrategy::Subscription => {
                let mut snapshots = match controller.watch_list(&id).await {
                    Ok(stream) => stream,
                    Err(e) => {
                        ctx.report(&e);
                        return;
                    }
                };
                while let Some(snapshot) = snapshots.next().await {
                    match snapshot {
                        Ok(list) => store_replace_detail(&store, &id, list),
                        Err(e) => {
                            ctx.report(&e);
                            break;
                        }
                    }
                }
                log::info!("stopped watching list {}", id);
            }
        }
    };
    spawn_local(async move {
        let _ = Abortable::new(task, registration).await;
    });
    handle
}
