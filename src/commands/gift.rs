//! Gift Commands

use gift_registry_lib::{Gift, GiftDraft, GiftId, ListId};

use super::run_write;
use crate::context::AppContext;
use crate::store::AppStore;

pub async fn add_gift(ctx: AppContext, store: AppStore, list_id: ListId, draft: GiftDraft) -> bool {
    let controller = ctx.controller();
    run_write(ctx, store, controller.add_gift(&list_id, draft)).await
}

pub async fn edit_gift(
    ctx: AppContext,
    store: AppStore,
    list_id: ListId,
    gift_id: GiftId,
    draft: GiftDraft,
) -> bool {
    let controller = ctx.controller();
    run_write(ctx, store, controller.edit_gift(&list_id, &gift_id, draft)).await
}

pub async fn delete_gift(ctx: AppContext, store: AppStore, list_id: ListId, gift_id: GiftId) -> bool {
    let controller = ctx.controller();
    run_write(ctx, store, controller.delete_gift(&list_id, &gift_id)).await
}

pub async fn reserve_gift(
    ctx: AppContext,
    store: AppStore,
    list_id: ListId,
    gift_id: GiftId,
    reserver: String,
) -> bool {
    let controller = ctx.controller();
    run_write(ctx, store, controller.reserve(&list_id, &gift_id, &reserver)).await
}

pub async fn cancel_reservation(ctx: AppContext, store: AppStore, list_id: ListId, gift_id: GiftId) -> bool {
    let controller = ctx.controller();
    run_write(ctx, store, controller.cancel_reservation(&list_id, &gift_id)).await
}

pub async fn toggle_purchased(ctx: AppContext, store: AppStore, list_id: ListId, gift: Gift) -> bool {
    let controller = ctx.controller();
    run_write(ctx, store, controller.toggle_purchased(&list_id, &gift)).await
}
