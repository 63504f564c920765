//! Clipboard Commands
//!
//! Share links go through the async clipboard API.

use gift_registry_lib::view::share_link;
use gift_registry_lib::ListId;
use leptos::prelude::window;
use wasm_bindgen_futures::JsFuture;

use crate::context::AppContext;

/// Why a share link could not be copied. Browser error values only go to
/// the log; the user sees `message`.
#[derive(Debug, Clone, PartialEq)]
enum ShareFailure {
    PageUrl,
    /// The link was built but the clipboard refused it
    Clipboard(String),
}

impl ShareFailure {
    fn message(&self) -> String {
        match self {
            ShareFailure::PageUrl => "Could not work out the address of this page.".to_string(),
            ShareFailure::Clipboard(link) => {
                format!("Could not copy automatically. Share this link: {}", link)
            }
        }
    }
}

async fn write_text(text: &str) -> Result<(), ShareFailure> {
    let promise = window().navigator().clipboard().write_text(text);
    JsFuture::from(promise).await.map(|_| ()).map_err(|e| {
        log::warn!("clipboard refused the share link: {:?}", e);
        ShareFailure::Clipboard(text.to_string())
    })
}

fn current_link(id: &ListId, share_param: &str) -> Result<String, ShareFailure> {
    let href = window().location().href().map_err(|e| {
        log::warn!("page url unavailable: {:?}", e);
        ShareFailure::PageUrl
    })?;
    share_link(&href, id, share_param).map_err(|e| {
        log::warn!("cannot build share link from {}: {}", href, e);
        ShareFailure::PageUrl
    })
}

/// Copy the share link of `id` and tell the user.
pub async fn copy_share_link(ctx: AppContext, id: ListId) {
    let result = async {
        let link = current_link(&id, &ctx.share_param())?;
        write_text(&link).await?;
        Ok::<_, ShareFailure>(link)
    }
    .await;

    match result {
        Ok(link) => {
            log::debug!("copied {}", link);
            ctx.alert("Link copied to the clipboard");
        }
        Err(failure) => ctx.alert(failure.message()),
    }
}
