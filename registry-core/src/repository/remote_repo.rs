//! Remote List Store
//!
//! Talks to a hosted realtime JSON database through its REST interface:
//! `GET`/`PUT`/`PATCH`/`DELETE` on `{databaseUrl}/{path}.json`, and the
//! same URL with `Accept: text/event-stream` for change notifications.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use url::Url;

use super::document::{self, GiftLayout};
use super::sse::{SseDecoder, SseMessage};
use super::traits::{ListStore, ListStream};
use super::tree;
use crate::compat::{self, BoxedStream};
use crate::config::RegistryConfig;
use crate::domain::{
    DomainError, DomainResult, Gift, GiftDraft, GiftId, GiftList, GiftPatch, ListId, ListSummary,
};

/// Store backed by the hosted database
pub struct RemoteStore {
    base_url: Url,
    auth_token: Option<String>,
    http: Client,
}

impl RemoteStore {
    pub fn new(config: &RegistryConfig) -> DomainResult<Self> {
        config.validate()?;
        let base_url = config.database_url()?;
        let http = Client::builder()
            .build()
            .map_err(|e| DomainError::StorageUnavailable(format!("Failed to build HTTP client: {}", e)))?;
        log::info!("remote store at {}", base_url);
        Ok(Self {
            base_url,
            auth_token: config.auth_token.clone(),
            http,
        })
    }

    /// REST URL for a store path: `lists/l1` → `{base}/lists/l1.json`.
    pub fn endpoint(&self, path: &str) -> DomainResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                DomainError::InvalidInput(format!("database url cannot hold paths: {}", self.base_url))
            })?;
            segments.pop_if_empty();
            let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            if let Some((last, parents)) = parts.split_last() {
                segments.extend(parents);
                segments.push(&format!("{}.json", last));
            } else {
                segments.push(".json");
            }
        }
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }

    async fn read(&self, path: &str) -> DomainResult<Value> {
        log::debug!("GET {}", path);
        let resp = self.http.get(self.endpoint(path)?).send().await?;
        let resp = check_status(resp, "GET", path).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn write(&self, path: &str, value: &Value) -> DomainResult<()> {
        log::debug!("PUT {}", path);
        let resp = self.http.put(self.endpoint(path)?).json(value).send().await?;
        check_status(resp, "PUT", path).await?;
        Ok(())
    }

    async fn merge(&self, path: &str, value: &Value) -> DomainResult<()> {
        log::debug!("PATCH {}", path);
        let resp = self.http.patch(self.endpoint(path)?).json(value).send().await?;
        check_status(resp, "PATCH", path).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> DomainResult<()> {
        log::debug!("DELETE {}", path);
        let resp = self.http.delete(self.endpoint(path)?).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check_status(resp, "DELETE", path).await?;
        Ok(())
    }

    /// Open the event stream for `path` and mirror it into whole-subtree
    /// snapshots, one per change.
    async fn watch(&self, path: &str) -> DomainResult<BoxedStream<DomainResult<Value>>> {
        log::info!("subscribing to {}", path);
        let resp = self
            .http
            .get(self.endpoint(path)?)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let resp = check_status(resp, "GET", path).await?;
        let body = compat::boxed(resp.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec())));
        let mirror = Mirror {
            path: path.to_string(),
            body,
            decoder: SseDecoder::new(),
            tree: Value::Null,
            pending: VecDeque::new(),
            finished: false,
        };
        Ok(compat::boxed(futures::stream::unfold(mirror, next_snapshot)))
    }

    /// Load a list for writing. Documents in the array layout are
    /// rewritten keyed by gift ID first, so gift paths address the right
    /// record.
    async fn load_for_write(&self, id: &ListId) -> DomainResult<GiftList> {
        let path = document::list_path(id);
        let mut decoded = document::decode_list(id, self.read(&path).await?)?
            .ok_or_else(|| DomainError::NotFound(format!("list {}", id)))?;
        if decoded.layout == GiftLayout::Legacy {
            log::info!("migrating list {} to keyed gifts", id);
            // Keyed gifts lose the array order, so it moves into positions.
            decoded.list.renumber();
            self.write(&path, &document::encode_list(&decoded.list)?).await?;
        }
        Ok(decoded.list)
    }
}

async fn check_status(resp: Response, method: &str, path: &str) -> DomainResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DomainError::StorageUnavailable(format!(
        "{} {} returned {}: {}",
        method, path, status, body
    )))
}

/// Payload of `put` and `patch` events
#[derive(Debug, Deserialize)]
struct ChangePayload {
    path: String,
    data: Value,
}

/// Events the database sends on a subscription
#[derive(Debug, PartialEq)]
enum ServerEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
    Other(String),
}

impl ServerEvent {
    fn from_message(message: &SseMessage) -> DomainResult<Self> {
        Ok(match message.event.as_str() {
            "put" => {
                let p: ChangePayload = serde_json::from_str(&message.data)?;
                ServerEvent::Put { path: p.path, data: p.data }
            }
            "patch" => {
                let p: ChangePayload = serde_json::from_str(&message.data)?;
                ServerEvent::Patch { path: p.path, data: p.data }
            }
            "keep-alive" => ServerEvent::KeepAlive,
            "cancel" => ServerEvent::Cancel(message.data.trim_matches('"').to_string()),
            "auth_revoked" => ServerEvent::AuthRevoked,
            other => ServerEvent::Other(other.to_string()),
        })
    }
}

/// Local copy of a watched subtree plus the connection feeding it
struct Mirror {
    path: String,
    body: BoxedStream<Result<Vec<u8>, reqwest::Error>>,
    decoder: SseDecoder,
    tree: Value,
    pending: VecDeque<DomainResult<Value>>,
    finished: bool,
}

impl Mirror {
    fn handle(&mut self, message: SseMessage) {
        if self.finished {
            return;
        }
        match ServerEvent::from_message(&message) {
            Ok(ServerEvent::Put { path, data }) => {
                tree::set_at(&mut self.tree, &tree::split_path(&path), data);
                self.pending.push_back(Ok(self.tree.clone()));
            }
            Ok(ServerEvent::Patch { path, data }) => match data {
                Value::Object(update) => {
                    tree::merge_at(&mut self.tree, &tree::split_path(&path), update);
                    self.pending.push_back(Ok(self.tree.clone()));
                }
                other => log::warn!("ignoring patch on {} with non-object data: {}", path, other),
            },
            Ok(ServerEvent::KeepAlive) => {}
            Ok(ServerEvent::Cancel(reason)) => self.fail(format!("subscription cancelled: {}", reason)),
            Ok(ServerEvent::AuthRevoked) => self.fail("subscription credentials revoked".to_string()),
            Ok(ServerEvent::Other(name)) => log::debug!("ignoring event {} on {}", name, self.path),
            Err(e) => log::warn!("unreadable event on {}: {}", self.path, e),
        }
    }

    fn fail(&mut self, reason: String) {
        log::warn!("{} on {}", reason, self.path);
        self.pending.push_back(Err(DomainError::StorageUnavailable(reason)));
        self.finished = true;
    }
}

async fn next_snapshot(mut mirror: Mirror) -> Option<(DomainResult<Value>, Mirror)> {
    loop {
        if let Some(item) = mirror.pending.pop_front() {
            return Some((item, mirror));
        }
        if mirror.finished {
            log::info!("subscription to {} closed", mirror.path);
            return None;
        }
        match mirror.body.next().await {
            Some(Ok(chunk)) => {
                for message in mirror.decoder.feed(&chunk) {
                    mirror.handle(message);
                }
            }
            Some(Err(e)) => {
                mirror.pending.push_back(Err(e.into()));
                mirror.finished = true;
            }
            None => mirror.finished = true,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ListStore for RemoteStore {
    async fn list_all(&self) -> DomainResult<Vec<ListSummary>> {
        document::decode_index(self.read(document::LISTS_ROOT).await?)
    }

    async fn create_list(&self, name: &str) -> DomainResult<GiftList> {
        let list = GiftList::new(name)?;
        self.write(&document::list_path(&list.id), &document::encode_list(&list)?)
            .await?;
        Ok(list)
    }

    async fn delete_list(&self, id: &ListId) -> DomainResult<()> {
        self.remove(&document::list_path(id)).await
    }

    async fn get_list(&self, id: &ListId) -> DomainResult<GiftList> {
        let value = self.read(&document::list_path(id)).await?;
        document::decode_list(id, value)?
            .map(|decoded| decoded.list)
            .ok_or_else(|| DomainError::NotFound(format!("list {}", id)))
    }

    async fn subscribe_list(&self, id: &ListId) -> DomainResult<ListStream> {
        let snapshots = self.watch(&document::list_path(id)).await?;
        let id = id.clone();
        Ok(compat::boxed(snapshots.map(move |snapshot| {
            snapshot.and_then(|value| {
                document::decode_list(&id, value).map(|decoded| decoded.map(|d| d.list))
            })
        })))
    }

    async fn add_gift(&self, list_id: &ListId, draft: GiftDraft) -> DomainResult<Gift> {
        let gift = Gift::from_draft(draft)?;
        let gift = self.load_for_write(list_id).await?.append_gift(gift);
        self.write(&document::gift_path(list_id, &gift.id), &document::encode_gift(&gift)?)
            .await?;
        Ok(gift)
    }

    async fn update_gift(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        patch: GiftPatch,
    ) -> DomainResult<Gift> {
        let patch = patch.normalized();
        let list = self.load_for_write(list_id).await?;
        let mut gift = list.require_gift(gift_id)?.clone();
        gift.apply(&patch)?;
        if !patch.is_empty() {
            self.merge(&document::gift_path(list_id, gift_id), &serde_json::to_value(&patch)?)
                .await?;
        }
        Ok(gift)
    }

    async fn delete_gift(&self, list_id: &ListId, gift_id: &GiftId) -> DomainResult<()> {
        let list = self.load_for_write(list_id).await?;
        if list.gift(gift_id).is_none() {
            return Ok(());
        }
        self.remove(&document::gift_path(list_id, gift_id)).await
    }
}
