//! Access to the JSON document store.
//!
//! Every document lives at `{base}{path}.json`. Reads of missing documents
//! yield `null`, `POST` answers with `{"name": key}` and `DELETE` may answer
//! with an empty body.

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use join_api::v1::{document, StorePath};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("store answered {status} for `{path}`")]
    Status { path: String, status: StatusCode },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid store URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("store URL `{0}` cannot hold document paths")]
    NotABase(Url),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A hierarchical JSON store addressed by [`StorePath`].
pub trait Store: Send + Sync {
    fn get(&self, path: &StorePath) -> impl Future<Output = StoreResult<Value>> + Send;

    /// Replaces the value at `path`, returning what the store echoes back.
    fn put(
        &self,
        path: &StorePath,
        value: &Value,
    ) -> impl Future<Output = StoreResult<Value>> + Send;

    /// Adds `value` under a generated key. Answers `{"name": key}`.
    fn post(
        &self,
        path: &StorePath,
        value: &Value,
    ) -> impl Future<Output = StoreResult<Value>> + Send;

    fn delete(&self, path: &StorePath) -> impl Future<Output = StoreResult<Value>> + Send;

    /// Reads `path`, treating failures like a missing document.
    fn load(&self, path: &StorePath) -> impl Future<Output = Option<Value>> + Send {
        async move {
            match self.get(path).await {
                Ok(Value::Null) => None,
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(%path, "failed to load from store: {err}");
                    None
                }
            }
        }
    }
}

/// The HTTP store.
#[derive(Clone, Debug)]
pub struct StoreClient {
    client: reqwest::Client,
    base: Url,
}

impl StoreClient {
    /// `base` is the URL every document path is resolved against. A missing
    /// trailing slash is added.
    pub fn new(base: &str) -> StoreResult<Self> {
        let mut base = Url::parse(base)?;

        if base.cannot_be_a_base() {
            return Err(StoreError::NotABase(base));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The `{base}{path}.json` URL of a document.
    pub fn url(&self, path: &StorePath) -> StoreResult<Url> {
        let mut url = self.base.clone();

        {
            let mut segments = (url.path_segments_mut())
                .map_err(|_| StoreError::NotABase(self.base.clone()))?;
            segments.pop_if_empty();

            match path.segments().split_last() {
                Some((last, parents)) => {
                    segments.extend(parents);
                    segments.push(&format!("{last}.json"));
                }
                None => {
                    segments.push(".json");
                }
            }
        }

        Ok(url)
    }

    /// The change counter of the store, bumped on every write.
    pub async fn generation(&self) -> StoreResult<u64> {
        let url = self.base.join("generation")?;
        let response = self.client.get(url).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }

    async fn send(
        &self,
        method: Method,
        path: &StorePath,
        body: Option<&Value>,
    ) -> StoreResult<Value> {
        let url = self.url(path)?;
        debug!(%method, %url, "store request");

        let mut request = self.client.request(method, url);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Store for StoreClient {
    async fn get(&self, path: &StorePath) -> StoreResult<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn put(&self, path: &StorePath, value: &Value) -> StoreResult<Value> {
        self.send(Method::PUT, path, Some(value)).await
    }

    async fn post(&self, path: &StorePath, value: &Value) -> StoreResult<Value> {
        self.send(Method::POST, path, Some(value)).await
    }

    async fn delete(&self, path: &StorePath) -> StoreResult<Value> {
        self.send(Method::DELETE, path, None).await
    }
}

/// An in-process store holding one JSON tree.
///
/// Clones share the same tree.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    root: Arc<Mutex<Value>>,
}

impl MemoryStore {
    pub fn new(root: Value) -> Self {
        Self {
            root: Arc::new(Mutex::new(root)),
        }
    }

    pub fn snapshot(&self) -> Value {
        self.root().clone()
    }

    fn root(&self) -> MutexGuard<'_, Value> {
        self.root.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    async fn get(&self, path: &StorePath) -> StoreResult<Value> {
        let root = self.root();
        Ok(document::get(&root, path).cloned().unwrap_or(Value::Null))
    }

    async fn put(&self, path: &StorePath, value: &Value) -> StoreResult<Value> {
        document::put(&mut self.root(), path, value.clone());
        Ok(value.clone())
    }

    async fn post(&self, path: &StorePath, value: &Value) -> StoreResult<Value> {
        let key = document::push(&mut self.root(), path, value.clone());
        Ok(json!({ "name": key }))
    }

    async fn delete(&self, path: &StorePath) -> StoreResult<Value> {
        document::delete(&mut self.root(), path);
        Ok(Value::Null)
    }
}
