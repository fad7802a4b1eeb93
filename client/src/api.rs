use std::env;

use common::subscription::{Subscription, SubscriptionPayload};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:4000/";

/// The five store operations as seen from the client.
#[allow(async_fn_in_trait)]
pub trait SubscriptionApi {
    async fn list(&self) -> ClientResult<Vec<Subscription>>;
    async fn get(&self, id: i64) -> ClientResult<Subscription>;
    /// Returns the id the server assigned.
    async fn create(&self, payload: &SubscriptionPayload) -> ClientResult<i64>;
    async fn update(&self, id: i64, payload: &SubscriptionPayload) -> ClientResult<()>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `SubscriptionApi` over HTTP/JSON. No retries, no timeouts beyond
/// reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpSubscriptionApi {
    http: reqwest::Client,
    collection: Url,
}

impl HttpSubscriptionApi {
    /// `base` is the server root, e.g. `http://localhost:4000/`.
    pub fn new(base: &str) -> ClientResult<Self> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            collection: base.join("subscriptions")?,
        })
    }

    /// Reads `SUBSCRIPTIONS_API_BASE` (or a `.env` entry), falling back to
    /// the local development server.
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();
        let base = env::var("SUBSCRIPTIONS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        Self::new(&base)
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn item_url(&self, id: i64) -> Url {
        let mut url = self.collection.clone();
        url.set_path(&format!("{}/{}", self.collection.path(), id));
        url
    }
}

impl SubscriptionApi for HttpSubscriptionApi {
    async fn list(&self) -> ClientResult<Vec<Subscription>> {
        let res = self.http.get(self.collection.clone()).send().await?;
        Ok(ensure_success(res).await?.json().await?)
    }

    async fn get(&self, id: i64) -> ClientResult<Subscription> {
        let res = self.http.get(self.item_url(id)).send().await?;
        Ok(ensure_success(res).await?.json().await?)
    }

    async fn create(&self, payload: &SubscriptionPayload) -> ClientResult<i64> {
        let res = self
            .http
            .post(self.collection.clone())
            .json(payload)
            .send()
            .await?;
        let created: CreatedResponse = ensure_success(res).await?.json().await?;
        log::debug!("created subscription {}", created.id);
        Ok(created.id)
    }

    async fn update(&self, id: i64, payload: &SubscriptionPayload) -> ClientResult<()> {
        let res = self.http.put(self.item_url(id)).json(payload).send().await?;
        ensure_success(res).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        let res = self.http.delete(self.item_url(id)).send().await?;
        ensure_success(res).await?;
        Ok(())
    }
}

async fn ensure_success(res: Response) -> ClientResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await.unwrap_or_default();
    let message = error_message(&text, status);
    log::warn!("{} {}", status, message);

    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(message))
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Prefers the server's `{"error": ...}` field, then the raw body, then the
/// status line.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}
