use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::{BillsApi, Store, UploadReceipt, UploadRequest};
use crate::error::StoreError;
use crate::models::Bill;

/// Requests wait for the store as long as it takes.
pub(crate) const REQUEST_TIMEOUT: Option<Duration> = None;

/// Store reached over HTTP. Requests carry the stored bearer token when one
/// is present.
pub(crate) struct HttpStore {
    client: Client,
    base_url: String,
    jwt: Option<String>,
}

impl HttpStore {
    pub(crate) fn new(base_url: &str, jwt: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            jwt,
        })
    }

    /// A request to `url`, carrying the bearer token when one is stored.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.jwt {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }
}

impl Store for HttpStore {
    fn bills(&self) -> Box<dyn BillsApi + '_> {
        Box::new(ApiEntity {
            api: self,
            key: "bills",
        })
    }
}

/// One REST collection (`/{key}`) on the store.
struct ApiEntity<'a> {
    api: &'a HttpStore,
    key: &'static str,
}

impl ApiEntity<'_> {
    fn url(&self, selector: Option<&str>) -> String {
        endpoint(&self.api.base_url, self.key, selector)
    }
}

impl BillsApi for ApiEntity<'_> {
    #[tracing::instrument(skip(self), fields(key = self.key))]
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let response = self.api.request(Method::GET, &self.url(None)).send()?;
        json_or_error(response)
    }

    #[tracing::instrument(skip(self, upload), fields(key = self.key, file = %upload.file.name))]
    fn create(&self, upload: UploadRequest<'_>) -> Result<UploadReceipt, StoreError> {
        let part = multipart::Part::bytes(upload.file.bytes.clone())
            .file_name(upload.file.name.clone());
        let form = multipart::Form::new()
            .part("file", part)
            .text("email", upload.email.to_string());
        let response = self
            .api
            .request(Method::POST, &self.url(None))
            .multipart(form)
            .send()?;
        json_or_error(response)
    }

    #[tracing::instrument(skip(self, bill), fields(key = self.key))]
    fn update(&self, selector: Option<&str>, bill: &Bill) -> Result<Bill, StoreError> {
        let selector = selector
            .filter(|id| !id.trim().is_empty())
            .ok_or(StoreError::MissingSelector)?;
        let response = self
            .api
            .request(Method::PATCH, &self.url(Some(selector)))
            .json(bill)
            .send()?;
        json_or_error(response)
    }
}

pub(crate) fn endpoint(base_url: &str, key: &str, selector: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match selector {
        Some(id) => format!("{base}/{key}/{id}"),
        None => format!("{base}/{key}"),
    }
}

fn json_or_error<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Build the rejection for a non-success response. The store reports
/// `{"message": "..."}`; anything else falls back to the canonical reason.
pub(crate) fn api_error(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        });
    StoreError::Api { status, message }
}
