//! The resource client facade.
//!
//! # Design
//! `ResourceClient` holds a base path and composes the header builder, query
//! builder, and transport into the CRUD operations. It carries no mutable
//! state between calls: a [`RequestOptions`] is constructed fresh per call
//! site and discarded after the round trip, and the bearer token is re-read
//! from the credential provider on every request.
//!
//! Envelope unwrapping is per-operation: a list with no `data` is an empty
//! result, while an item operation with no `data` is
//! [`ApiError::MissingData`] — HTTP success does not imply operation
//! success. Transport errors propagate unchanged; recovery is the caller's
//! job.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::credentials::{Anonymous, CredentialProvider};
use crate::envelope::{Envelope, ListData};
use crate::error::ApiError;
use crate::headers::{build_headers, HeaderOptions};
use crate::query::{apply_query, ParamValue, QueryOptions};
use crate::transport::{HttpBackend, Transport};

/// How item paths are derived for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Addressing {
    /// Item operations target `{base}/{id}`.
    PerItem,
    /// Single-instance resource: every operation targets the bare base path.
    Singleton,
}

/// Per-call configuration, built fluently and passed by reference.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub id: Option<String>,
    /// Overrides the derived path entirely when present.
    pub custom_path: Option<String>,
    pub headers: Vec<(String, String)>,
    pub authorized: bool,
    pub form_data: bool,
    /// Serialized by the list operation only.
    pub page: Option<u32>,
    /// Serialized by the list operation only.
    pub search: Option<String>,
    pub params: Vec<(String, ParamValue)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn custom_path(mut self, path: impl Into<String>) -> Self {
        self.custom_path = Some(path.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    pub fn form_data(mut self) -> Self {
        self.form_data = true;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            headers: self.headers.clone(),
            authorized: self.authorized,
            form_data: self.form_data,
        }
    }

    fn query_options(&self) -> QueryOptions {
        QueryOptions {
            page: self.page,
            search: self.search.clone(),
            params: self.params.clone(),
        }
    }
}

/// Generic CRUD client for one resource path.
#[derive(Clone)]
pub struct ResourceClient<B> {
    base_path: String,
    transport: Transport<B>,
    credentials: Arc<dyn CredentialProvider>,
    addressing: Addressing,
}

impl<B: HttpBackend> ResourceClient<B> {
    /// Client for a collection resource; item operations target
    /// `{base_path}/{id}`.
    pub fn new(transport: Transport<B>, base_path: &str) -> Self {
        Self::with_addressing(transport, base_path, Addressing::PerItem)
    }

    /// Client for a single-instance resource; every operation targets the
    /// bare base path and any `id` in the options is ignored.
    pub fn singleton(transport: Transport<B>, base_path: &str) -> Self {
        Self::with_addressing(transport, base_path, Addressing::Singleton)
    }

    fn with_addressing(transport: Transport<B>, base_path: &str, addressing: Addressing) -> Self {
        let trimmed = base_path.trim_matches('/');
        Self {
            base_path: format!("/{trimmed}"),
            transport,
            credentials: Arc::new(Anonymous),
            addressing,
        }
    }

    /// Replace the credential provider consulted for authorized requests.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// List the resource. The only operation that serializes `page` and
    /// `search`. A missing `data` field is an empty result, not an error.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        options: &RequestOptions,
    ) -> Result<ListData<T>, ApiError> {
        let path = self.list_path(options);
        let headers = self.headers(options);
        let envelope: Envelope<ListData<T>> = self.transport.get(&path, headers).await?;
        Ok(envelope.data.unwrap_or_else(ListData::empty))
    }

    /// Fetch a single item. A 2xx response with no `data` is
    /// [`ApiError::MissingData`].
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let path = self.item_path(options);
        let headers = self.headers(options);
        let envelope: Envelope<T> = self.transport.get(&path, headers).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// POST `body` to the resource (or to `{base}/{id}` when an id is set).
    pub async fn create<T, P>(&self, body: &P, options: &RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let path = self.item_path(options);
        let payload = serialize_body(body)?;
        let headers = self.headers(options);
        let envelope: Envelope<T> = self.transport.post(&path, Some(payload), headers).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// PUT `body` to the item path.
    pub async fn update<T, P>(&self, body: &P, options: &RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let path = self.item_path(options);
        let payload = serialize_body(body)?;
        let headers = self.headers(options);
        let envelope: Envelope<T> = self.transport.put(&path, Some(payload), headers).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// PATCH `body` to the item path.
    pub async fn patch<T, P>(&self, body: &P, options: &RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let path = self.item_path(options);
        let payload = serialize_body(body)?;
        let headers = self.headers(options);
        let envelope: Envelope<T> = self.transport.patch(&path, Some(payload), headers).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// DELETE the item. Success is HTTP success; the body, if any, is
    /// ignored.
    pub async fn delete(&self, options: &RequestOptions) -> Result<(), ApiError> {
        let path = self.item_path(options);
        let headers = self.headers(options);
        self.transport
            .delete::<serde_json::Value>(&path, headers)
            .await?;
        Ok(())
    }

    fn headers(&self, options: &RequestOptions) -> Vec<(String, String)> {
        build_headers(&options.header_options(), self.credentials.as_ref())
    }

    fn list_path(&self, options: &RequestOptions) -> String {
        let path = options.custom_path.as_deref().unwrap_or(&self.base_path);
        apply_query(path, &options.query_options())
    }

    fn item_path(&self, options: &RequestOptions) -> String {
        if let Some(custom) = &options.custom_path {
            return custom.trim_end_matches('/').to_string();
        }
        match (self.addressing, &options.id) {
            (Addressing::Singleton, _) | (Addressing::PerItem, None) => self.base_path.clone(),
            (Addressing::PerItem, Some(id)) => format!("{}/{id}", self.base_path),
        }
    }
}

fn serialize_body<P: Serialize>(body: &P) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|err| ApiError::request(err.to_string()))
}
