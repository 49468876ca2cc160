//! Authorized backend calls.
//!
//! Every protected endpoint (finance, grades, attendance, catalog) expects
//! the stored bearer credential in an `Authorization: Bearer` header. The
//! feature services go through this client instead of attaching the header
//! themselves.

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::SessionError;
use crate::session::SessionStore;

/// HTTP client that replays the session's bearer credential on every call.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, store: SessionStore) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            store,
        }
    }

    /// GET a protected endpoint.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SessionError> {
        let token = self.bearer()?;
        let res = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// POST to a protected endpoint with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, SessionError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let token = self.bearer()?;
        let res = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// Fail before hitting the network when there is no session.
    fn bearer(&self) -> Result<String, SessionError> {
        self.store
            .token()
            .ok_or_else(|| SessionError::InvalidCredentials("no active session".to_string()))
    }
}
