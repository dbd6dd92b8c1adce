//! HTTP client for the CMS REST API

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{
    ContentDocument, ContentListResponse, ContentType, GitStatusResponse, LoginRequest,
    MeResponse, PublishRequest, PublishResponse, TokenResponse,
};
use crate::auth::TokenStore;
use crate::content::form::EditorForm;

/// Error payload shape used by the server for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Typed client for the CMS REST API.
///
/// Every operation issues one request against the configured base URL,
/// merging the stored bearer token into the headers when one is present.
pub struct ApiClient {
    http: Client,
    base_url: String,
    page_size: u32,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>, page_size: u32) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
            tokens,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(ApiError::from_status(status.as_u16(), detail));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    /// Send a request whose successful response carries no payload
    /// (204 or an ignorable body).
    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await?;
        Ok(())
    }

    /// Exchange the admin password for a bearer token and persist it.
    pub async fn login(&self, password: &str) -> Result<(), ApiError> {
        let body = LoginRequest {
            password: password.to_string(),
        };
        let token: TokenResponse = self
            .send_json(self.request(Method::POST, "/auth/login").json(&body))
            .await?;
        self.tokens.save(&token.access_token)?;
        Ok(())
    }

    /// End the session.
    ///
    /// The local token is cleared unconditionally; a failed remote logout
    /// is demoted to a warning so local session termination is never
    /// blocked by the server.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.send_empty(self.request(Method::POST, "/auth/logout")).await;
        self.tokens.clear()?;
        if let Err(err) = result {
            tracing::warn!("remote logout failed: {}", err);
        }
        Ok(())
    }

    /// Session-validity probe; callers treat failure as "not logged in".
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.send_json(self.request(Method::GET, "/auth/me")).await
    }

    /// Fetch one fixed page of content summaries.
    pub async fn list_content(
        &self,
        kind: ContentType,
        query: &str,
    ) -> Result<ContentListResponse, ApiError> {
        let page_size = self.page_size.to_string();
        let builder = self.request(Method::GET, "/content").query(&[
            ("type", kind.as_str()),
            ("query", query),
            ("page", "1"),
            ("page_size", page_size.as_str()),
        ]);
        self.send_json(builder).await
    }

    pub async fn get_content(&self, id: &str) -> Result<ContentDocument, ApiError> {
        let path = format!("/content/{}", encode_id(id));
        self.send_json(self.request(Method::GET, &path)).await
    }

    pub async fn create_content(&self, form: &EditorForm) -> Result<ContentDocument, ApiError> {
        let mut payload = form.payload();
        payload.kind = Some(form.kind);
        self.send_json(self.request(Method::POST, "/content").json(&payload))
            .await
    }

    /// Update an existing document; fails locally when the form has no id.
    pub async fn update_content(&self, form: &EditorForm) -> Result<ContentDocument, ApiError> {
        let id = form
            .id
            .as_deref()
            .ok_or(ApiError::MissingId { action: "update" })?;
        let path = format!("/content/{}", encode_id(id));
        self.send_json(self.request(Method::PUT, &path).json(&form.payload()))
            .await
    }

    pub async fn delete_content(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/content/{}", encode_id(id));
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    pub async fn git_status(&self) -> Result<GitStatusResponse, ApiError> {
        self.send_json(self.request(Method::GET, "/git/status")).await
    }

    /// Commit and push pending content changes; a blank message is omitted
    /// so the server falls back to its default.
    pub async fn publish(&self, message: Option<&str>) -> Result<PublishResponse, ApiError> {
        let body = PublishRequest {
            message: message
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string),
        };
        self.send_json(self.request(Method::POST, "/git/publish").json(&body))
            .await
    }
}

/// Percent-encode a content id for a URL path segment, preserving the
/// literal `/` separators of the server's path-based identifier scheme.
fn encode_id(id: &str) -> String {
    id.split('/')
        .map(|segment| utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
