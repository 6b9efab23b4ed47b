//! Blocking Ghost admin API client.
//!
//! Every call is one curl transfer; run from `spawn_blocking` when used from
//! async code. Authenticated calls take the full `Authorization` header value
//! (see `AuthToken::auth_header`).

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::error::ApiError;
use super::types::{
    AboutList, AuthReqBody, AuthToken, ConfigurationList, PostList, PostStubList,
    RefreshReqBody, RevokeReqBody, RevokeResponse, SettingsList, UserList,
};
use crate::config::ApiConfig;
use crate::http::{self, HttpRequest, HttpResponse, Method, TransferOptions};

/// A decoded body plus the bits of the response callers assert on.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u32,
    pub etag: Option<String>,
    pub body: T,
}

#[derive(Debug, Clone)]
pub struct GhostApi {
    base: Url,
    client_id: String,
    opts: TransferOptions,
}

impl GhostApi {
    /// Client for the blog at `blog_url` (canonical URL, e.g. from blog URL discovery).
    pub fn new(blog_url: &str, cfg: &ApiConfig) -> Result<Self, ApiError> {
        let root = format!("{}/", blog_url.trim_end_matches('/'));
        let base = Url::parse(&root)
            .and_then(|u| u.join(&cfg.api_path))
            .map_err(|source| ApiError::InvalidUrl {
                url: root.clone(),
                source,
            })?;
        Ok(Self {
            base,
            client_id: cfg.client_id.clone(),
            opts: cfg.transfer_options(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    // configuration

    pub fn get_configuration(&self) -> Result<ApiResponse<ConfigurationList>, ApiError> {
        self.call(Method::Get, self.endpoint("configuration/")?, None, None, None)
    }

    /// The admin client secret advertised in the public configuration.
    pub fn get_client_secret(&self) -> Result<String, ApiError> {
        let config = self.get_configuration()?;
        config
            .body
            .get("clientSecret")
            .map(str::to_string)
            .ok_or(ApiError::MissingClientSecret)
    }

    pub fn get_version(&self, auth: &str) -> Result<ApiResponse<AboutList>, ApiError> {
        self.call(
            Method::Get,
            self.endpoint("configuration/about/")?,
            Some(auth),
            None,
            None,
        )
    }

    // authentication

    pub fn get_auth_token(&self, credentials: &AuthReqBody) -> Result<AuthToken, ApiError> {
        let body = encode(credentials)?;
        let url = self.endpoint("authentication/token")?;
        let response: ApiResponse<AuthToken> = self.call(Method::Post, url, None, None, Some(body))?;
        Ok(response.body)
    }

    pub fn refresh_auth_token(
        &self,
        credentials: &RefreshReqBody,
    ) -> Result<ApiResponse<AuthToken>, ApiError> {
        let body = encode(credentials)?;
        let url = self.endpoint("authentication/token")?;
        self.call(Method::Post, url, None, None, Some(body))
    }

    pub fn revoke_auth_token(
        &self,
        auth: &str,
        request: &RevokeReqBody,
    ) -> Result<ApiResponse<RevokeResponse>, ApiError> {
        let body = encode(request)?;
        let url = self.endpoint("authentication/revoke")?;
        self.call(Method::Post, url, Some(auth), None, Some(body))
    }

    // users

    pub fn get_current_user(
        &self,
        auth: &str,
        etag: &str,
    ) -> Result<ApiResponse<UserList>, ApiError> {
        let url = self.endpoint("users/me/?include=roles&status=all")?;
        self.call(Method::Get, url, Some(auth), Some(etag), None)
    }

    // posts

    /// Latest `limit` posts of any status, newest first.
    pub fn get_posts(
        &self,
        auth: &str,
        etag: &str,
        limit: u32,
    ) -> Result<ApiResponse<PostList>, ApiError> {
        let path = format!(
            "posts/?status=all&staticPages=all&limit={}&include=tags",
            limit
        );
        self.call(Method::Get, self.endpoint(&path)?, Some(auth), Some(etag), None)
    }

    pub fn get_post(&self, auth: &str, id: &str) -> Result<ApiResponse<PostList>, ApiError> {
        let url = self.post_endpoint(id, Some("status=all&include=tags"))?;
        self.call(Method::Get, url, Some(auth), None, None)
    }

    pub fn create_post(
        &self,
        auth: &str,
        posts: &PostStubList,
    ) -> Result<ApiResponse<PostList>, ApiError> {
        let body = encode(posts)?;
        let url = self.endpoint("posts/?include=tags")?;
        self.call(Method::Post, url, Some(auth), None, Some(body))
    }

    pub fn update_post(
        &self,
        auth: &str,
        id: &str,
        posts: &PostStubList,
    ) -> Result<ApiResponse<PostList>, ApiError> {
        let body = encode(posts)?;
        let url = self.post_endpoint(id, Some("include=tags"))?;
        self.call(Method::Put, url, Some(auth), None, Some(body))
    }

    pub fn delete_post(&self, auth: &str, id: &str) -> Result<u32, ApiError> {
        let url = self.post_endpoint(id, None)?;
        let (_, response) = self.execute(Method::Delete, url, Some(auth), None, None)?;
        Ok(response.status)
    }

    // settings

    pub fn get_settings(
        &self,
        auth: &str,
        etag: &str,
    ) -> Result<ApiResponse<SettingsList>, ApiError> {
        let url = self.endpoint("settings/?type=blog,theme,private")?;
        self.call(Method::Get, url, Some(auth), Some(etag), None)
    }

    /// Fixed endpoint relative to the API root.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|source| ApiError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            source,
        })
    }

    /// `posts/<id>/`, with `id` encoded as exactly one path segment.
    fn post_endpoint(&self, id: &str, query: Option<&str>) -> Result<Url, ApiError> {
        let invalid = || ApiError::InvalidPostId { id: id.to_string() };
        if matches!(id, "" | "." | "..") || id.chars().any(char::is_control) {
            return Err(invalid());
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["posts", id, ""]);
        url.set_query(query);
        Ok(url)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        auth: Option<&str>,
        etag: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let (url, response) = self.execute(method, url, auth, etag, body)?;
        let decoded = serde_json::from_slice(&response.body)
            .map_err(|source| ApiError::Decode { url, source })?;
        Ok(ApiResponse {
            status: response.status,
            etag: response.header("ETag").map(str::to_string),
            body: decoded,
        })
    }

    /// Sends the request and maps non-2xx answers to `ApiError::Http`.
    ///
    /// A 304 to a conditional request is `ApiError::NotModified`, carrying
    /// the server's current `ETag`.
    fn execute(
        &self,
        method: Method,
        url: Url,
        auth: Option<&str>,
        etag: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<(String, HttpResponse), ApiError> {
        let url = url.to_string();

        let mut request = HttpRequest::new(method, &url).header("Accept", "application/json");
        if let Some(auth) = auth {
            request = request.header("Authorization", auth);
        }
        if let Some(etag) = etag.filter(|e| !e.is_empty()) {
            request = request.header("If-None-Match", etag);
        }
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response =
            http::perform(&request, &self.opts, None).map_err(|source| ApiError::Transport {
                method: method.as_str(),
                url: url.clone(),
                source,
            })?;

        if response.status == 304 {
            tracing::debug!("{} {} -> not modified", method.as_str(), url);
            return Err(ApiError::NotModified {
                method: method.as_str(),
                url,
                etag: response.header("ETag").map(str::to_string),
            });
        }
        if !response.is_success() {
            tracing::debug!("{} {} -> HTTP {}", method.as_str(), url, response.status);
            return Err(ApiError::Http {
                method: method.as_str(),
                url,
                status: response.status,
                errors: serde_json::from_slice(&response.body).ok(),
            });
        }
        Ok((url, response))
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(ApiError::Encode)
}
