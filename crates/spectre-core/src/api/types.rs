//! Request and response bodies of the Ghost admin API (v0.1).

use serde::{Deserialize, Serialize};

pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const GRANT_TYPE_REFRESH: &str = "refresh_token";
pub const TOKEN_TYPE_ACCESS: &str = "access_token";
pub const TOKEN_TYPE_REFRESH: &str = "refresh_token";

/// Body of `POST authentication/token` for the password grant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthReqBody {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl AuthReqBody {
    pub fn from_password(client_id: &str, client_secret: &str, email: &str, password: &str) -> Self {
        Self {
            grant_type: GRANT_TYPE_PASSWORD.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            username: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Body of `POST authentication/token` for the refresh grant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshReqBody {
    pub grant_type: String,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
}

impl RefreshReqBody {
    pub fn new(refresh_token: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            grant_type: GRANT_TYPE_REFRESH.to_string(),
            refresh_token: refresh_token.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }
}

/// Body of `POST authentication/revoke`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokeReqBody {
    pub token_type_hint: String,
    pub token: String,
    pub client_id: String,
    pub client_secret: String,
}

impl RevokeReqBody {
    pub fn new(token_type_hint: &str, token: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            token_type_hint: token_type_hint.to_string(),
            token: token.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokeResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken {
    pub token_type: String,
    pub access_token: String,
    /// Absent on tokens obtained through the refresh grant.
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

impl AuthToken {
    /// Value for the `Authorization` header.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub page: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostList {
    pub posts: Vec<Post>,
}

/// Fields the client sends when creating or updating a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostStub {
    pub title: String,
    pub slug: Option<String>,
    pub status: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
    pub featured: bool,
}

impl PostStub {
    pub fn draft(title: &str, markdown: &str) -> Self {
        Self {
            title: title.to_string(),
            slug: None,
            status: "draft".to_string(),
            markdown: markdown.to_string(),
            tags: Vec::new(),
            featured: false,
        }
    }
}

impl From<&Post> for PostStub {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: (!post.slug.is_empty()).then(|| post.slug.clone()),
            status: post.status.clone(),
            markdown: post.markdown.clone().unwrap_or_default(),
            tags: post.tags.clone(),
            featured: post.featured,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostStubList {
    pub posts: Vec<PostStub>,
}

impl PostStubList {
    pub fn from_stub(stub: PostStub) -> Self {
        Self { posts: vec![stub] }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserList {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Setting {
    pub key: String,
    /// Ghost stores some settings as `null`.
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsList {
    pub settings: Vec<Setting>,
}

impl SettingsList {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|s| s.key == key)
            .and_then(|s| s.value.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigurationParam {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigurationList {
    pub configuration: Vec<ConfigurationParam>,
}

impl ConfigurationList {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.configuration
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.value.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct About {
    pub version: String,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AboutList {
    pub configuration: Vec<About>,
}

/// One entry of a Ghost error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorEntry {
    #[serde(rename = "errorType")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

/// `{"errors": [...]}` body Ghost sends with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorList {
    pub errors: Vec<ApiErrorEntry>,
}
