//! Users API client port and its `reqwest` adapter.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::define_port_error;
use crate::domain::{User, UserId};

const USERS_PATH: &str = "/api/users";

define_port_error! {
    /// Failures observed by the client when calling the users API.
    pub enum UsersApiError {
        /// The server answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "server rejected request with status {status}: {message}",
        /// The request never produced a response.
        Transport { message: String } => "users API unreachable: {message}",
        /// A success response carried an unexpected body.
        Decode { message: String } => "users API response could not be decoded: {message}",
    }
}

impl UsersApiError {
    /// Human readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Raw form values sent to the server. Validation is left to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

/// Client view of the users REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// `GET /api/users`
    async fn list_users(&self) -> Result<Vec<User>, UsersApiError>;

    /// `POST /api/users`
    async fn create_user(&self, payload: &UserPayload) -> Result<User, UsersApiError>;

    /// `PUT /api/users/{id}`
    async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<User, UsersApiError>;

    /// `DELETE /api/users/{id}`
    async fn delete_user(&self, id: UserId) -> Result<(), UsersApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// [`UsersApi`] over HTTP.
///
/// # Examples
/// ```
/// use user_directory::client::HttpUsersApi;
///
/// let api = HttpUsersApi::new("http://127.0.0.1:8080/");
/// assert_eq!(api.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone)]
pub struct HttpUsersApi {
    client: Client,
    base_url: String,
}

impl HttpUsersApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Reuse an existing `reqwest` client (connection pool, proxies).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{USERS_PATH}", self.base_url)
    }

    fn item_url(&self, id: UserId) -> String {
        format!("{}{USERS_PATH}/{id}", self.base_url)
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Response, UsersApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| UsersApiError::transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // A missing or non-JSON body leaves the caller to pick its fallback.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_default();
        debug!(status = status.as_u16(), %message, "users API rejected request");
        Err(UsersApiError::rejected(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, UsersApiError> {
        response
            .json::<T>()
            .await
            .map_err(|err| UsersApiError::decode(err.to_string()))
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, UsersApiError> {
        let response = Self::send(self.client.get(self.collection_url())).await?;
        Self::decode(response).await
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User, UsersApiError> {
        let response = Self::send(self.client.post(self.collection_url()).json(payload)).await?;
        Self::decode(response).await
    }

    async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<User, UsersApiError> {
        let response = Self::send(self.client.put(self.item_url(id)).json(payload)).await?;
        Self::decode(response).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UsersApiError> {
        Self::send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}
