//! # Todo REST client
//!
//! [`TodoClient`] issues authenticated requests against the todo resource.
//! Every operation follows the same steps:
//!
//! 1. Ask the [`SessionProvider`] for the current session. Without one the
//!    operation fails with [`ApiError::AuthRequired`] before any request is
//!    sent.
//! 2. Send the request with `Authorization: <id token>` (and
//!    `Content-Type: application/json` on everything but `DELETE`).
//! 3. On a non-2xx status, read `message` from the JSON error body and fail
//!    with [`ApiError::Request`].
//! 4. On success, decode the body when the operation returns data.
//!
//! | Method | Request |
//! |--------|---------|
//! | [`list`](TodoClient::list) | `GET {base}` |
//! | [`create`](TodoClient::create) | `POST {base}` `{"task"}` |
//! | [`update`](TodoClient::update) | `PUT {base}/{id}` `{"completed": !completed}` |
//! | [`rename`](TodoClient::rename) | `PUT {base}/{id}` `{"task"}` |
//! | [`delete`](TodoClient::delete) | `DELETE {base}/{id}` |
//!
//! `{id}` is percent-encoded as a single path segment.
//!
//! The client keeps no list of its own. Refreshing after a mutation is the
//! caller's job.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use store::Todo;

use crate::auth::SessionProvider;
use crate::error::{ApiError, UNKNOWN_ERROR};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

const JSON: &str = "application/json";

/// Authenticated client for the todo resource.
#[derive(Clone, Debug)]
pub struct TodoClient<P, T> {
    base_url: String,
    session: P,
    transport: T,
}

impl<P: SessionProvider, T: Transport> TodoClient<P, T> {
    pub fn new(base_url: &str, session: P, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session provider this client takes its tokens from.
    pub fn session(&self) -> &P {
        &self.session
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }

    async fn authorization(&self) -> Result<String, ApiError> {
        match self.session.current_session().await {
            Ok(session) => Ok(session.authorization().to_string()),
            Err(e) => {
                tracing::error!("Authentication required: {}", e);
                Err(ApiError::AuthRequired)
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let token = self.authorization().await?;

        let mut request = HttpRequest::new(method, url);
        if method != Method::Delete {
            request = request.header("Content-Type", JSON);
        }
        request = request.header("Authorization", token);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = request_error(&response);
            tracing::warn!("{:?} {} failed: {}", method, self.base_url, err);
            return Err(err);
        }
        Ok(response)
    }

    fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch every todo, in the order the server returns them.
    pub async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .execute(Method::Get, self.base_url.clone(), None)
            .await?;
        Self::decode(&response)
    }

    /// Create a todo. Blank tasks are rejected without a request.
    pub async fn create(&self, task: &str) -> Result<(), ApiError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(ApiError::EmptyTask);
        }
        self.execute(
            Method::Post,
            self.base_url.clone(),
            Some(json!({ "task": task })),
        )
        .await?;
        Ok(())
    }

    /// Toggle a todo: the server receives the negation of `completed`.
    pub async fn update(&self, id: &str, completed: bool) -> Result<(), ApiError> {
        self.execute(
            Method::Put,
            self.item_url(id),
            Some(json!({ "completed": !completed })),
        )
        .await?;
        Ok(())
    }

    /// Replace the task text of a todo.
    pub async fn rename(&self, id: &str, task: &str) -> Result<(), ApiError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(ApiError::EmptyTask);
        }
        self.execute(Method::Put, self.item_url(id), Some(json!({ "task": task })))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.execute(Method::Delete, self.item_url(id), None).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`ApiError::Request`].
fn request_error(response: &HttpResponse) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    let message = match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => response.reason().unwrap_or(UNKNOWN_ERROR).to_string(),
        Err(_) => UNKNOWN_ERROR.to_string(),
    };
    ApiError::Request {
        status: response.status,
        message,
    }
}
