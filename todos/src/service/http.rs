//! JSON-over-HTTP todo service

use super::{ServiceError, ServiceFuture, TodoService};
use crate::types::{NewTodo, Todo, TodoId};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Todo service backed by a REST collection
///
/// | Operation | Request |
/// |---|---|
/// | list | `GET {base}` |
/// | create | `POST {base}` with `{"name", "isComplete": false}` |
/// | update | `PUT {base}/{id}` with the full todo |
/// | destroy | `DELETE {base}/{id}` |
#[derive(Clone, Debug)]
pub struct HttpTodoService {
    client: Client,
    base_url: String,
}

impl HttpTodoService {
    /// Create a service with reqwest's default client settings
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Request`] if the HTTP client cannot be built,
    /// for example when the TLS backend fails to initialise.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::build(base_url.into(), Client::builder())
    }

    /// Create a service whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Request`] if the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        Self::build(base_url.into(), Client::builder().timeout(timeout))
    }

    fn build(base_url: String, builder: ClientBuilder) -> Result<Self, ServiceError> {
        let client = builder
            .build()
            .map_err(|e| ServiceError::Request(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize(base_url),
        })
    }

    /// Collection URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, ServiceError> {
        tracing::debug!(url = %self.base_url, "GET todos");
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        decode(response, None).await
    }

    async fn create_todo(&self, name: String) -> Result<Todo, ServiceError> {
        tracing::debug!(url = %self.base_url, %name, "POST todo");
        let response = self
            .client
            .post(&self.base_url)
            .json(&NewTodo::new(name))
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        decode(response, None).await
    }

    async fn update_todo(&self, todo: Todo) -> Result<Todo, ServiceError> {
        let id = todo.id.clone();
        let url = self.item_url(&id);
        tracing::debug!(%url, is_complete = todo.is_complete, "PUT todo");
        let response = self
            .client
            .put(&url)
            .json(&todo)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        decode(response, Some(id)).await
    }

    async fn destroy_todo(&self, id: TodoId) -> Result<(), ServiceError> {
        let url = self.item_url(&id);
        tracing::debug!(%url, "DELETE todo");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        check_status(response, Some(id)).await.map(|_| ())
    }
}

impl TodoService for HttpTodoService {
    fn list(&self) -> ServiceFuture<'_, Vec<Todo>> {
        Box::pin(self.list_todos())
    }

    fn create(&self, name: String) -> ServiceFuture<'_, Todo> {
        Box::pin(self.create_todo(name))
    }

    fn update(&self, todo: Todo) -> ServiceFuture<'_, Todo> {
        Box::pin(self.update_todo(todo))
    }

    fn destroy(&self, id: TodoId) -> ServiceFuture<'_, ()> {
        Box::pin(self.destroy_todo(id))
    }
}

fn normalize(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Map non-success statuses to errors; 404 on an item becomes `NotFound`
async fn check_status(response: Response, id: Option<TodoId>) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ServiceError::NotFound(id));
    }

    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response, id: Option<TodoId>) -> Result<T, ServiceError> {
    check_status(response, id)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))
}
