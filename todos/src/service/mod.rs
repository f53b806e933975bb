//! Remote todo service.
//!
//! The [`TodoService`] trait is what thunks talk to. Two implementations ship
//! with the crate:
//!
//! - [`HttpTodoService`]: JSON over HTTP against a REST collection
//! - [`InMemoryTodoService`]: Process-local, records every call and can be
//!   told to fail, for tests and offline demos
//!
//! # Dyn Compatibility
//!
//! The trait returns `Pin<Box<dyn Future>>` instead of using `async fn` so it
//! can live in the environment as `Arc<dyn TodoService>` and be moved into the
//! effects the reducer returns.

use crate::types::{Todo, TodoId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

mod http;
mod memory;

pub use http::HttpTodoService;
pub use memory::{InMemoryTodoService, ServiceCall, DEFAULT_CALL_LOG_CAPACITY};

/// Boxed future returned by every [`TodoService`] operation
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'a>>;

/// Errors that can occur while talking to the todo service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never got a response (connection refused, timeout, ...)
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status
    #[error("service responded with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The todo does not exist on the service
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The service refused to serve the request
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Operations the remote todo service offers
pub trait TodoService: Send + Sync {
    /// Load every todo, in service order
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`] raised by the transport or the service.
    fn list(&self) -> ServiceFuture<'_, Vec<Todo>>;

    /// Create an incomplete todo; the service assigns the id
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`] raised by the transport or the service.
    fn create(&self, name: String) -> ServiceFuture<'_, Todo>;

    /// Replace the todo with the same id and return the stored version
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if no todo has this id, or any transport error.
    fn update(&self, todo: Todo) -> ServiceFuture<'_, Todo>;

    /// Delete a todo
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if no todo has this id, or any transport error.
    fn destroy(&self, id: TodoId) -> ServiceFuture<'_, ()>;
}
