//! Process-local todo service

use super::{ServiceError, ServiceFuture, TodoService};
use crate::types::{Todo, TodoId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by [`InMemoryTodoService`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceCall {
    /// `list()`
    List,
    /// `create(name)`
    Create(String),
    /// `update(todo)`
    Update(Todo),
    /// `destroy(id)`
    Destroy(TodoId),
}

/// Calls kept by [`InMemoryTodoService::calls`] unless configured otherwise
pub const DEFAULT_CALL_LOG_CAPACITY: usize = 256;

#[derive(Debug)]
struct Inner {
    todos: Vec<Todo>,
    /// `None` once every numeric id has been handed out
    next_id: Option<u64>,
    calls: VecDeque<ServiceCall>,
    call_log_capacity: usize,
    fail_with: Option<String>,
    latency: Option<Duration>,
}

/// In-memory todo service
///
/// Assigns numeric ids sequentially starting after the highest seeded numeric
/// id. Clones share the same storage, so a test can keep one handle while the
/// store owns another. Only the most recent calls are remembered (see
/// [`with_call_log_capacity`](Self::with_call_log_capacity)).
///
/// # Example
///
/// ```
/// use todos::service::{InMemoryTodoService, ServiceCall, TodoService};
///
/// # tokio_test::block_on(async {
/// let service = InMemoryTodoService::new();
/// let todo = service.create("Abc".to_string()).await.unwrap();
///
/// assert_eq!(todo.id.as_u64(), Some(1));
/// assert_eq!(service.calls(), vec![ServiceCall::Create("Abc".to_string())]);
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryTodoService {
    inner: Arc<Mutex<Inner>>,
}

impl Default for InMemoryTodoService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTodoService {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create a service already holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos
            .iter()
            .filter_map(|todo| todo.id.as_u64())
            .max()
            .map_or(Some(1), |highest| highest.checked_add(1));
        Self {
            inner: Arc::new(Mutex::new(Inner {
                todos,
                next_id,
                calls: VecDeque::new(),
                call_log_capacity: DEFAULT_CALL_LOG_CAPACITY,
                fail_with: None,
                latency: None,
            })),
        }
    }

    /// Remember at most `capacity` calls, dropping the oldest first
    #[must_use]
    pub fn with_call_log_capacity(self, capacity: usize) -> Self {
        {
            let mut inner = self.lock();
            inner.call_log_capacity = capacity;
            let excess = inner.calls.len().saturating_sub(capacity);
            inner.calls.drain(..excess);
        }
        self
    }

    /// Delay every response by `latency`
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = Some(latency);
        self
    }

    /// Make every following call fail with [`ServiceError::Unavailable`]
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.lock().fail_with = Some(reason.into());
    }

    /// Undo [`fail_with`](Self::fail_with)
    pub fn recover(&self) {
        self.lock().fail_with = None;
    }

    /// Most recent calls, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.iter().cloned().collect()
    }

    /// Todos currently stored
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and return the configured latency, or the configured failure
    fn begin(&self, call: ServiceCall) -> Result<Option<Duration>, ServiceError> {
        let mut inner = self.lock();
        if inner.call_log_capacity > 0 {
            if inner.calls.len() == inner.call_log_capacity {
                inner.calls.pop_front();
            }
            inner.calls.push_back(call);
        }
        match &inner.fail_with {
            Some(reason) => Err(ServiceError::Unavailable(reason.clone())),
            None => Ok(inner.latency),
        }
    }

    async fn respond<T>(
        &self,
        call: ServiceCall,
        apply: impl FnOnce(&mut Inner) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let latency = self.begin(call)?;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        apply(&mut self.lock())
    }
}

impl TodoService for InMemoryTodoService {
    fn list(&self) -> ServiceFuture<'_, Vec<Todo>> {
        Box::pin(self.respond(ServiceCall::List, |inner| Ok(inner.todos.clone())))
    }

    fn create(&self, name: String) -> ServiceFuture<'_, Todo> {
        Box::pin(self.respond(ServiceCall::Create(name.clone()), move |inner| {
            let id = inner
                .next_id
                .ok_or_else(|| ServiceError::Unavailable("todo ids exhausted".into()))?;
            inner.next_id = id.checked_add(1);
            let todo = Todo::new(id, name);
            inner.todos.push(todo.clone());
            Ok(todo)
        }))
    }

    fn update(&self, todo: Todo) -> ServiceFuture<'_, Todo> {
        Box::pin(self.respond(ServiceCall::Update(todo.clone()), move |inner| {
            let slot = inner
                .todos
                .iter_mut()
                .find(|stored| stored.id == todo.id)
                .ok_or_else(|| ServiceError::NotFound(todo.id.clone()))?;
            *slot = todo.clone();
            Ok(todo)
        }))
    }

    fn destroy(&self, id: TodoId) -> ServiceFuture<'_, ()> {
        Box::pin(self.respond(ServiceCall::Destroy(id.clone()), move |inner| {
            let before = inner.todos.len();
            inner.todos.retain(|todo| todo.id != id);
            if inner.todos.len() == before {
                Err(ServiceError::NotFound(id))
            } else {
                Ok(())
            }
        }))
    }
}
