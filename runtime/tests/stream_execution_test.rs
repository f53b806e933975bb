//! Integration tests for `Effect::Stream` execution in the Store runtime
//!
//! Streams are how multi-step async work (request, result, loading-flag reset)
//! is expressed, so ordering and completion tracking matter here.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use futures::stream;
use std::time::Duration;
use todo_store_core::{effect::Effect, reducer::Reducer, smallvec, stream_effect, SmallVec};
use todo_store_runtime::{Store, StoreError};

#[derive(Clone, Debug, Default, PartialEq)]
struct RequestState {
    received: Vec<String>,
    loading: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum RequestAction {
    /// Emit every item, then stop loading
    Start { items: Vec<String> },
    /// Wait before answering, to observe the in-flight state
    StartSlow { item: String, after: Duration },
    /// Start one stream per item from a single dispatch
    StartEach { items: Vec<String> },
    Item { text: String },
    Loading(bool),
}

#[derive(Clone)]
struct RequestReducer;

impl Reducer for RequestReducer {
    type State = RequestState;
    type Action = RequestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RequestAction::Start { items } => {
                state.loading = true;
                smallvec![Effect::Stream(Box::pin(stream::iter(
                    items
                        .into_iter()
                        .map(|text| RequestAction::Item { text })
                        .chain(std::iter::once(RequestAction::Loading(false))),
                )))]
            },
            RequestAction::StartSlow { item, after } => {
                state.loading = true;
                smallvec![stream_effect! {
                    tokio::time::sleep(after).await;
                    yield RequestAction::Item { text: item };
                    yield RequestAction::Loading(false);
                }]
            },
            RequestAction::StartEach { items } => items
                .into_iter()
                .enumerate()
                .map(|(idx, text)| {
                    // Earlier items wait longer, so they finish last.
                    let after = Duration::from_millis(25 * (3 - idx.min(3)) as u64);
                    stream_effect! {
                        tokio::time::sleep(after).await;
                        yield RequestAction::Item { text };
                    }
                })
                .collect(),
            RequestAction::Item { text } => {
                state.received.push(text);
                smallvec![Effect::None]
            },
            RequestAction::Loading(flag) => {
                state.loading = flag;
                smallvec![Effect::None]
            },
        }
    }
}

fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn stream_items_are_reduced_in_order() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    let mut handle = store
        .send(RequestAction::Start {
            items: items(&["item1", "item2", "item3"]),
        })
        .await
        .unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.received, items(&["item1", "item2", "item3"]));
    assert!(!state.loading);
}

#[tokio::test]
async fn empty_stream_still_runs_trailing_action() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    let mut handle = store.send(RequestAction::Start { items: vec![] }).await.unwrap();
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    assert!(state.received.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn state_is_loading_while_stream_is_in_flight() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    let mut handle = store
        .send(RequestAction::StartSlow {
            item: "late".to_string(),
            after: Duration::from_millis(50),
        })
        .await
        .unwrap();

    // The reducer ran synchronously inside send().
    assert!(store.state(|s| s.loading).await);
    assert!(handle.pending() > 0);

    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    let state = store.state(Clone::clone).await;
    assert_eq!(state.received, items(&["late"]));
    assert!(!state.loading);
}

#[tokio::test]
async fn other_dispatches_interleave_with_in_flight_stream() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    let mut slow = store
        .send(RequestAction::StartSlow {
            item: "slow".to_string(),
            after: Duration::from_millis(50),
        })
        .await
        .unwrap();
    store
        .send(RequestAction::Item {
            text: "typed meanwhile".to_string(),
        })
        .await
        .unwrap();

    slow.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    let received = store.state(|s| s.received.clone()).await;
    assert_eq!(received, items(&["typed meanwhile", "slow"]));
}

#[tokio::test]
async fn one_handle_covers_every_effect_of_a_dispatch() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    let mut handle = store
        .send(RequestAction::StartEach {
            items: items(&["a", "b", "c"]),
        })
        .await
        .unwrap();
    assert_eq!(handle.pending(), 3);
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let received = store.state(|s| s.received.clone()).await;
    assert_eq!(received, items(&["c", "b", "a"]));
}

#[tokio::test]
async fn shutdown_waits_for_streams_then_rejects_new_actions() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    store
        .send(RequestAction::StartSlow {
            item: "finishing".to_string(),
            after: Duration::from_millis(20),
        })
        .await
        .unwrap();

    store.shutdown(Duration::from_secs(1)).await.unwrap();
    assert_eq!(store.pending_effects(), 0);
    assert_eq!(store.state(|s| s.received.clone()).await, items(&["finishing"]));

    let rejected = store.send(RequestAction::Loading(true)).await;
    assert!(matches!(rejected, Err(StoreError::ShutdownInProgress)));
}

#[tokio::test]
async fn shutdown_times_out_on_stuck_stream() {
    let store = Store::new(RequestState::default(), RequestReducer, ());

    store
        .send(RequestAction::StartSlow {
            item: "never in time".to_string(),
            after: Duration::from_secs(10),
        })
        .await
        .unwrap();

    let result = store.shutdown(Duration::from_millis(30)).await;
    assert!(matches!(result, Err(StoreError::ShutdownTimeout(1))));
}
