//! # todo-store testing
//!
//! Testing utilities and helpers for the todo-store state layer.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Helpers for checking the effects a reducer returned
//! - [`effects`]: Run effect descriptions without a store and collect the
//!   actions they produce
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_testing::effects::collect_actions;
//!
//! #[tokio::test]
//! async fn fetch_loads_then_hides_loader() {
//!     let mut state = TodoState::default();
//!     let effects = TodoReducer::new().reduce(&mut state, fetch_todos(), &env);
//!
//!     let actions = collect_actions(effects).await;
//!     assert_eq!(actions, vec![load_todos(vec![]), hide_loader()]);
//! }
//! ```

/// Effect execution helpers for tests
pub mod effects {
    use futures::StreamExt;
    use todo_store_core::effect::Effect;

    /// Run a single effect to completion and return the actions it produced
    ///
    /// Produced actions are NOT reduced; feed them back yourself if a test
    /// needs the follow-up transitions.
    pub async fn run_effect<A>(effect: Effect<A>) -> Vec<A>
    where
        A: Send + 'static,
    {
        match effect {
            Effect::None => Vec::new(),
            Effect::Stream(stream) => stream.collect().await,
        }
    }

    /// Run every effect a reducer returned, one after another, and collect the
    /// produced actions in order
    pub async fn collect_actions<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut produced = Vec::new();
        for effect in effects {
            produced.extend(run_effect(effect).await);
        }
        produced
    }
}


// Re-export commonly used items
pub use effects::{collect_actions, run_effect};
pub use reducer_test::{assertions, ReducerTest};

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use todo_store_core::effect::Effect;

    #[derive(Clone, Debug, PartialEq)]
    enum Step {
        Started,
        Loaded(u32),
        Finished,
    }

    #[tokio::test]
    async fn collects_actions_from_every_effect_in_order() {
        let effects = vec![
            Effect::None,
            Effect::stream(stream::iter(vec![Step::Started])),
            Effect::stream(stream::iter(vec![Step::Loaded(1), Step::Loaded(2)])),
            Effect::stream(stream::empty()),
            Effect::stream(stream::iter(vec![Step::Finished])),
        ];

        let actions = collect_actions(effects).await;

        assert_eq!(
            actions,
            vec![Step::Started, Step::Loaded(1), Step::Loaded(2), Step::Finished]
        );
    }

    #[tokio::test]
    async fn none_produces_nothing() {
        assert!(run_effect(Effect::<Step>::None).await.is_empty());
        assert!(collect_actions(Vec::<Effect<Step>>::new()).await.is_empty());
    }
}
