//! Macro for writing stream effects as straight-line async code

#[doc(hidden)]
pub use async_stream as __async_stream;

/// Create an `Effect::Stream` from an `async_stream::stream!` body
///
/// Every `yield` produces an action that the store reduces before the body
/// resumes.
///
/// # Example
///
/// ```rust,ignore
/// use todo_store_core::stream_effect;
///
/// stream_effect! {
///     match service.list().await {
///         Ok(todos) => yield TodoAction::LoadTodos(todos),
///         Err(error) => yield TodoAction::RequestFailed(error.to_string()),
///     }
///     yield TodoAction::HideLoader(false);
/// }
/// ```
#[macro_export]
macro_rules! stream_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Stream(::std::boxed::Box::pin(
            $crate::effect_macros::__async_stream::stream! { $($body)* }
        ))
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use futures::StreamExt;

    #[derive(Clone, Debug, PartialEq)]
    enum Fetch {
        Loaded(u32),
        Failed(String),
        Idle,
    }

    fn collect(effect: Effect<Fetch>) -> Vec<Fetch> {
        let Effect::Stream(stream) = effect else {
            unreachable!("stream_effect! always builds Effect::Stream");
        };
        tokio_test::block_on(stream.collect())
    }

    #[test]
    fn yields_in_order() {
        let effect = stream_effect! {
            yield Fetch::Loaded(1);
            yield Fetch::Idle;
        };

        assert_eq!(collect(effect), vec![Fetch::Loaded(1), Fetch::Idle]);
    }

    #[test]
    fn awaits_between_yields() {
        let answer: Result<u32, String> = Err("offline".to_string());
        let effect = stream_effect! {
            let answer = async { answer }.await;
            match answer {
                Ok(count) => yield Fetch::Loaded(count),
                Err(reason) => yield Fetch::Failed(reason),
            }
            yield Fetch::Idle;
        };

        assert_eq!(
            collect(effect),
            vec![Fetch::Failed("offline".to_string()), Fetch::Idle]
        );
    }
}
