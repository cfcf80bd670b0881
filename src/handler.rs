use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::notification::ActionError;
use crate::state::Value;
use crate::thunk::Outcome;

pub type HandlerFn<V> =
    dyn Fn(Vec<V>) -> BoxFuture<'static, Result<Outcome<V>, ActionError>> + Send + Sync;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub is_async: bool,
    pub is_pure: bool,
    pub is_compose: bool,
}

/// A caller-supplied unit of business logic plus its lifecycle flags.
/// Flags are non-exclusive; the async and pure/compose paths can both fire.
#[derive(Clone)]
pub struct Handler<V: Value> {
    pub(crate) func: Arc<HandlerFn<V>>,
    pub(crate) flags: Flags,
}

impl<V: Value> Handler<V> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<V>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome<V>, ActionError>> + Send + 'static,
    {
        let func: Arc<HandlerFn<V>> = Arc::new(move |args| {
            let fut = f(args);
            Box::pin(fut)
        });
        Self {
            func,
            flags: Flags::default(),
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn asynchronous(mut self) -> Self {
        self.flags.is_async = true;
        self
    }

    pub fn pure(mut self) -> Self {
        self.flags.is_pure = true;
        self
    }

    pub fn compose(mut self) -> Self {
        self.flags.is_compose = true;
        self
    }
}

pub fn asynchronous<V: Value>(handler: Handler<V>) -> Handler<V> {
    handler.asynchronous()
}

pub fn pure<V: Value>(handler: Handler<V>) -> Handler<V> {
    handler.pure()
}

pub fn compose<V: Value>(handler: Handler<V>) -> Handler<V> {
    handler.compose()
}

#[cfg(test)]
mod test {
    use super::*;

    fn noop() -> Handler<i32> {
        Handler::new(|_args| async { Ok(Outcome::empty()) })
    }

    #[test]
    fn test_flags_default_unset() {
        assert_eq!(noop().flags(), Flags::default());
    }

    #[test]
    fn test_flagging_helpers() {
        assert!(asynchronous(noop()).flags().is_async);
        assert!(pure(noop()).flags().is_pure);
        assert!(compose(noop()).flags().is_compose);
    }

    #[test]
    fn test_flags_combine() {
        let handler = asynchronous(pure(noop()));
        assert!(handler.flags().is_async);
        assert!(handler.flags().is_pure);
        assert!(!handler.flags().is_compose);
    }
}
