use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::dispatcher::Dispatch;
use crate::notification::ActionError;
use crate::notification::Notification;
use crate::state::StoreState;
use crate::state::Value;
use crate::state_reader::ReadState;

pub type ActionResult<V> = Result<Option<V>, ActionError>;

pub type ThunkJob<V> =
    Box<dyn FnOnce(Context<V>) -> BoxFuture<'static, Result<Outcome<V>, ActionError>> + Send>;

pub enum Outcome<V: Value> {
    Value(Option<V>),
    Deferred(Thunk<V>),
}

impl<V: Value> Outcome<V> {
    pub fn value(value: V) -> Self {
        Outcome::Value(Some(value))
    }

    pub fn empty() -> Self {
        Outcome::Value(None)
    }

    pub fn defer(thunk: Thunk<V>) -> Self {
        Outcome::Deferred(thunk)
    }
}

impl<V: Value> std::fmt::Debug for Outcome<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.write_str(&format!("Value {:?}", value)),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// A unit of deferred work, executed with dispatch and state-read access.
pub struct Thunk<V: Value> {
    job: ThunkJob<V>,
}

impl<V: Value> Thunk<V> {
    pub fn new<T, Fut>(job: T) -> Self
    where
        T: FnOnce(Context<V>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Outcome<V>, ActionError>> + Send + 'static,
    {
        let boxed_job: ThunkJob<V> = Box::new(move |context| {
            let fut = job(context);
            Box::pin(fut)
        });
        Self { job: boxed_job }
    }

    /// Runs the job, unwrapping chained outcomes until a plain value remains.
    pub async fn resolve(self, context: Context<V>) -> ActionResult<V> {
        let mut job = self.job;
        loop {
            match job(context.clone()).await? {
                Outcome::Value(value) => return Ok(value),
                Outcome::Deferred(next) => job = next.job,
            }
        }
    }
}

/// The dispatch and state-read functions a host hands to every thunk.
#[derive(Clone)]
pub struct Context<V: Value> {
    dispatcher: Arc<dyn Dispatch<V>>,
    reader: Arc<dyn ReadState<V>>,
}

impl<V: Value> Context<V> {
    pub fn new(dispatcher: Arc<dyn Dispatch<V>>, reader: Arc<dyn ReadState<V>>) -> Self {
        Self { dispatcher, reader }
    }

    pub fn dispatch(&self, notification: Notification<V>) {
        self.dispatcher.dispatch(notification);
    }

    pub fn state(&self) -> Arc<StoreState<V>> {
        self.reader.read()
    }

    pub fn with_dispatcher(&self, dispatcher: Arc<dyn Dispatch<V>>) -> Self {
        Self {
            dispatcher,
            reader: self.reader.clone(),
        }
    }
}
