use std::fmt;
use std::sync::Arc;

use crate::state::AsyncSlice;
use crate::state::Value;

/// Opaque handler failure, shared between the rejection and any dispatched
/// FAILED notification.
#[derive(Clone, Debug)]
pub struct ActionError(Arc<anyhow::Error>);

impl ActionError {
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(anyhow::Error::msg(message)))
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Equal when both are the same propagated failure, not when they merely render
// the same message.
impl PartialEq for ActionError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Payload<V: Value> {
    Phase(AsyncSlice<V>),
    Value(Option<V>),
    Failure(ActionError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification<V: Value> {
    pub type_id: String,
    pub payload: Payload<V>,
}

impl<V: Value> Notification<V> {
    pub fn new(type_id: impl Into<String>, payload: Payload<V>) -> Self {
        Self {
            type_id: type_id.into(),
            payload,
        }
    }
}
