use std::collections::HashMap;
use std::fmt::Debug;

use crate::notification::ActionError;

pub trait Value: Clone + Debug + Send + Sync + 'static {}

impl<T: Clone + Debug + Send + Sync + 'static> Value for T {}

/// Whole-store state, keyed by handler name.
pub type StoreState<V> = HashMap<String, Slice<V>>;

#[derive(Clone, Debug, PartialEq)]
pub struct AsyncSlice<V: Value> {
    pub loaded: bool,
    pub loading: bool,
    pub data: Option<V>,
    pub error: Option<ActionError>,
}

impl<V: Value> AsyncSlice<V> {
    pub fn begin() -> Self {
        Self {
            loaded: false,
            loading: true,
            data: None,
            error: None,
        }
    }

    pub fn success(data: Option<V>) -> Self {
        Self {
            loaded: true,
            loading: false,
            data,
            error: None,
        }
    }

    pub fn failed(error: ActionError) -> Self {
        Self {
            loaded: true,
            loading: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<V: Value> Default for AsyncSlice<V> {
    fn default() -> Self {
        Self {
            loaded: false,
            loading: false,
            data: None,
            error: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Slice<V: Value> {
    Async(AsyncSlice<V>),
    Pure(Option<V>),
    Failed(ActionError),
}

impl<V: Value> Slice<V> {
    pub fn loaded(&self) -> bool {
        matches!(self, Slice::Async(slice) if slice.loaded)
    }

    pub fn as_async(&self) -> Option<&AsyncSlice<V>> {
        match self {
            Slice::Async(slice) => Some(slice),
            _ => None,
        }
    }
}
