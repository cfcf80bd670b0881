use std::sync::Arc;

use crate::state::StoreState;
use crate::state::Value;

/// Host-supplied state access. Implementations hand out snapshots; reducers
/// never hold a live borrow into the container.
pub trait ReadState<V: Value>: Send + Sync {
    fn read(&self) -> Arc<StoreState<V>>;
}

impl<V, T> ReadState<V> for Arc<T>
where
    V: Value,
    T: ReadState<V> + ?Sized,
{
    fn read(&self) -> Arc<StoreState<V>> {
        self.as_ref().read()
    }
}
