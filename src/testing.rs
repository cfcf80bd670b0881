//! In-memory hosts for exercising actions and reducers without an external
//! state container.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::dispatcher::Dispatch;
use crate::notification::Notification;
use crate::reducer::Reducer;
use crate::reducer::StoreReducer;
use crate::state::StoreState;
use crate::state::Value;
use crate::state_reader::ReadState;
use crate::thunk::ActionResult;
use crate::thunk::Context;
use crate::thunk::Thunk;

/// Collects every dispatched notification, in order.
pub struct RecordingDispatcher<V: Value> {
    notifications: Mutex<Vec<Notification<V>>>,
}

impl<V: Value> RecordingDispatcher<V> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            notifications: Mutex::new(Vec::new()),
        })
    }

    pub fn notifications(&self) -> Vec<Notification<V>> {
        self.notifications.lock().clone()
    }

    pub fn type_ids(&self) -> Vec<String> {
        self.notifications
            .lock()
            .iter()
            .map(|notification| notification.type_id.clone())
            .collect()
    }
}

impl<V: Value> Dispatch<V> for RecordingDispatcher<V> {
    fn dispatch(&self, notification: Notification<V>) {
        self.notifications.lock().push(notification);
    }
}

/// Serves a canned state snapshot.
pub struct FixedState<V: Value> {
    state: Arc<StoreState<V>>,
}

impl<V: Value> FixedState<V> {
    pub fn empty() -> Arc<Self> {
        Self::new(StoreState::new())
    }

    pub fn new(state: StoreState<V>) -> Arc<Self> {
        Arc::new(Self {
            state: Arc::new(state),
        })
    }
}

impl<V: Value> ReadState<V> for FixedState<V> {
    fn read(&self) -> Arc<StoreState<V>> {
        self.state.clone()
    }
}

/// A minimal host: applies a [`StoreReducer`] to every dispatched
/// notification and serves the resulting snapshots back to thunks.
pub struct TestStore<V: Value> {
    state: Mutex<Arc<StoreState<V>>>,
    log: Mutex<Vec<Notification<V>>>,
    reducer: StoreReducer<V>,
}

impl<V: Value> TestStore<V> {
    pub fn new(reducer: StoreReducer<V>) -> Arc<Self> {
        let state = reducer.initial();
        Arc::new(Self {
            state: Mutex::new(state),
            log: Mutex::new(Vec::new()),
            reducer,
        })
    }

    pub fn context(self: &Arc<Self>) -> Context<V> {
        Context::new(self.clone(), self.clone())
    }

    pub async fn run(self: &Arc<Self>, thunk: Thunk<V>) -> ActionResult<V> {
        thunk.resolve(self.context()).await
    }

    pub fn state(&self) -> Arc<StoreState<V>> {
        self.state.lock().clone()
    }

    pub fn notifications(&self) -> Vec<Notification<V>> {
        self.log.lock().clone()
    }
}

impl<V: Value> Dispatch<V> for TestStore<V> {
    fn dispatch(&self, notification: Notification<V>) {
        let mut state = self.state.lock();
        *state = self.reducer.reduce(Some(&*state), &notification);
        drop(state);
        self.log.lock().push(notification);
    }
}

impl<V: Value> ReadState<V> for TestStore<V> {
    fn read(&self) -> Arc<StoreState<V>> {
        self.state.lock().clone()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::action::create_actions;
    use crate::handler::asynchronous;
    use crate::handler::compose;
    use crate::handler::Handler;
    use crate::notification::ActionError;
    use crate::reducer::handle_actions;
    use crate::state::AsyncSlice;
    use crate::state::Slice;
    use crate::thunk::Outcome;

    #[tokio::test]
    async fn test_store_reflects_async_lifecycle() {
        let actions = create_actions(
            "user",
            vec![(
                "fetchUser",
                asynchronous(Handler::new(|_args: Vec<i32>| async {
                    Ok(Outcome::value(7))
                })),
            )],
        );
        let store = TestStore::new(handle_actions(&actions, HashMap::new(), StoreState::new()));

        let creator = actions.get("fetchUser").unwrap();
        let result = store.run(creator.invoke(Vec::new())).await.unwrap();
        assert_eq!(result, Some(7));

        assert_eq!(
            store.state().get("fetchUser"),
            Some(&Slice::Async(AsyncSlice::success(Some(7))))
        );
        assert_eq!(store.notifications().len(), 2);
    }

    #[tokio::test]
    async fn test_store_keeps_failure_in_state() {
        let actions = create_actions(
            "user",
            vec![(
                "fetchUser",
                asynchronous(Handler::new(|_args: Vec<i32>| async {
                    Err(ActionError::msg("offline"))
                })),
            )],
        );
        let store = TestStore::new(handle_actions(&actions, HashMap::new(), StoreState::new()));

        let creator = actions.get("fetchUser").unwrap();
        let error = store.run(creator.invoke(Vec::new())).await.unwrap_err();

        let state = store.state();
        let slice = state.get("fetchUser").unwrap().as_async().unwrap();
        assert!(!slice.loading);
        assert_eq!(slice.error, Some(error));
    }

    #[tokio::test]
    async fn test_thunks_observe_reduced_state() {
        let actions = create_actions(
            "report",
            vec![(
                "countSlices",
                compose(Handler::new(|_args: Vec<i32>| async {
                    Ok(Outcome::defer(Thunk::new(|context: Context<i32>| async move {
                        Ok(Outcome::value(context.state().len() as i32))
                    })))
                })),
            )],
        );
        let store = TestStore::new(handle_actions(&actions, HashMap::new(), StoreState::new()));

        let creator = actions.get("countSlices").unwrap();
        let result = store.run(creator.invoke(Vec::new())).await.unwrap();
        assert_eq!(result, Some(1));
        assert_eq!(
            store.state().get("countSlices"),
            Some(&Slice::Pure(Some(1)))
        );
    }
}
