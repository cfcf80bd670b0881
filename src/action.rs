use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::action_id::action_id;
use crate::action_id::lifecycle_ids;
use crate::handler::Flags;
use crate::handler::Handler;
use crate::handler::HandlerFn;
use crate::notification::Notification;
use crate::notification::Payload;
use crate::state::AsyncSlice;
use crate::state::Value;
use crate::thunk::Outcome;
use crate::thunk::Thunk;

/// A dispatchable action creator: one handler plus its derived identifiers.
/// Invoking it yields a thunk; resolving the thunk emits the lifecycle
/// notifications the owning flags call for.
#[derive(Clone)]
pub struct ActionCreator<V: Value> {
    key: String,
    type_id: String,
    begin: String,
    success: String,
    failed: String,
    flags: Flags,
    handler: Arc<HandlerFn<V>>,
}

impl<V: Value> ActionCreator<V> {
    pub fn new(key: &str, type_id: &str, handler: Handler<V>) -> Self {
        let [begin, success, failed] = lifecycle_ids(type_id);
        Self {
            key: key.to_string(),
            type_id: type_id.to_string(),
            begin,
            success,
            failed,
            flags: handler.flags,
            handler: handler.func,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn begin(&self) -> &str {
        &self.begin
    }

    pub fn success(&self) -> &str {
        &self.success
    }

    pub fn failed(&self) -> &str {
        &self.failed
    }

    pub fn types(&self) -> [&str; 3] {
        [&self.begin, &self.success, &self.failed]
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_async(&self) -> bool {
        self.flags.is_async
    }

    pub fn is_pure(&self) -> bool {
        self.flags.is_pure
    }

    pub fn is_compose(&self) -> bool {
        self.flags.is_compose
    }

    pub fn invoke(&self, args: Vec<V>) -> Thunk<V> {
        let handler = self.handler.clone();
        let flags = self.flags;
        let type_id = self.type_id.clone();
        let begin = self.begin.clone();
        let success = self.success.clone();
        let failed = self.failed.clone();

        Thunk::new(move |context| async move {
            log::debug!("running action {}", type_id);
            if flags.is_async {
                context.dispatch(Notification::new(begin, Payload::Phase(AsyncSlice::begin())));
            }

            let result = match (*handler)(args).await {
                Ok(Outcome::Value(value)) => Ok(value),
                // A deferred result is resolved with the same context; its
                // failure flows into this invocation's failure path.
                Ok(Outcome::Deferred(inner)) => inner.resolve(context.clone()).await,
                Err(error) => Err(error),
            };

            match result {
                Ok(value) => {
                    if flags.is_async {
                        context.dispatch(Notification::new(
                            success,
                            Payload::Phase(AsyncSlice::success(value.clone())),
                        ));
                    }
                    if flags.is_pure || flags.is_compose {
                        context
                            .dispatch(Notification::new(type_id, Payload::Value(value.clone())));
                    }
                    Ok(Outcome::Value(value))
                }
                Err(error) => {
                    if flags.is_async {
                        context.dispatch(Notification::new(
                            failed,
                            Payload::Phase(AsyncSlice::failed(error.clone())),
                        ));
                    }
                    if flags.is_pure {
                        context.dispatch(Notification::new(type_id, Payload::Failure(error.clone())));
                    }
                    Err(error)
                }
            }
        })
    }
}

impl<V: Value> fmt::Display for ActionCreator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_id)
    }
}

impl<V: Value> fmt::Debug for ActionCreator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("key", &self.key)
            .field("type_id", &self.type_id)
            .field("flags", &self.flags)
            .finish()
    }
}

/// The decorated creators produced by [`create_actions`], keyed by name.
#[derive(Clone)]
pub struct Actions<V: Value> {
    map: HashMap<String, ActionCreator<V>>,
}

impl<V: Value> Actions<V> {
    pub fn get(&self, key: &str) -> Option<&ActionCreator<V>> {
        self.map.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActionCreator<V>)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

pub fn create_action<V: Value>(type_id: &str, handler: Handler<V>) -> ActionCreator<V> {
    ActionCreator::new(type_id, type_id, handler)
}

pub fn create_actions<V, K>(
    prefix: &str,
    handlers: impl IntoIterator<Item = (K, Handler<V>)>,
) -> Actions<V>
where
    V: Value,
    K: Into<String>,
{
    let map = handlers
        .into_iter()
        .map(|(key, handler)| {
            let key = key.into();
            let creator = ActionCreator::new(&key, &action_id(prefix, &key), handler);
            (key, creator)
        })
        .collect();
    Actions { map }
}
