use std::collections::HashMap;
use std::sync::Arc;

use crate::action::ActionCreator;
use crate::dispatcher::Dispatch;
use crate::notification::Notification;
use crate::state::Value;

/// Applies a transform to every notification before forwarding it to the
/// parent dispatcher.
pub struct DispatchMapper<V, F>
where
    V: Value,
    F: Fn(Notification<V>) -> Notification<V> + Send + Sync + 'static,
{
    parent: Arc<dyn Dispatch<V>>,
    map: F,
}

impl<V, F> DispatchMapper<V, F>
where
    V: Value,
    F: Fn(Notification<V>) -> Notification<V> + Send + Sync + 'static,
{
    pub fn new(parent: Arc<dyn Dispatch<V>>, map: F) -> Self {
        Self { parent, map }
    }
}

impl<V, F> Dispatch<V> for DispatchMapper<V, F>
where
    V: Value,
    F: Fn(Notification<V>) -> Notification<V> + Send + Sync + 'static,
{
    fn dispatch(&self, notification: Notification<V>) {
        let mapped = (self.map)(notification);
        self.parent.dispatch(mapped);
    }
}

/// Rewrites one creator's identifiers into another's, so a composed inner
/// action feeds the outer action's slice.
pub fn rekey<V: Value>(
    parent: Arc<dyn Dispatch<V>>,
    from: &ActionCreator<V>,
    to: &ActionCreator<V>,
) -> DispatchMapper<V, impl Fn(Notification<V>) -> Notification<V> + Send + Sync + 'static> {
    let mut table = HashMap::new();
    table.insert(from.type_id().to_string(), to.type_id().to_string());
    table.insert(from.begin().to_string(), to.begin().to_string());
    table.insert(from.success().to_string(), to.success().to_string());
    table.insert(from.failed().to_string(), to.failed().to_string());

    DispatchMapper::new(parent, move |mut notification: Notification<V>| {
        if let Some(mapped) = table.get(&notification.type_id) {
            notification.type_id = mapped.clone();
        }
        notification
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::create_action;
    use crate::handler::asynchronous;
    use crate::handler::Handler;
    use crate::notification::Payload;
    use crate::testing::FixedState;
    use crate::testing::RecordingDispatcher;
    use crate::thunk::Context;
    use crate::thunk::Outcome;

    #[tokio::test]
    async fn test_map_is_applied_before_forwarding() {
        let recorder = RecordingDispatcher::new();
        let mapper = DispatchMapper::new(recorder.clone(), |mut notification: Notification<i32>| {
            notification.type_id = format!("MAPPED_{}", notification.type_id);
            notification
        });

        mapper.dispatch(Notification::new("PING", Payload::Value(Some(1))));
        assert_eq!(recorder.type_ids(), vec!["MAPPED_PING"]);
    }

    #[tokio::test]
    async fn test_rekey_routes_inner_lifecycle_to_outer_ids() {
        let outer = create_action(
            "OUTER",
            asynchronous(Handler::new(|_args: Vec<i32>| async {
                Ok(Outcome::empty())
            })),
        );
        let inner = create_action(
            "INNER",
            asynchronous(Handler::new(|_args: Vec<i32>| async {
                Ok(Outcome::value(3))
            })),
        );

        let recorder = RecordingDispatcher::new();
        let mapper: Arc<dyn Dispatch<i32>> = Arc::new(rekey(recorder.clone(), &inner, &outer));
        let context = Context::new(mapper, FixedState::empty());

        inner.invoke(Vec::new()).resolve(context).await.unwrap();
        assert_eq!(recorder.type_ids(), vec!["OUTER_BEGIN", "OUTER_SUCCESS"]);
    }

    #[tokio::test]
    async fn test_unrelated_ids_pass_through() {
        let outer = create_action(
            "OUTER",
            asynchronous(Handler::new(|_args: Vec<i32>| async {
                Ok(Outcome::empty())
            })),
        );
        let inner = create_action(
            "INNER",
            asynchronous(Handler::new(|_args: Vec<i32>| async {
                Ok(Outcome::empty())
            })),
        );

        let recorder = RecordingDispatcher::new();
        let mapper = rekey(recorder.clone(), &inner, &outer);
        mapper.dispatch(Notification::new("UNRELATED", Payload::Value(None)));
        assert_eq!(recorder.type_ids(), vec!["UNRELATED"]);
    }
}
