use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::notification::Notification;
use crate::state::Value;

/// Host-supplied dispatch seam. Notifications sent here are expected to reach
/// the reducing function registered with the same host.
pub trait Dispatch<V: Value>: Send + Sync {
    fn dispatch(&self, notification: Notification<V>);
}

impl<V, T> Dispatch<V> for Arc<T>
where
    V: Value,
    T: Dispatch<V> + ?Sized,
{
    fn dispatch(&self, notification: Notification<V>) {
        self.as_ref().dispatch(notification);
    }
}

/// Adapts hosts that feed notifications through a channel-driven loop.
pub struct ChannelDispatcher<V: Value> {
    sender: UnboundedSender<Notification<V>>,
}

impl<V: Value> ChannelDispatcher<V> {
    pub fn new(sender: UnboundedSender<Notification<V>>) -> Self {
        Self { sender }
    }
}

impl<V: Value> Dispatch<V> for ChannelDispatcher<V> {
    fn dispatch(&self, notification: Notification<V>) {
        self.sender.send(notification).unwrap();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::notification::Payload;

    #[tokio::test]
    async fn test_channel_dispatcher_forwards() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
        let dispatcher = ChannelDispatcher::new(sender);
        dispatcher.dispatch(Notification::new("PING", Payload::Value(Some(1))));

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.type_id, "PING");
        assert_eq!(received.payload, Payload::Value(Some(1)));
    }
}
