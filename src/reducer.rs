use std::collections::HashMap;
use std::sync::Arc;

use crate::action::ActionCreator;
use crate::action::Actions;
use crate::notification::Notification;
use crate::notification::Payload;
use crate::state::AsyncSlice;
use crate::state::Slice;
use crate::state::StoreState;
use crate::state::Value;

/// The reducing seam handed to the host container. Reducers compute fresh
/// snapshots; an unrecognized notification returns the incoming allocation
/// untouched.
pub trait Reducer {
    type State;
    type Value: Value;

    fn initial(&self) -> Arc<Self::State>;

    fn reduce(
        &self,
        state: Option<&Arc<Self::State>>,
        notification: &Notification<Self::Value>,
    ) -> Arc<Self::State>;
}

#[derive(Clone, Copy)]
enum RuleKind {
    Lifecycle,
    Replace,
}

struct Rule {
    key: String,
    kind: RuleKind,
}

pub type StoreOverride<V> =
    Box<dyn Fn(&StoreState<V>, &Notification<V>) -> StoreState<V> + Send + Sync>;

pub type SliceOverride<V> = Box<dyn Fn(&Slice<V>, &Notification<V>) -> Slice<V> + Send + Sync>;

fn register<V: Value>(creator: &ActionCreator<V>, rules: &mut HashMap<String, Rule>) {
    if creator.is_async() {
        for id in creator.types() {
            rules.insert(
                id.to_string(),
                Rule {
                    key: creator.key().to_string(),
                    kind: RuleKind::Lifecycle,
                },
            );
        }
    }
    if creator.is_pure() || creator.is_compose() {
        rules.insert(
            creator.type_id().to_string(),
            Rule {
                key: creator.key().to_string(),
                kind: RuleKind::Replace,
            },
        );
    }
}

fn default_slice<V: Value>(creator: &ActionCreator<V>) -> Option<Slice<V>> {
    if creator.is_async() {
        Some(Slice::Async(AsyncSlice::default()))
    } else if creator.is_pure() || creator.is_compose() {
        Some(Slice::Pure(None))
    } else {
        None
    }
}

fn next_slice<V: Value>(
    kind: RuleKind,
    previous: Option<&Slice<V>>,
    notification: &Notification<V>,
) -> Option<Slice<V>> {
    match kind {
        RuleKind::Lifecycle => match &notification.payload {
            Payload::Phase(phase) => {
                let was_loaded = previous.map_or(false, Slice::loaded);
                let mut slice = phase.clone();
                // `loaded` is monotonic: once a slice has loaded it stays
                // loaded, including across FAILED and a later BEGIN.
                slice.loaded = was_loaded || phase.loaded;
                Some(Slice::Async(slice))
            }
            payload => {
                log::warn!(
                    "lifecycle notification {} carried a non-phase payload: {:?}",
                    notification.type_id,
                    payload
                );
                None
            }
        },
        RuleKind::Replace => match &notification.payload {
            Payload::Value(value) => Some(Slice::Pure(value.clone())),
            Payload::Failure(error) => Some(Slice::Failed(error.clone())),
            payload => {
                log::warn!(
                    "notification {} carried a phase payload for a non-lifecycle rule: {:?}",
                    notification.type_id,
                    payload
                );
                None
            }
        },
    }
}

/// Reduces the whole name-keyed state map produced by a set of creators.
pub struct StoreReducer<V: Value> {
    rules: HashMap<String, Rule>,
    overrides: HashMap<String, StoreOverride<V>>,
    initial: Arc<StoreState<V>>,
}

pub fn handle_actions<V: Value>(
    actions: &Actions<V>,
    overrides: HashMap<String, StoreOverride<V>>,
    initial_state: StoreState<V>,
) -> StoreReducer<V> {
    let mut rules = HashMap::new();
    let mut initial = initial_state;
    for (key, creator) in actions.iter() {
        register(creator, &mut rules);
        if !initial.contains_key(key) {
            if let Some(slice) = default_slice(creator) {
                initial.insert(key.clone(), slice);
            }
        }
    }
    StoreReducer {
        rules,
        overrides,
        initial: Arc::new(initial),
    }
}

impl<V: Value> Reducer for StoreReducer<V> {
    type State = StoreState<V>;
    type Value = V;

    fn initial(&self) -> Arc<StoreState<V>> {
        self.initial.clone()
    }

    fn reduce(
        &self,
        state: Option<&Arc<StoreState<V>>>,
        notification: &Notification<V>,
    ) -> Arc<StoreState<V>> {
        let current = state.unwrap_or(&self.initial);
        let rule = match self.rules.get(&notification.type_id) {
            Some(rule) => rule,
            None => return current.clone(),
        };
        if let Some(explicit) = self.overrides.get(&notification.type_id) {
            return Arc::new(explicit(current, notification));
        }
        match next_slice(rule.kind, current.get(&rule.key), notification) {
            Some(slice) => {
                let mut next = (**current).clone();
                next.insert(rule.key.clone(), slice);
                Arc::new(next)
            }
            None => current.clone(),
        }
    }
}

/// Reduces a bare slice for a single creator; the slice is the whole state.
pub struct SliceReducer<V: Value> {
    rules: HashMap<String, Rule>,
    overrides: HashMap<String, SliceOverride<V>>,
    initial: Arc<Slice<V>>,
}

pub fn handle_action<V: Value>(
    creator: &ActionCreator<V>,
    overrides: HashMap<String, SliceOverride<V>>,
    initial: Option<Slice<V>>,
) -> SliceReducer<V> {
    let mut rules = HashMap::new();
    register(creator, &mut rules);
    let initial = initial
        .or_else(|| default_slice(creator))
        .unwrap_or(Slice::Pure(None));
    SliceReducer {
        rules,
        overrides,
        initial: Arc::new(initial),
    }
}

impl<V: Value> Reducer for SliceReducer<V> {
    type State = Slice<V>;
    type Value = V;

    fn initial(&self) -> Arc<Slice<V>> {
        self.initial.clone()
    }

    fn reduce(
        &self,
        state: Option<&Arc<Slice<V>>>,
        notification: &Notification<V>,
    ) -> Arc<Slice<V>> {
        let current = state.unwrap_or(&self.initial);
        let rule = match self.rules.get(&notification.type_id) {
            Some(rule) => rule,
            None => return current.clone(),
        };
        if let Some(explicit) = self.overrides.get(&notification.type_id) {
            return Arc::new(explicit(current, notification));
        }
        match next_slice(rule.kind, Some(current.as_ref()), notification) {
            Some(slice) => Arc::new(slice),
            None => current.clone(),
        }
    }
}
