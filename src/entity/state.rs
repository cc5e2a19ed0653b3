//! Type-indexed state components with copy-on-insert
//!
//! Each actor owns one [`StateStore`] holding at most one component per
//! concrete type. Inserting always stores a clone of the argument, so a single
//! prototype component can seed any number of actors without aliasing.

use std::any::{Any, TypeId};
use std::fmt;

use ahash::AHashMap;

use crate::core::error::{ActorError, Result};

/// A typed bundle of actor state
///
/// `Clone` is the copy capability: the store never keeps the caller's value,
/// only an independent duplicate of it.
pub trait StateComponent: Any + Clone + Send + Sync + fmt::Debug {
    /// Human-readable kind name used in diagnostics
    const KIND: &'static str;
}

/// Object-safe view of a stored component
trait ErasedState: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_boxed(&self) -> Box<dyn ErasedState>;
    fn kind(&self) -> &'static str;
}

impl<S: StateComponent> ErasedState for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedState> {
        Box::new(self.clone())
    }

    fn kind(&self) -> &'static str {
        S::KIND
    }
}

/// One component per kind, owned exclusively by a single actor
#[derive(Debug, Default)]
pub struct StateStore {
    states: AHashMap<TypeId, Box<dyn ErasedState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            states: AHashMap::new(),
        }
    }

    /// Store a copy of `state`, replacing any component of the same kind
    pub fn add<S: StateComponent>(&mut self, state: &S) {
        self.states
            .insert(TypeId::of::<S>(), Box::new(state.clone()));
    }

    pub fn get<S: StateComponent>(&self) -> Result<&S> {
        self.try_get::<S>()
            .ok_or(ActorError::StateNotFound { kind: S::KIND })
    }

    pub fn get_mut<S: StateComponent>(&mut self) -> Result<&mut S> {
        self.states
            .get_mut(&TypeId::of::<S>())
            .and_then(|state| state.as_any_mut().downcast_mut::<S>())
            .ok_or(ActorError::StateNotFound { kind: S::KIND })
    }

    pub fn try_get<S: StateComponent>(&self) -> Option<&S> {
        self.states
            .get(&TypeId::of::<S>())
            .and_then(|state| state.as_any().downcast_ref::<S>())
    }

    pub fn contains<S: StateComponent>(&self) -> bool {
        self.states.contains_key(&TypeId::of::<S>())
    }

    /// Detach and return the component of kind `S`
    pub fn remove<S: StateComponent>(&mut self) -> Option<S> {
        let state = self.states.remove(&TypeId::of::<S>())?;
        state.into_any().downcast::<S>().ok().map(|state| *state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Kind names of every stored component, sorted
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.states.values().map(|state| state.kind()).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Clone for StateStore {
    fn clone(&self) -> Self {
        Self {
            states: self
                .states
                .iter()
                .map(|(id, state)| (*id, state.clone_boxed()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        value: i32,
        history: Vec<i32>,
    }

    impl StateComponent for Counter {
        const KIND: &'static str = "counter";
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Label(String);

    impl StateComponent for Label {
        const KIND: &'static str = "label";
    }

    #[test]
    fn test_add_stores_a_copy() {
        let mut store = StateStore::new();
        let mut prototype = Counter {
            value: 1,
            history: vec![1],
        };

        store.add(&prototype);
        prototype.value = 99;
        prototype.history.push(99);

        let stored = store.get::<Counter>().unwrap();
        assert_eq!(stored.value, 1);
        assert_eq!(stored.history, vec![1]);
    }

    #[test]
    fn test_mutating_stored_leaves_original() {
        let mut store = StateStore::new();
        let prototype = Counter {
            value: 1,
            history: vec![],
        };
        store.add(&prototype);

        store.get_mut::<Counter>().unwrap().history.push(5);

        assert!(prototype.history.is_empty());
        assert_eq!(store.get::<Counter>().unwrap().history, vec![5]);
    }

    #[test]
    fn test_second_add_replaces_first() {
        let mut store = StateStore::new();
        store.add(&Label("first".into()));
        store.add(&Label("second".into()));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get::<Label>().unwrap().0, "second");
    }

    #[test]
    fn test_missing_kind_is_an_error() {
        let mut store = StateStore::new();
        store.add(&Label("only".into()));

        assert!(matches!(
            store.get::<Counter>(),
            Err(ActorError::StateNotFound { kind: "counter" })
        ));
        assert!(store.get_mut::<Counter>().is_err());
        assert!(store.try_get::<Counter>().is_none());
        assert!(!store.contains::<Counter>());
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut store = StateStore::new();
        store.add(&Label("a".into()));
        store.add(&Counter {
            value: 3,
            history: vec![],
        });

        assert_eq!(store.len(), 2);
        assert_eq!(store.kinds(), vec!["counter", "label"]);
        assert_eq!(store.get::<Counter>().unwrap().value, 3);
        assert_eq!(store.get::<Label>().unwrap().0, "a");
    }

    #[test]
    fn test_remove_returns_component() {
        let mut store = StateStore::new();
        store.add(&Label("gone".into()));

        assert_eq!(store.remove::<Label>(), Some(Label("gone".into())));
        assert!(store.is_empty());
        assert_eq!(store.remove::<Label>(), None);
    }

    #[test]
    fn test_cloned_store_is_deep() {
        let mut store = StateStore::new();
        store.add(&Counter {
            value: 0,
            history: vec![],
        });

        let mut copy = store.clone();
        copy.get_mut::<Counter>().unwrap().history.push(1);

        assert!(store.get::<Counter>().unwrap().history.is_empty());
        assert_eq!(copy.get::<Counter>().unwrap().history, vec![1]);
    }
}
