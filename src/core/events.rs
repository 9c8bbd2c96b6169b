use crate::domain::model::ElementId;
use crate::domain::selector::ElementTree;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

/// Event listeners keyed by element, each holding a plain action value
/// instead of a closure.
#[derive(Debug, Clone)]
pub struct ListenerTable<A> {
    listeners: HashMap<(ElementId, EventKind), Vec<A>>,
}

impl<A> Default for ListenerTable<A> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<A: Clone> ListenerTable<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, el: ElementId, kind: EventKind, action: A) {
        self.listeners.entry((el, kind)).or_default().push(action);
    }

    pub fn listeners(&self, el: ElementId, kind: EventKind) -> &[A] {
        self.listeners
            .get(&(el, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Actions to run for an event on `target`, bubbling from the target up to
    /// the root. Each element's listeners run in registration order.
    pub fn propagation<T: ElementTree + ?Sized>(
        &self,
        tree: &T,
        target: ElementId,
        kind: EventKind,
    ) -> Vec<(ElementId, A)> {
        let mut actions = Vec::new();
        let mut cursor = Some(target);
        while let Some(el) = cursor {
            actions.extend(self.listeners(el, kind).iter().cloned().map(|a| (el, a)));
            cursor = tree.parent(el);
        }
        actions
    }
}
