/// Multi-select state for one result set.
///
/// Selection is stored either as the set of selected ids or, after a bulk
/// select-all, as the set of *un*selected ids against an implicit
/// "everything is selected" baseline of `item_count`. Memory use is bounded
/// by the number of ids the user has individually touched, never by the size
/// of the collection.
///
/// The engine is id-space agnostic: it accepts any id unconditionally and
/// never validates membership in the collection it describes. It is owned by
/// one view at a time and must be mutated from a single thread; listener
/// callbacks run synchronously on the caller's thread and must not block.
use std::collections::HashSet;

use crate::session::SessionId;

enum State {
    Inactive,
    Inclusive { selected: HashSet<SessionId> },
    Exclusive { unselected: HashSet<SessionId> },
}

pub type ActivenessListener = Box<dyn FnMut(bool)>;

pub struct SelectionEngine {
    item_count: usize,
    state: State,
    activeness_listeners: Vec<ActivenessListener>,
}

impl SelectionEngine {
    /// A fresh, inactive engine for a collection of `item_count` items.
    pub fn new(item_count: usize) -> Self {
        SelectionEngine {
            item_count,
            state: State::Inactive,
            activeness_listeners: Vec::new(),
        }
    }

    /// Registers a listener fired on every `Inactive` <-> active transition,
    /// never on intra-active changes. Listeners run synchronously, in
    /// registration order, before the triggering operation returns.
    pub fn add_activeness_listener(&mut self, listener: ActivenessListener) {
        self.activeness_listeners.push(listener);
    }

    fn notify_activeness(&mut self, active: bool) {
        for listener in self.activeness_listeners.iter_mut() {
            listener(active);
        }
    }

    /// Unconditionally marks `id` as selected and reports `true` through
    /// `on_changed`. Activates the engine if it was inactive; in that case
    /// the activeness listeners fire before `on_changed`. Idempotent on an
    /// already-selected id.
    pub fn long_click<F: FnOnce(bool)>(&mut self, id: SessionId, on_changed: F) {
        let activated = match &mut self.state {
            State::Inactive => {
                self.state = State::Inclusive {
                    selected: HashSet::from([id]),
                };
                true
            }
            State::Inclusive { selected } => {
                selected.insert(id);
                false
            }
            State::Exclusive { unselected } => {
                unselected.remove(&id);
                false
            }
        };
        if activated {
            self.notify_activeness(true);
        }
        on_changed(true);
    }

    /// Toggles `id` while a selection is in progress, reporting the new
    /// membership through `on_changed`. While inactive, calls `on_inactive`
    /// and changes nothing. Deselecting the last item (or, in exclusive
    /// mode, the last remaining selected item) deactivates the engine;
    /// `on_changed` fires before the activeness listeners in that case.
    pub fn click<F, G>(&mut self, id: SessionId, on_changed: F, on_inactive: G)
    where
        F: FnOnce(bool),
        G: FnOnce(),
    {
        match &mut self.state {
            State::Inactive => {
                on_inactive();
            }
            State::Inclusive { selected } => {
                let now_selected = if selected.contains(&id) {
                    selected.remove(&id);
                    false
                } else {
                    selected.insert(id);
                    true
                };
                let deactivated = selected.is_empty();
                if deactivated {
                    self.state = State::Inactive;
                }
                on_changed(now_selected);
                if deactivated {
                    self.notify_activeness(false);
                }
            }
            State::Exclusive { unselected } => {
                let now_selected = if unselected.contains(&id) {
                    unselected.remove(&id);
                    true
                } else {
                    unselected.insert(id);
                    false
                };
                let deactivated = unselected.len() >= self.item_count;
                if deactivated {
                    self.state = State::Inactive;
                }
                on_changed(now_selected);
                if deactivated {
                    self.notify_activeness(false);
                }
            }
        }
    }

    /// Selects every item by switching to the exclusive representation with
    /// an empty unselected set. Activates the engine if it was inactive;
    /// while already exclusive this only clears prior deselections.
    pub fn select_all(&mut self) {
        let was_inactive = matches!(self.state, State::Inactive);
        self.state = State::Exclusive {
            unselected: HashSet::new(),
        };
        if was_inactive {
            self.notify_activeness(true);
        }
    }

    /// Re-initializes the engine in place for a reloaded collection. Fires
    /// the activeness listeners with `false` only if a selection was in
    /// progress.
    pub fn reset(&mut self, item_count: usize) {
        let was_active = !matches!(self.state, State::Inactive);
        self.item_count = item_count;
        self.state = State::Inactive;
        if was_active {
            self.notify_activeness(false);
        }
    }

    /// Number of selected items, O(1) in every state.
    pub fn selected_count(&self) -> usize {
        match &self.state {
            State::Inactive => 0,
            State::Inclusive { selected } => selected.len(),
            State::Exclusive { unselected } => self.item_count.saturating_sub(unselected.len()),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Inactive)
    }

    pub fn is_selected(&self, id: SessionId) -> bool {
        match &self.state {
            State::Inactive => false,
            State::Inclusive { selected } => selected.contains(&id),
            State::Exclusive { unselected } => !unselected.contains(&id),
        }
    }

    /// Applies the selection to a concrete id universe, keeping the engine
    /// itself id-space agnostic.
    pub fn selected_from(&self, ids: impl IntoIterator<Item = SessionId>) -> Vec<SessionId> {
        ids.into_iter().filter(|id| self.is_selected(*id)).collect()
    }
}
