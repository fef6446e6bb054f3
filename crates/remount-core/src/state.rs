use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::hooks::{HooksContext, Rerender, SlotTable};

/// Updater handle for a `use_state` slot.
///
/// Every write triggers a full re-render before returning, including writes
/// of a value equal to the current one.
pub struct StateCell<T> {
    table: Rc<SlotTable>,
    index: usize,
    scheduler: Weak<dyn Rerender>,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            index: self.index,
            scheduler: self.scheduler.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell").field("slot", &self.index).finish()
    }
}

/// Either a replacement value or a function of the previous value.
pub enum Update<T> {
    Replace(T),
    With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Replace(value)
    }
}

impl<T: Clone + 'static> StateCell<T> {
    /// Current value of the slot, which may be newer than the value returned
    /// by `use_state` during the pass that created this handle.
    pub fn get(&self) -> T {
        self.table
            .get::<T>(self.index)
            .unwrap_or_else(|| unreachable!("state slot {} holds another type", self.index))
    }

    pub fn set(&self, value: T) {
        self.apply(Update::Replace(value));
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.apply(Update::With(Box::new(f)));
    }

    pub fn apply(&self, update: Update<T>) {
        let next = match update {
            Update::Replace(v) => v,
            Update::With(f) => match self.table.get::<T>(self.index) {
                Some(prev) => f(&prev),
                None => {
                    log::warn!("state: slot {} missing; update dropped", self.index);
                    return;
                }
            },
        };
        self.table.set(self.index, next);
        request_rerender(&self.scheduler);
    }
}

/// Dispatch handle for a `use_reducer` slot.
pub struct Dispatch<T, A> {
    table: Rc<SlotTable>,
    index: usize,
    scheduler: Weak<dyn Rerender>,
    reducer: Rc<dyn Fn(&T, A) -> T>,
}

impl<T, A> Clone for Dispatch<T, A> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            index: self.index,
            scheduler: self.scheduler.clone(),
            reducer: self.reducer.clone(),
        }
    }
}

impl<T: Clone + 'static, A> Dispatch<T, A> {
    pub fn dispatch(&self, action: A) {
        let Some(prev) = self.table.get::<T>(self.index) else {
            log::warn!("reducer: slot {} missing; action dropped", self.index);
            return;
        };
        let next = (self.reducer)(&prev, action);
        self.table.set(self.index, next);
        request_rerender(&self.scheduler);
    }
}

fn request_rerender(scheduler: &Weak<dyn Rerender>) {
    match scheduler.upgrade() {
        Some(s) => s.rerender(),
        None => log::debug!("state: no mounted root; skipping re-render"),
    }
}

impl HooksContext {
    /// Returns the slot's current value and its updater. `initial` is only
    /// stored on the first pass but is always evaluated.
    pub fn use_state<T: Clone + 'static>(&self, initial: T) -> (T, StateCell<T>) {
        let index = self.next_slot();
        let value = self.table.with_slot(index, || initial, |v: &mut T| v.clone());
        let cell = StateCell {
            table: self.table.clone(),
            index,
            scheduler: self.scheduler.clone(),
            _marker: PhantomData,
        };
        (value, cell)
    }

    /// Like `use_state`, but every update is `reducer(&previous, action)`.
    pub fn use_reducer<T: Clone + 'static, A: 'static>(
        &self,
        reducer: impl Fn(&T, A) -> T + 'static,
        initial: T,
    ) -> (T, Dispatch<T, A>) {
        let index = self.next_slot();
        let value = self.table.with_slot(index, || initial, |v: &mut T| v.clone());
        let dispatch = Dispatch {
            table: self.table.clone(),
            index,
            scheduler: self.scheduler.clone(),
            reducer: Rc::new(reducer),
        };
        (value, dispatch)
    }
}
