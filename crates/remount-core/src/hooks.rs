//! Positional slot storage behind every hook.
//!
//! Slot identity is the call order: the Nth hook call of a render pass always
//! gets the Nth slot. A component that calls hooks conditionally, or in a
//! loop whose length varies, reads another call site's slot on the next pass.
//! Nothing in release builds detects that. Debug builds panic in
//! [`HooksContext::finish`] when the number of hook calls changes between
//! consecutive passes.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Re-entry point used by updaters to request a full render pass.
pub trait Rerender {
    fn rerender(&self);
}

/// Append-only table of type-erased slot values.
#[derive(Default)]
pub(crate) struct SlotTable {
    slots: RefCell<Vec<Box<dyn Any>>>,
}

impl SlotTable {
    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Runs `f` on the slot at `index`, creating it with `init` when the slot
    /// does not exist yet or holds another type.
    pub(crate) fn with_slot<T: 'static, R>(
        &self,
        index: usize,
        init: impl FnOnce() -> T,
        f: impl FnOnce(&mut T) -> R,
    ) -> R {
        let mut slots = self.slots.borrow_mut();
        if index >= slots.len() {
            debug_assert_eq!(index, slots.len(), "slots are claimed in order");
            slots.push(Box::new(init()));
        } else if !slots[index].is::<T>() {
            log::warn!(
                "hooks: slot {} type changed; re-initializing. \
                 Hooks must be called in the same order on every render.",
                index
            );
            slots[index] = Box::new(init());
        }
        let slot = slots[index]
            .downcast_mut::<T>()
            .unwrap_or_else(|| unreachable!("slot {index} was just initialized"));
        f(slot)
    }

    pub(crate) fn get<T: Clone + 'static>(&self, index: usize) -> Option<T> {
        self.slots
            .borrow()
            .get(index)
            .and_then(|s| s.downcast_ref::<T>())
            .cloned()
    }

    pub(crate) fn set<T: 'static>(&self, index: usize, value: T) {
        let mut slots = self.slots.borrow_mut();
        match slots.get_mut(index) {
            Some(slot) => {
                if !slot.is::<T>() {
                    log::warn!("hooks: updater for slot {} wrote a different type", index);
                }
                *slot = Box::new(value);
            }
            None => log::warn!("hooks: updater for unknown slot {} ignored", index),
        }
    }
}

/// Per-root hook state: the slot table, the cursor, and the way back into the
/// render driver.
pub struct HooksContext {
    pub(crate) table: Rc<SlotTable>,
    cursor: Cell<usize>,
    previous_pass: Cell<Option<usize>>,
    pub(crate) scheduler: Weak<dyn Rerender>,
}

struct Detached;

impl Rerender for Detached {
    fn rerender(&self) {}
}

impl HooksContext {
    pub fn new(scheduler: Weak<dyn Rerender>) -> Self {
        Self {
            table: Rc::new(SlotTable::default()),
            cursor: Cell::new(0),
            previous_pass: Cell::new(None),
            scheduler,
        }
    }

    /// A context whose updaters store values but never re-render.
    pub fn detached() -> Self {
        let scheduler: Weak<dyn Rerender> = Weak::<Detached>::new();
        Self::new(scheduler)
    }

    /// Starts a render pass.
    pub fn reset(&self) {
        self.cursor.set(0);
    }

    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    pub fn slot_count(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn next_slot(&self) -> usize {
        let index = self.cursor.get();
        self.cursor.set(index + 1);
        index
    }

    /// Ends a render pass and checks that it made as many hook calls as the
    /// previous one.
    pub fn finish(&self) {
        let used = self.cursor.get();
        if let Some(prev) = self.previous_pass.replace(Some(used))
            && prev != used
        {
            log::error!(
                "hooks: render pass made {} hook calls, previous pass made {}",
                used,
                prev
            );
            debug_assert_eq!(
                prev, used,
                "hook order changed between render passes; hooks must not be called conditionally"
            );
        }
    }
}
