use std::any::Any;

use smallvec::SmallVec;

use crate::hooks::HooksContext;

/// Dependency value compared by `PartialEq`. Values of different types are
/// never equal.
pub trait DepValue: 'static {
    fn dyn_eq(&self, other: &dyn DepValue) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T: PartialEq + 'static> DepValue for T {
    fn dyn_eq(&self, other: &dyn DepValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Positional dependency list of an effect. Build it with [`deps!`](crate::deps).
#[derive(Default)]
pub struct Deps(SmallVec<[Box<dyn DepValue>; 4]>);

impl Deps {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn with(mut self, value: impl PartialEq + 'static) -> Self {
        self.0.push(Box::new(value));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lists of different lengths always count as changed.
    pub fn changed_since(&self, previous: &Deps) -> bool {
        self.len() != previous.len()
            || self
                .0
                .iter()
                .zip(previous.0.iter())
                .any(|(a, b)| !a.dyn_eq(&**b))
    }
}

impl std::fmt::Debug for Deps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deps({})", self.0.len())
    }
}

/// Builds a [`Deps`] list: `deps![a, b]`, or `deps![]` for "first pass only".
#[macro_export]
macro_rules! deps {
    () => {
        $crate::effects::Deps::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::effects::Deps::new()$(.with($value))+
    };
}

impl HooksContext {
    /// Runs `callback` during this pass when `deps` is `None`, on the first
    /// pass, or when any dependency changed since the previous pass.
    ///
    /// Whatever `callback` returns is dropped; there is no cleanup phase.
    pub fn use_effect<R>(&self, callback: impl FnOnce() -> R, deps: impl Into<Option<Deps>>) {
        let index = self.next_slot();
        let deps = deps.into();
        let run = self.table.with_slot(
            index,
            || None::<Deps>,
            |stored: &mut Option<Deps>| {
                let run = match (&deps, stored.as_ref()) {
                    (None, _) | (_, None) => true,
                    (Some(next), Some(prev)) => next.changed_since(prev),
                };
                *stored = deps;
                run
            },
        );
        // The slot borrow is released so the callback may call updaters.
        if run {
            let _ = callback();
        }
    }
}
