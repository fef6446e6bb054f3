//! Single-threaded UI loop with off-thread work.
//!
//! `spawn` runs blocking work on a worker thread. Its result is queued and
//! the continuation runs on the UI thread during `run_pending` or
//! `run_until_idle`, so continuations may freely touch `Rc` state and call
//! hook updaters. A task that panics still gets its continuation, with a
//! [`TaskPanic`].

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::error::{SpawnError, TaskPanic};

pub type TaskId = u64;

type Output = Result<Box<dyn Any + Send>, String>;
type Continuation = Box<dyn FnOnce(Output)>;

#[derive(Default)]
struct Shared {
    ready: Mutex<VecDeque<(TaskId, Output)>>,
    signal: Condvar,
}

#[derive(Default)]
pub struct EventLoop {
    shared: Arc<Shared>,
    waiting: RefCell<HashMap<TaskId, Continuation>>,
    next_task: Cell<TaskId>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<T: Send + 'static>(
        &self,
        work: impl FnOnce() -> T + Send + 'static,
        then: impl FnOnce(Result<T, TaskPanic>) + 'static,
    ) -> Result<TaskId, SpawnError> {
        let id = self.next_task.get();
        self.next_task.set(id + 1);

        self.waiting.borrow_mut().insert(
            id,
            Box::new(move |out: Output| match out {
                Ok(value) => match value.downcast::<T>() {
                    Ok(v) => then(Ok(*v)),
                    Err(_) => log::error!("event loop: task {id} produced an unexpected type"),
                },
                Err(msg) => {
                    log::error!("event loop: task {id} panicked: {msg}");
                    then(Err(TaskPanic(msg)))
                }
            }),
        );

        let shared = self.shared.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("remount-task-{id}"))
            .spawn(move || {
                let out = catch_unwind(AssertUnwindSafe(work))
                    .map(|v| Box::new(v) as Box<dyn Any + Send>)
                    .map_err(|err| {
                        err.downcast_ref::<String>()
                            .cloned()
                            .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
                            .unwrap_or_else(|| "unknown panic".to_string())
                    });
                shared.ready.lock().push_back((id, out));
                shared.signal.notify_all();
            });

        match spawned {
            Ok(_) => {
                log::trace!("event loop: spawned task {id}");
                Ok(id)
            }
            Err(e) => {
                self.waiting.borrow_mut().remove(&id);
                Err(SpawnError::Thread(e))
            }
        }
    }

    /// Number of spawned tasks whose continuation has not run yet.
    pub fn pending(&self) -> usize {
        self.waiting.borrow().len()
    }

    /// Runs the continuations of every finished task without blocking.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let finished: Vec<_> = self.shared.ready.lock().drain(..).collect();
        let mut ran = 0;
        for (id, out) in finished {
            let Some(then) = self.waiting.borrow_mut().remove(&id) else {
                continue;
            };
            then(out);
            ran += 1;
        }
        ran
    }

    /// Blocks until every spawned task, including tasks spawned by
    /// continuations, has been delivered.
    pub fn run_until_idle(&self) {
        while self.pending() > 0 {
            {
                let mut ready = self.shared.ready.lock();
                while ready.is_empty() {
                    self.shared.signal.wait(&mut ready);
                }
            }
            self.run_pending();
        }
    }
}
