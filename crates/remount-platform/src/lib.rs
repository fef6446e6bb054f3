//! Host side of Remount: a headless [`Document`] surface, the UI
//! [`EventLoop`], key-value storage and session history.

pub mod document;
pub mod error;
pub mod event_loop;
pub mod history;
pub mod storage;

pub use document::{Document, Element, NodeFlags, NodeId};
pub use error::{SpawnError, StorageError, TaskPanic};
pub use event_loop::{EventLoop, TaskId};
pub use history::History;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
