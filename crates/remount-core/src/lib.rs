//! # Hooks and the render driver
//!
//! Remount renders by calling a root component function and replacing the
//! whole mounted subtree with the result. There is no diffing. State lives in
//! hook slots, not in the tree:
//!
//! - [`HooksContext`]: ordered slot table plus a cursor, one per mounted root.
//! - `use_state` / `use_reducer`: value slots with updater handles.
//! - `use_effect`: runs a callback when its dependency list changes.
//! - [`Renderer`]: mounts the root, re-renders on every update, keeps focus.
//!
//! ## Slots are positional
//!
//! The Nth hook call of a pass always refers to the Nth slot. Call hooks
//! unconditionally and in the same order on every pass; nested components
//! that use hooks must themselves be invoked unconditionally. Debug builds
//! panic when the number of hook calls changes between passes.
//!
//! ```rust
//! use remount_core::*;
//!
//! let hooks = HooksContext::detached();
//!
//! hooks.reset();
//! let (count, set_count) = hooks.use_state(0);
//! assert_eq!(count, 0);
//! hooks.finish();
//!
//! set_count.update(|c| c + 1);
//!
//! hooks.reset();
//! let (count, _) = hooks.use_state(0);
//! assert_eq!(count, 1);
//! hooks.finish();
//! ```
//!
//! ## Updates re-render synchronously
//!
//! Inside a mounted [`Renderer`], every `StateCell::set`, `StateCell::update`
//! and `Dispatch::dispatch` runs one full render pass before returning. Two
//! updates in a row are two passes. Equal values are not skipped.
//!
//! ## Effects
//!
//! ```rust
//! use remount_core::*;
//! use std::cell::Cell;
//!
//! let hooks = HooksContext::detached();
//! let runs = Cell::new(0);
//! for _ in 0..3 {
//!     hooks.reset();
//!     hooks.use_effect(|| runs.set(runs.get() + 1), deps![]);
//!     hooks.finish();
//! }
//! assert_eq!(runs.get(), 1);
//! ```
//!
//! `deps![]` runs once, `None` runs on every pass, and `deps![a, b]` runs
//! whenever `a` or `b` differs from the previous pass. The callback's return
//! value is ignored; there is no cleanup and no unmount.

pub mod effects;
pub mod error;
pub mod hooks;
pub mod mount;
pub mod prelude;
pub mod runtime;
pub mod state;
pub mod surface;
pub mod view;

pub use effects::*;
pub use error::*;
pub use hooks::*;
pub use mount::*;
pub use prelude::*;
pub use runtime::*;
pub use state::*;
pub use surface::*;
pub use view::*;
