pub use crate::deps;
pub use crate::effects::{DepValue, Deps};
pub use crate::error::SurfaceError;
pub use crate::hooks::{HooksContext, Rerender};
pub use crate::mount::mount;
pub use crate::runtime::{RenderStats, Renderer, RootComponent};
pub use crate::state::{Dispatch, StateCell, Update};
pub use crate::surface::Surface;
pub use crate::view::{
    Callback, Event, EventHandler, EventKind, TextCallback, View, ViewKind,
};
