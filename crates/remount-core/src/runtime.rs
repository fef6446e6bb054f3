use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use web_time::Instant;

use crate::error::SurfaceError;
use crate::hooks::{HooksContext, Rerender};
use crate::mount::mount;
use crate::surface::Surface;
use crate::view::{Event, View};

pub type RootComponent = Rc<dyn Fn(&HooksContext) -> View>;

/// The (container, root component) pair currently displayed.
struct MountedRoot<N> {
    container: N,
    component: RootComponent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub passes: u64,
    pub last_pass: Duration,
}

/// Focus state captured before the old subtree is discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FocusSnapshot {
    id: String,
    selection: Option<(usize, usize)>,
}

/// Render driver: owns the surface, the mounted root and its hook state.
///
/// Every pass replaces the container's whole subtree. Updaters reach the
/// driver through a weak handle and re-render synchronously.
pub struct Renderer<S: Surface + 'static> {
    inner: Rc<RendererInner<S>>,
}

impl<S: Surface + 'static> Clone for Renderer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct RendererInner<S: Surface> {
    surface: RefCell<S>,
    hooks: HooksContext,
    mounted: RefCell<Option<MountedRoot<S::Node>>>,
    rendering: Cell<bool>,
    queued: Cell<usize>,
    stats: Cell<RenderStats>,
}

/// Clears the in-pass flag even if a component panics. A panicking pass
/// also discards the updates it queued.
struct PassGuard<'a> {
    rendering: &'a Cell<bool>,
    queued: &'a Cell<usize>,
}

impl<'a> PassGuard<'a> {
    fn begin(rendering: &'a Cell<bool>, queued: &'a Cell<usize>) -> Self {
        rendering.set(true);
        Self { rendering, queued }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.rendering.set(false);
        if std::thread::panicking() {
            self.queued.set(0);
        }
    }
}

impl<S: Surface + 'static> Renderer<S> {
    pub fn new(surface: S) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<RendererInner<S>>| {
            let scheduler: Weak<dyn Rerender> = weak.clone();
            RendererInner {
                surface: RefCell::new(surface),
                hooks: HooksContext::new(scheduler),
                mounted: RefCell::new(None),
                rendering: Cell::new(false),
                queued: Cell::new(0),
                stats: Cell::new(RenderStats::default()),
            }
        });
        Self { inner }
    }

    /// Mounts `component` into `container` and renders it. Replaces any
    /// previously mounted root; hook slots are kept.
    pub fn render(
        &self,
        container: S::Node,
        component: impl Fn(&HooksContext) -> View + 'static,
    ) {
        *self.inner.mounted.borrow_mut() = Some(MountedRoot {
            container,
            component: Rc::new(component),
        });
        self.inner.run();
    }

    /// Re-renders the mounted root. No-op before the first `render`.
    pub fn update(&self) {
        self.inner.run();
    }

    /// Delivers a host event to the element with `id`. Returns whether a
    /// handler ran.
    pub fn dispatch(&self, id: &str, event: Event) -> Result<bool, SurfaceError> {
        let node = self
            .inner
            .surface
            .borrow()
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::UnknownElement(id.to_string()))?;
        Ok(self.dispatch_node(node, event))
    }

    pub fn dispatch_node(&self, node: S::Node, event: Event) -> bool {
        // Surface borrow ends before the handler runs; handlers re-render.
        let handler = self.inner.surface.borrow_mut().deliver(node, &event);
        match handler {
            Some(h) => {
                h(&event);
                true
            }
            None => false,
        }
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.surface.borrow())
    }

    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.surface.borrow_mut())
    }

    pub fn hooks(&self) -> &HooksContext {
        &self.inner.hooks
    }

    pub fn stats(&self) -> RenderStats {
        self.inner.stats.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.borrow().is_some()
    }
}

impl<S: Surface> RendererInner<S> {
    fn run(&self) {
        if self.rendering.get() {
            // Updater called from inside a pass (e.g. a synchronous effect):
            // one extra pass per call, right after the current one.
            self.queued.set(self.queued.get() + 1);
            log::debug!("render requested during a pass; queued");
            return;
        }
        self.pass();
        while self.queued.get() > 0 {
            self.queued.set(self.queued.get() - 1);
            self.pass();
        }
    }

    fn pass(&self) {
        let Some((container, component)) = self
            .mounted
            .borrow()
            .as_ref()
            .map(|m| (m.container, m.component.clone()))
        else {
            log::warn!("update() called before render(); nothing is mounted");
            return;
        };

        let started = Instant::now();
        let focus = capture_focus(&*self.surface.borrow());

        let tree = {
            let _guard = PassGuard::begin(&self.rendering, &self.queued);
            self.hooks.reset();
            let tree = component(&self.hooks);
            self.hooks.finish();
            tree
        };

        {
            let mut surface = self.surface.borrow_mut();
            surface.replace_children(container);
            let node = mount(&mut *surface, &tree);
            surface.append_child(container, node);
            if let Some(focus) = focus {
                restore_focus(&mut *surface, &focus);
            }
        }

        let mut stats = self.stats.get();
        stats.passes += 1;
        stats.last_pass = started.elapsed();
        self.stats.set(stats);
        log::debug!(
            "render pass {} ({} slots) took {:?}",
            stats.passes,
            self.hooks.slot_count(),
            stats.last_pass
        );
    }
}

impl<S: Surface> Rerender for RendererInner<S> {
    fn rerender(&self) {
        self.run();
    }
}

fn capture_focus<S: Surface>(surface: &S) -> Option<FocusSnapshot> {
    let active = surface.active_element()?;
    let id = surface.element_id(active).filter(|id| !id.is_empty())?;
    Some(FocusSnapshot {
        selection: surface.selection_range(active),
        id,
    })
}

fn restore_focus<S: Surface>(surface: &mut S, focus: &FocusSnapshot) {
    let Some(node) = surface.get_element_by_id(&focus.id) else {
        log::trace!("focus: #{} is gone after re-render; not restored", focus.id);
        return;
    };
    surface.focus(node);
    if let Some((start, end)) = focus.selection {
        surface.set_selection_range(node, start, end);
    }
}
