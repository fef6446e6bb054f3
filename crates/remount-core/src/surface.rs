use std::fmt::Debug;

use crate::view::{Event, EventHandler, EventKind};

/// Node-builder capability set a render tree is mounted through.
///
/// Implemented by every display target (headless document, terminal, test
/// harness). Components never see a surface; the render driver does.
pub trait Surface {
    type Node: Copy + Eq + Debug + 'static;

    fn create_element(&mut self, tag: &str) -> Self::Node;
    /// `"id"` is an ordinary attribute but must make the node reachable
    /// through [`Surface::get_element_by_id`] once attached.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);
    fn set_text(&mut self, node: Self::Node, text: &str);
    fn set_value(&mut self, node: Self::Node, value: &str);
    fn set_disabled(&mut self, node: Self::Node, disabled: bool);
    fn set_event_handler(&mut self, node: Self::Node, kind: EventKind, handler: EventHandler);
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);
    /// Removes every child of `parent`.
    fn replace_children(&mut self, parent: Self::Node);

    fn active_element(&self) -> Option<Self::Node>;
    fn element_id(&self, node: Self::Node) -> Option<String>;
    /// Selection offsets, only for text-input-like nodes.
    fn selection_range(&self, node: Self::Node) -> Option<(usize, usize)>;
    fn get_element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn focus(&mut self, node: Self::Node);
    fn set_selection_range(&mut self, node: Self::Node, start: usize, end: usize);

    /// Applies the default action of `event` on `node` (value edit, focus)
    /// and returns the handler to invoke, if any. The caller invokes it after
    /// releasing the surface.
    fn deliver(&mut self, node: Self::Node, event: &Event) -> Option<EventHandler>;
}
