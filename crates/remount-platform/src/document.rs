//! Headless element tree implementing [`Surface`].
//!
//! Behaves like the small part of a browser document the renderer relies on:
//! element ids, focus, text-input values and selections, event handlers.
//! Removed subtrees are freed. Selection offsets count grapheme clusters.

use std::collections::HashMap;
use std::fmt::Write as _;

use bitflags::bitflags;
use remount_core::{Event, EventHandler, EventKind, Surface};
use slotmap::{SlotMap, new_key_type};
use unicode_segmentation::UnicodeSegmentation;

new_key_type! {
    pub struct NodeId;
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        const FOCUSABLE = 1 << 0;
        const DISABLED = 1 << 1;
        /// Text-input-like: has a value and a selection.
        const EDITABLE = 1 << 2;
    }
}

pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub value: String,
    /// Grapheme offsets, `start <= end <= grapheme count of value`.
    pub selection: (usize, usize),
    pub flags: NodeFlags,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    handlers: HashMap<EventKind, EventHandler>,
}

impl Element {
    fn new(tag: &str) -> Self {
        let flags = match tag {
            "input" | "textarea" => NodeFlags::FOCUSABLE | NodeFlags::EDITABLE,
            "a" | "button" => NodeFlags::FOCUSABLE,
            _ => NodeFlags::empty(),
        };
        Self {
            tag: tag.to_string(),
            id: None,
            attributes: Vec::new(),
            text: String::new(),
            value: String::new(),
            selection: (0, 0),
            flags,
            children: Vec::new(),
            parent: None,
            handlers: HashMap::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.contains(NodeFlags::DISABLED)
    }
}

pub struct Document {
    nodes: SlotMap<NodeId, Element>,
    body: NodeId,
    active: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Element::new("body"));
        Self {
            nodes,
            body,
            active: None,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Creates `<div id=..>` under the body, for use as a render container.
    pub fn create_root(&mut self, id: &str) -> NodeId {
        let root = self.create_element("div");
        self.set_attribute(root, "id", id);
        self.append_child(self.body, root);
        root
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attached nodes in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            if let Some(el) = self.nodes.get(n) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// First attached element whose own text equals `text` (button and link
    /// labels, paragraphs).
    pub fn find_by_text(&self, text: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|&n| self.nodes[n].text == text)
    }

    /// Own texts of every attached element under `node`, in document order.
    pub fn texts(&self, node: NodeId) -> Vec<String> {
        self.descendants(node)
            .into_iter()
            .map(|n| self.nodes[n].text.clone())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Replaces the selected range of an editable element with `text` and
    /// puts the caret after it. Returns the new value.
    pub fn insert_text(&mut self, node: NodeId, text: &str) -> Option<String> {
        let el = self.nodes.get_mut(node)?;
        if !el.flags.contains(NodeFlags::EDITABLE) || el.is_disabled() {
            return None;
        }
        let (start, end) = el.selection;
        let from = byte_offset(&el.value, start);
        let to = byte_offset(&el.value, end);
        el.value.replace_range(from..to, text);
        let caret = start + grapheme_len(text);
        el.selection = (caret, caret);
        Some(el.value.clone())
    }

    /// Indented one-line-per-element dump of the subtree under `node`.
    pub fn outline(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_outline(node, 0, &mut out);
        out
    }

    fn write_outline(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(el) = self.nodes.get(node) else {
            return;
        };
        let _ = write!(out, "{:indent$}{}", "", el.tag, indent = depth * 2);
        if let Some(id) = &el.id {
            let _ = write!(out, "#{id}");
        }
        for (name, value) in &el.attributes {
            let _ = write!(out, " {name}={value:?}");
        }
        if el.flags.contains(NodeFlags::EDITABLE) {
            let _ = write!(out, " value={:?}", el.value);
        }
        if !el.text.is_empty() {
            let _ = write!(out, " {:?}", el.text);
        }
        if el.is_disabled() {
            out.push_str(" (disabled)");
        }
        if self.active == Some(node) {
            out.push_str(" (focused)");
        }
        out.push('\n');
        for &c in &el.children {
            self.write_outline(c, depth + 1, out);
        }
    }

    fn remove_subtree(&mut self, node: NodeId) {
        if let Some(el) = self.nodes.remove(node) {
            if self.active == Some(node) {
                self.active = None;
            }
            for c in el.children {
                self.remove_subtree(c);
            }
        }
    }
}

fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

fn byte_offset(s: &str, grapheme: usize) -> usize {
    s.grapheme_indices(true)
        .nth(grapheme)
        .map_or(s.len(), |(i, _)| i)
}

impl Surface for Document {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Element::new(tag))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.nodes.get_mut(node) else {
            return;
        };
        if name == "id" {
            el.id = Some(value.to_string());
            return;
        }
        match el.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.nodes.get_mut(node) {
            el.text = text.to_string();
        }
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.nodes.get_mut(node) {
            el.value = value.to_string();
            let end = grapheme_len(value);
            el.selection = (end, end);
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(el) = self.nodes.get_mut(node) {
            el.flags.set(NodeFlags::DISABLED, disabled);
        }
    }

    fn set_event_handler(&mut self, node: NodeId, kind: EventKind, handler: EventHandler) {
        if let Some(el) = self.nodes.get_mut(node) {
            el.handlers.insert(kind, handler);
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::warn!("document: append_child on a removed node");
            return;
        }
        if let Some(old) = self.nodes[child].parent.take()
            && let Some(p) = self.nodes.get_mut(old)
        {
            p.children.retain(|&c| c != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn replace_children(&mut self, parent: NodeId) {
        let Some(el) = self.nodes.get_mut(parent) else {
            return;
        };
        for c in std::mem::take(&mut el.children) {
            self.remove_subtree(c);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn element_id(&self, node: NodeId) -> Option<String> {
        self.nodes.get(node).and_then(|el| el.id.clone())
    }

    fn selection_range(&self, node: NodeId) -> Option<(usize, usize)> {
        self.nodes
            .get(node)
            .filter(|el| el.flags.contains(NodeFlags::EDITABLE))
            .map(|el| el.selection)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|&n| self.nodes[n].id.as_deref() == Some(id))
    }

    fn focus(&mut self, node: NodeId) {
        match self.nodes.get(node) {
            Some(el) if el.flags.contains(NodeFlags::FOCUSABLE) && !el.is_disabled() => {
                self.active = Some(node);
            }
            _ => log::trace!("document: {node:?} is not focusable"),
        }
    }

    fn set_selection_range(&mut self, node: NodeId, start: usize, end: usize) {
        if let Some(el) = self.nodes.get_mut(node)
            && el.flags.contains(NodeFlags::EDITABLE)
        {
            let len = grapheme_len(&el.value);
            let end = end.min(len);
            el.selection = (start.min(end), end);
        }
    }

    fn deliver(&mut self, node: NodeId, event: &Event) -> Option<EventHandler> {
        let el = self.nodes.get_mut(node)?;
        if el.is_disabled() {
            return None;
        }
        match event {
            Event::Click => {
                if el.flags.contains(NodeFlags::FOCUSABLE) {
                    self.active = Some(node);
                }
            }
            Event::Input(value) => {
                if !el.flags.contains(NodeFlags::EDITABLE) {
                    return None;
                }
                if el.value != *value {
                    el.value = value.clone();
                    let end = grapheme_len(value);
                    el.selection = (end, end);
                }
                self.active = Some(node);
            }
        }
        self.nodes[node].handlers.get(&event.kind()).cloned()
    }
}
