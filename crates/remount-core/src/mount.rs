use std::rc::Rc;

use crate::surface::Surface;
use crate::view::{Event, EventKind, View, ViewKind};

/// Builds `view` on `surface` and returns the detached root node.
pub fn mount<S: Surface>(surface: &mut S, view: &View) -> S::Node {
    let node = surface.create_element(view.kind.tag());
    if let Some(id) = &view.id {
        surface.set_attribute(node, "id", id);
    }

    match &view.kind {
        ViewKind::Column => {}
        ViewKind::Text { text } => surface.set_text(node, text),
        ViewKind::Link {
            href,
            label,
            on_click,
        } => {
            surface.set_attribute(node, "href", href);
            surface.set_text(node, label);
            if let Some(cb) = on_click {
                let cb = cb.clone();
                surface.set_event_handler(node, EventKind::Click, Rc::new(move |_: &Event| cb()));
            }
        }
        ViewKind::Button { text, on_click } => {
            surface.set_text(node, text);
            if let Some(cb) = on_click {
                let cb = cb.clone();
                surface.set_event_handler(node, EventKind::Click, Rc::new(move |_: &Event| cb()));
            }
        }
        ViewKind::TextInput {
            value,
            placeholder,
            on_input,
        } => {
            surface.set_value(node, value);
            surface.set_attribute(node, "placeholder", placeholder);
            if let Some(cb) = on_input {
                let cb = cb.clone();
                surface.set_event_handler(
                    node,
                    EventKind::Input,
                    Rc::new(move |ev: &Event| {
                        if let Event::Input(text) = ev {
                            cb(text.clone())
                        }
                    }),
                );
            }
        }
    }

    if view.disabled {
        surface.set_disabled(node, true);
    }

    for child in &view.children {
        let c = mount(surface, child);
        surface.append_child(node, c);
    }
    node
}
