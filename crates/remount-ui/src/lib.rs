#![allow(non_snake_case)]
//! Widget builders. Each returns a [`View`] node; none of them call hooks.

use std::rc::Rc;

use remount_core::*;

pub fn Column(children: Vec<View>) -> View {
    View::new(ViewKind::Column).with_children(children)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text { text: text.into() })
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(ViewKind::Button {
        text: text.into(),
        on_click: Some(Rc::new(on_click)),
    })
}

/// Anchor whose click is intercepted: `on_click` runs instead of navigation.
pub fn Link(href: impl Into<String>, label: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(ViewKind::Link {
        href: href.into(),
        label: label.into(),
        on_click: Some(Rc::new(on_click)),
    })
}

pub fn TextInput(
    value: impl Into<String>,
    placeholder: impl Into<String>,
    on_input: impl Fn(String) + 'static,
) -> View {
    View::new(ViewKind::TextInput {
        value: value.into(),
        placeholder: placeholder.into(),
        on_input: Some(Rc::new(on_input)),
    })
}

/// Builder helpers shared by every widget.
pub trait ViewExt: Sized {
    fn with_id(self, id: impl Into<String>) -> Self;
    fn enabled(self, enabled: bool) -> Self;
}

impl ViewExt for View {
    fn with_id(self, id: impl Into<String>) -> Self {
        self.id(id)
    }
    fn enabled(self, enabled: bool) -> Self {
        self.disabled(!enabled)
    }
}
