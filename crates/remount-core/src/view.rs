use std::rc::Rc;

pub type Callback = Rc<dyn Fn()>;
pub type TextCallback = Rc<dyn Fn(String)>;

/// Handler installed on a surface node. Receives the event that fired it.
pub type EventHandler = Rc<dyn Fn(&Event)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
}

/// Host event delivered to a mounted node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Click,
    /// The full new value of a text input.
    Input(String),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click => EventKind::Click,
            Event::Input(_) => EventKind::Input,
        }
    }
}

#[derive(Clone)]
pub enum ViewKind {
    Column,
    Text {
        text: String,
    },
    Link {
        href: String,
        label: String,
        on_click: Option<Callback>,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    TextInput {
        value: String,
        placeholder: String,
        on_input: Option<TextCallback>,
    },
}

impl ViewKind {
    /// Element tag used when the view is mounted onto a surface.
    pub fn tag(&self) -> &'static str {
        match self {
            ViewKind::Column => "div",
            ViewKind::Text { .. } => "p",
            ViewKind::Link { .. } => "a",
            ViewKind::Button { .. } => "button",
            ViewKind::TextInput { .. } => "input",
        }
    }
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ViewKind::Link {
                href,
                label,
                on_click,
            } => f
                .debug_struct("Link")
                .field("href", href)
                .field("label", label)
                .field("on_click", &on_click.as_ref().map(|_| "<callback>"))
                .finish(),
            ViewKind::Button { text, on_click } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &on_click.as_ref().map(|_| "<callback>"))
                .finish(),
            ViewKind::TextInput {
                value,
                placeholder,
                on_input,
            } => f
                .debug_struct("TextInput")
                .field("value", value)
                .field("placeholder", placeholder)
                .field("on_input", &on_input.as_ref().map(|_| "<callback>"))
                .finish(),
        }
    }
}

/// Render tree node produced by a component function.
#[derive(Clone, Debug)]
pub struct View {
    /// Element id on the mounted surface; the key used for focus restoration.
    pub id: Option<String>,
    pub kind: ViewKind,
    pub disabled: bool,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            id: None,
            kind,
            disabled: false,
            children: vec![],
        }
    }
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn child(mut self, kid: View) -> Self {
        self.children.push(kid);
        self
    }

    /// Depth-first search for a view with the given element id.
    pub fn find(&self, id: &str) -> Option<&View> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Concatenated visible text of this subtree, depth-first.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            ViewKind::Text { text } | ViewKind::Button { text, .. } => out.push_str(text),
            ViewKind::Link { label, .. } => out.push_str(label),
            ViewKind::TextInput { .. } | ViewKind::Column => {}
        }
        for c in &self.children {
            c.collect_text(out);
        }
    }
}
