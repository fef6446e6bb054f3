//! Line commands that drive a mounted app the way a user would.

use remount_core::{Event, Renderer, Surface, SurfaceError};
use remount_platform::{Document, EventLoop};
use thiserror::Error;

use crate::components::INPUT_ID;

pub const HELP: &str = "\
commands:
  click <label>        click the button or link with that text
  type <text>          insert text at the caret of the focused input
  input <text>         replace the search input's value
  select <start> <end> focus the search input and select a range
  focus <id>           focus an element by id
  wait                 block until pending searches complete
  show                 print the page
  help                 print this help
  quit                 exit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Click(String),
    Type(String),
    Input(String),
    Select(usize, usize),
    Focus(String),
    Wait,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`select` takes two offsets, got `{0}`")]
    BadRange(String),
    #[error("nothing labelled `{0}` on the page")]
    NoSuchLabel(String),
    #[error("no focused text input")]
    NoFocusedInput,
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };
        match word {
            "click" => arg("click").map(Command::Click),
            "type" => arg("type").map(Command::Type),
            // An empty value is meaningful here.
            "input" => Ok(Command::Input(rest.to_string())),
            "focus" => arg("focus").map(Command::Focus),
            "select" => {
                let mut parts = rest.split_whitespace().map(str::parse::<usize>);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(Ok(start)), Some(Ok(end)), None) => Ok(Command::Select(start, end)),
                    _ => Err(CommandError::BadRange(rest.to_string())),
                }
            }
            "wait" => Ok(Command::Wait),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Runs one command, then delivers any finished background work.
pub fn execute(
    renderer: &Renderer<Document>,
    event_loop: &EventLoop,
    command: &Command,
) -> Result<(), CommandError> {
    match command {
        Command::Click(label) => {
            let node = renderer
                .with_surface(|d| d.find_by_text(label))
                .ok_or_else(|| CommandError::NoSuchLabel(label.clone()))?;
            renderer.dispatch_node(node, Event::Click);
        }
        Command::Type(text) => {
            let (node, value) = renderer
                .with_surface_mut(|d| {
                    let node = d.active_element()?;
                    d.insert_text(node, text).map(|v| (node, v))
                })
                .ok_or(CommandError::NoFocusedInput)?;
            renderer.dispatch_node(node, Event::Input(value));
        }
        Command::Input(text) => {
            renderer.dispatch(INPUT_ID, Event::Input(text.clone()))?;
        }
        Command::Select(start, end) => {
            renderer.with_surface_mut(|d| {
                let node = d
                    .get_element_by_id(INPUT_ID)
                    .ok_or_else(|| SurfaceError::UnknownElement(INPUT_ID.to_string()))?;
                d.focus(node);
                d.set_selection_range(node, *start, *end);
                Ok::<_, SurfaceError>(())
            })?;
        }
        Command::Focus(id) => {
            renderer.with_surface_mut(|d| {
                let node = d
                    .get_element_by_id(id)
                    .ok_or_else(|| SurfaceError::UnknownElement(id.clone()))?;
                d.focus(node);
                Ok::<_, SurfaceError>(())
            })?;
        }
        Command::Wait => event_loop.run_until_idle(),
        Command::Show | Command::Help | Command::Quit => {}
    }
    event_loop.run_pending();
    Ok(())
}
