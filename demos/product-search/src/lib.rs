//! Product search demo built on remount: a navbar with two hash routes, a
//! search box whose text survives restarts, and a product list fetched
//! from a remote endpoint off the UI thread.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod repl;
pub mod tests;

pub use api::{FetchError, HttpProductSource, Product, ProductSource, SearchResponse};
pub use app::{App, AppEnv, HomePage, INPUT_VALUE_KEY, Page};
pub use config::{ConfigError, DemoOptions};
pub use repl::{Command, CommandError};
