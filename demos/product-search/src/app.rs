#![allow(non_snake_case)]
//! Root component and the home page, the only places that call hooks.

use std::rc::Rc;
use std::sync::Arc;

use remount_core::{Callback, HooksContext, View, deps};
use remount_platform::{EventLoop, History, KeyValueStore, TaskPanic};
use remount_ui::{Column, Text};

use crate::api::{FetchError, Product, ProductSource, SearchResponse};
use crate::components::{
    AboutPage, Navbar, ProductList, ProductSearchInput, ProductSearchInputProps, callback,
};

pub const INPUT_VALUE_KEY: &str = "inputValue";

/// Host services the components reach through props.
pub struct AppEnv {
    pub store: Rc<dyn KeyValueStore>,
    pub history: Rc<History>,
    pub source: Arc<dyn ProductSource>,
    pub event_loop: Rc<EventLoop>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
}

impl Page {
    /// Unknown fragments fall back to the home page.
    pub fn from_hash(hash: &str) -> Self {
        match hash {
            "#about" => Page::About,
            _ => Page::Home,
        }
    }
}

pub fn App(hooks: &HooksContext, env: &Rc<AppEnv>) -> View {
    let (hash, set_hash) = hooks.use_state(env.history.hash());

    hooks.use_effect(
        {
            let env = env.clone();
            let hash = hash.clone();
            move || env.history.push_state(&hash)
        },
        deps![hash.clone()],
    );

    let on_link_home_click = {
        let set_hash = set_hash.clone();
        callback(move || set_hash.set("#home".to_string()))
    };
    let on_link_about_click = callback(move || set_hash.set("#about".to_string()));

    // Both pages are built on every pass so the hook sequence never depends
    // on the active page.
    let home_page = HomePage(hooks, env, on_link_home_click.clone(), on_link_about_click);
    let about_page = AboutPage(on_link_home_click);

    match Page::from_hash(&hash) {
        Page::Home => home_page,
        Page::About => about_page,
    }
}

pub fn HomePage(
    hooks: &HooksContext,
    env: &Rc<AppEnv>,
    on_link_home_click: Callback,
    on_link_about_click: Callback,
) -> View {
    let (input_value, set_input_value) =
        hooks.use_state(env.store.get_item(INPUT_VALUE_KEY).unwrap_or_default());

    hooks.use_effect(
        {
            let env = env.clone();
            let value = input_value.clone();
            move || {
                if let Err(e) = env.store.set_item(INPUT_VALUE_KEY, &value) {
                    log::warn!("could not persist {INPUT_VALUE_KEY}: {e}");
                }
            }
        },
        deps![input_value.clone()],
    );

    let (loading, set_loading) = hooks.use_state(false);
    let (products, set_products) = hooks.use_state(Vec::<Product>::new());
    let (error_message, set_error_message) = hooks.use_state(String::new());

    hooks.use_effect(
        {
            let env = env.clone();
            let query = input_value.clone();
            let set_loading = set_loading.clone();
            move || {
                if !loading {
                    return;
                }
                let source = env.source.clone();
                let task_query = query.clone();
                let finish = {
                    let set_loading = set_loading.clone();
                    move |outcome: Result<Result<SearchResponse, FetchError>, TaskPanic>| {
                        match outcome.map_err(FetchError::from).and_then(|r| r) {
                            Ok(data) => {
                                log::info!("search {query:?}: {} products", data.products.len());
                                set_loading.set(false);
                                set_products.set(data.products);
                                set_error_message.set(String::new());
                            }
                            Err(err) => {
                                log::warn!("search {query:?} failed: {err}");
                                set_loading.set(false);
                                set_products.set(Vec::new());
                                set_error_message.set(err.to_string());
                            }
                        }
                    }
                };
                if let Err(e) = env
                    .event_loop
                    .spawn(move || source.search(&task_query), finish)
                {
                    log::error!("could not start search: {e}");
                    set_loading.set(false);
                }
            }
        },
        deps![loading, input_value.clone()],
    );

    let navbar = Navbar(on_link_home_click, on_link_about_click);

    let product_search_input = ProductSearchInput(ProductSearchInputProps {
        input_value: input_value.clone(),
        loading,
        on_input_change: {
            let set_input_value = set_input_value.clone();
            Rc::new(move |v| set_input_value.set(v))
        },
        on_button_clear_click: callback(move || set_input_value.set(String::new())),
        on_button_submit_click: callback(move || set_loading.set(true)),
    });

    let product_list = ProductList(&products, loading, &error_message);

    Column(vec![
        navbar,
        Text("Welcome to Home Page"),
        product_search_input,
        Text(input_value),
        product_list,
    ])
}
