#![allow(non_snake_case)]
//! Stateless page pieces. None of these call hooks.

use std::rc::Rc;

use remount_core::{Callback, TextCallback, View};
use remount_ui::{Button, Column, Link, Text, TextInput, ViewExt};

use crate::api::Product;

pub const INPUT_ID: &str = "input";

pub fn Navbar(on_link_home_click: Callback, on_link_about_click: Callback) -> View {
    Column(vec![
        Link("#home", "Home", move || on_link_home_click()),
        Link("#about", "About", move || on_link_about_click()),
    ])
}

pub fn AboutPage(on_link_home_click: Callback) -> View {
    Column(vec![
        Link("#home", "Back to Home", move || on_link_home_click()),
        Text("Welcome to About Page"),
    ])
}

pub struct ProductSearchInputProps {
    pub input_value: String,
    pub loading: bool,
    pub on_input_change: TextCallback,
    pub on_button_clear_click: Callback,
    pub on_button_submit_click: Callback,
}

pub fn ProductSearchInput(props: ProductSearchInputProps) -> View {
    let ProductSearchInputProps {
        input_value,
        loading,
        on_input_change,
        on_button_clear_click,
        on_button_submit_click,
    } = props;

    Column(vec![
        TextInput(input_value, "enter your name", move |v| on_input_change(v))
            .with_id(INPUT_ID)
            .enabled(!loading),
        Button("Clear", move || on_button_clear_click()).enabled(!loading),
        Button("Submit", move || on_button_submit_click()).enabled(!loading),
    ])
}

pub fn ProductItem(title: &str) -> View {
    Text(title)
}

/// Loading wins over an error, an error wins over the empty state.
pub fn ProductList(products: &[Product], loading: bool, error_message: &str) -> View {
    let body = if loading {
        vec![Text("Loading Products...")]
    } else if !error_message.is_empty() {
        vec![Text(error_message)]
    } else if products.is_empty() {
        vec![Text("Product Empty")]
    } else {
        products.iter().map(|p| ProductItem(&p.title)).collect()
    };
    Column(body)
}

/// Wraps a plain closure as a callback prop.
pub fn callback(f: impl Fn() + 'static) -> Callback {
    Rc::new(f)
}
