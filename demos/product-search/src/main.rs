use std::io::{BufRead, Write};
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use product_search::repl::{self, HELP};
use product_search::{App, AppEnv, Command, DemoOptions, HttpProductSource};
use remount_core::{HooksContext, Renderer};
use remount_platform::{Document, EventLoop, FileStore, History, KeyValueStore, MemoryStore};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => DemoOptions::from_json_file(&path)
            .with_context(|| format!("loading options from {path}"))?,
        None => DemoOptions::default(),
    }
    .with_env();
    log::info!("starting with {options:?}");

    let store: Rc<dyn KeyValueStore> = match &options.storage_path {
        Some(path) => Rc::new(FileStore::open(path)?),
        None => Rc::new(MemoryStore::new()),
    };
    let source = HttpProductSource::new(&options.search_url)?;
    let event_loop = Rc::new(EventLoop::new());
    let env = Rc::new(AppEnv {
        store,
        history: Rc::new(History::new(options.start_hash.clone())),
        source: Arc::new(source),
        event_loop: event_loop.clone(),
    });

    let mut doc = Document::new();
    let root = doc.create_root("root");
    let renderer = Renderer::new(doc);
    renderer.render(root, move |hooks: &HooksContext| App(hooks, &env));

    println!("{HELP}\n");
    print!("{}", renderer.with_surface(|d| d.outline(root)));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            ref command => match repl::execute(&renderer, &event_loop, command) {
                Ok(()) => print!("{}", renderer.with_surface(|d| d.outline(root))),
                Err(e) => println!("{e}"),
            },
        }
    }

    log::info!("{} render passes", renderer.stats().passes);
    Ok(())
}
