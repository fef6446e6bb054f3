#[cfg(test)]
mod tests {
    use crate::*;
    use remount_core::{Event, HooksContext, Renderer, Surface};
    use remount_platform::{Document, EventLoop, History, KeyValueStore, MemoryStore, NodeId};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    /// Answers searches from a fixed catalogue and records the queries.
    struct FakeSource {
        catalogue: Vec<&'static str>,
        fail_with: Option<u16>,
        panics: bool,
        queries: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with(catalogue: Vec<&'static str>) -> Self {
            Self {
                catalogue,
                fail_with: None,
                panics: false,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_with: Some(status),
                ..Self::with(Vec::new())
            }
        }

        fn panicking() -> Self {
            Self {
                panics: true,
                ..Self::with(Vec::new())
            }
        }
    }

    impl ProductSource for FakeSource {
        fn search(&self, query: &str) -> Result<SearchResponse, FetchError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.panics {
                panic!("catalogue unavailable");
            }
            if let Some(status) = self.fail_with {
                return Err(FetchError::Status(status));
            }
            let q = query.to_lowercase();
            Ok(SearchResponse {
                products: self
                    .catalogue
                    .iter()
                    .filter(|t| t.to_lowercase().contains(&q))
                    .enumerate()
                    .map(|(i, t)| Product {
                        id: Some(i as u64 + 1),
                        title: t.to_string(),
                    })
                    .collect(),
            })
        }
    }

    struct Harness {
        renderer: Renderer<Document>,
        root: NodeId,
        env: Rc<AppEnv>,
        event_loop: Rc<EventLoop>,
    }

    impl Harness {
        fn mount(source: FakeSource, store: MemoryStore, hash: &str) -> Self {
            let event_loop = Rc::new(EventLoop::new());
            let env = Rc::new(AppEnv {
                store: Rc::new(store),
                history: Rc::new(History::new(hash)),
                source: Arc::new(source),
                event_loop: event_loop.clone(),
            });
            let mut doc = Document::new();
            let root = doc.create_root("root");
            let renderer = Renderer::new(doc);
            let app_env = env.clone();
            renderer.render(root, move |hooks: &HooksContext| App(hooks, &app_env));
            Self {
                renderer,
                root,
                env,
                event_loop,
            }
        }

        fn home() -> Self {
            Self::mount(
                FakeSource::with(vec!["Pen", "Pencil Case", "Lamp"]),
                MemoryStore::new(),
                "#home",
            )
        }

        fn outline(&self) -> String {
            self.renderer.with_surface(|d| d.outline(self.root))
        }

        fn texts(&self) -> Vec<String> {
            self.renderer.with_surface(|d| d.texts(self.root))
        }

        fn has_text(&self, text: &str) -> bool {
            self.texts().iter().any(|t| t == text)
        }

        fn run(&self, line: &str) {
            let command = Command::parse(line).unwrap();
            repl::execute(&self.renderer, &self.event_loop, &command).unwrap();
        }

        /// Clicks without draining finished tasks, so in-flight state stays
        /// observable.
        fn click(&self, label: &str) {
            let node = self
                .renderer
                .with_surface(|d| d.find_by_text(label))
                .unwrap();
            assert!(self.renderer.dispatch_node(node, Event::Click));
        }

        fn input_disabled(&self) -> bool {
            self.renderer.with_surface(|d| {
                let n = d.get_element_by_id("input").unwrap();
                d.get(n).unwrap().is_disabled()
            })
        }
    }

    #[test]
    fn test_home_page_outline() {
        let h = Harness::home();
        insta::assert_snapshot!(h.outline(), @r##"
div#root
  div
    div
      a href="#home" "Home"
      a href="#about" "About"
    p "Welcome to Home Page"
    div
      input#input placeholder="enter your name" value=""
      button "Clear"
      button "Submit"
    p
    div
      p "Product Empty"
"##);
    }

    #[test]
    fn test_submit_loads_products() {
        let h = Harness::home();
        h.run("input pen");
        h.click("Submit");

        assert!(h.has_text("Loading Products..."));
        assert!(h.input_disabled());
        assert_eq!(h.event_loop.pending(), 1);
        // Disabled controls ignore clicks while the search is in flight.
        let submit = h.renderer.with_surface(|d| d.find_by_text("Submit")).unwrap();
        assert!(!h.renderer.dispatch_node(submit, Event::Click));
        assert_eq!(h.event_loop.pending(), 1);

        h.run("wait");

        assert!(!h.has_text("Loading Products..."));
        assert!(h.has_text("Pen"));
        assert!(h.has_text("Pencil Case"));
        assert!(!h.has_text("Lamp"));
        assert!(!h.input_disabled());
        assert_eq!(h.event_loop.pending(), 0);
    }

    #[test]
    fn test_single_result_replaces_loading() {
        let h = Harness::mount(FakeSource::with(vec!["Pen"]), MemoryStore::new(), "#home");
        h.run("input pen");
        h.click("Submit");
        assert!(h.has_text("Loading Products..."));

        h.run("wait");

        let items: Vec<_> = h.texts().into_iter().filter(|t| t == "Pen").collect();
        assert_eq!(items.len(), 1);
        assert!(!h.has_text("Loading Products..."));
        assert!(!h.has_text("Product Empty"));
        assert!(!h.input_disabled());
    }

    #[test]
    fn test_late_result_applied_after_navigation() {
        let h = Harness::mount(FakeSource::with(vec!["Pen"]), MemoryStore::new(), "#home");
        h.run("input pen");
        h.click("Submit");
        h.click("About");
        assert!(h.has_text("Welcome to About Page"));
        assert_eq!(h.event_loop.pending(), 1);

        h.event_loop.run_until_idle();
        assert!(h.has_text("Welcome to About Page"));

        h.click("Back to Home");
        assert!(h.has_text("Pen"));
        assert!(!h.has_text("Loading Products..."));
        assert!(!h.input_disabled());
    }

    #[test]
    fn test_worker_panic_clears_loading() {
        let h = Harness::mount(FakeSource::panicking(), MemoryStore::new(), "#home");
        h.run("input pen");
        h.click("Submit");
        assert!(h.input_disabled());

        h.run("wait");

        assert!(h.has_text("search worker failed: background task panicked: catalogue unavailable"));
        assert!(!h.has_text("Loading Products..."));
        assert!(!h.input_disabled());
    }

    #[test]
    fn test_failed_search_shows_error() {
        let h = Harness::mount(FakeSource::failing(500), MemoryStore::new(), "#home");
        h.run("input lamp");
        h.run("click Submit");
        h.run("wait");

        assert!(h.has_text("server responded with status 500"));
        assert!(!h.has_text("Product Empty"));
        assert!(!h.input_disabled());
    }

    #[test]
    fn test_clear_resets_input() {
        let h = Harness::home();
        h.run("input pen");
        assert!(h.has_text("pen"));
        h.run("click Clear");
        assert!(!h.has_text("pen"));
        assert_eq!(h.env.store.get_item(INPUT_VALUE_KEY).as_deref(), Some(""));
    }

    #[test]
    fn test_navigation_between_pages() {
        let h = Harness::home();
        h.run("click About");
        assert!(h.has_text("Welcome to About Page"));
        assert!(!h.has_text("Welcome to Home Page"));

        h.run("click Back to Home");
        assert!(h.has_text("Welcome to Home Page"));
        assert_eq!(
            h.env.history.entries(),
            vec!["#home", "#home", "#about", "#home"]
        );
    }

    #[test]
    fn test_unknown_hash_shows_home() {
        let h = Harness::mount(FakeSource::with(Vec::new()), MemoryStore::new(), "#nowhere");
        assert!(h.has_text("Welcome to Home Page"));
        assert_eq!(Page::from_hash("#about"), Page::About);
        assert_eq!(Page::from_hash(""), Page::Home);
    }

    #[test]
    fn test_search_text_persists() {
        let store = MemoryStore::new();
        store.set_item(INPUT_VALUE_KEY, "lamp").unwrap();
        let h = Harness::mount(FakeSource::with(vec!["Lamp"]), store, "#home");

        let value = h.renderer.with_surface(|d| {
            let n = d.get_element_by_id("input").unwrap();
            d.get(n).unwrap().value.clone()
        });
        assert_eq!(value, "lamp");
        assert!(h.has_text("lamp"));

        h.run("input desk lamp");
        assert_eq!(
            h.env.store.get_item(INPUT_VALUE_KEY).as_deref(),
            Some("desk lamp")
        );
    }

    #[test]
    fn test_one_pass_per_keystroke() {
        let h = Harness::home();
        let before = h.renderer.stats().passes;
        h.run("input p");
        assert_eq!(h.renderer.stats().passes, before + 1);
    }

    #[test]
    fn test_typing_keeps_focus_and_caret() {
        let h = Harness::home();
        h.run("input pn");
        h.run("select 1 1");
        h.run("type e");

        h.renderer.with_surface(|d| {
            let n = d.get_element_by_id("input").unwrap();
            assert_eq!(d.get(n).unwrap().value, "pen");
            assert_eq!(d.active_element(), Some(n));
            assert_eq!(d.selection_range(n), Some((2, 2)));
        });
        assert!(h.outline().contains(r#"input#input placeholder="enter your name" value="pen" (focused)"#));
    }

    #[test]
    fn test_query_reaches_source() {
        let source = Arc::new(FakeSource::with(vec!["Pen"]));
        let event_loop = Rc::new(EventLoop::new());
        let env = Rc::new(AppEnv {
            store: Rc::new(MemoryStore::new()),
            history: Rc::new(History::new("")),
            source: source.clone(),
            event_loop: event_loop.clone(),
        });
        let mut doc = Document::new();
        let root = doc.create_root("root");
        let renderer = Renderer::new(doc);
        renderer.render(root, move |hooks: &HooksContext| App(hooks, &env));

        renderer.dispatch("input", Event::Input("pe".into())).unwrap();
        let submit = renderer.with_surface(|d| d.find_by_text("Submit")).unwrap();
        renderer.dispatch_node(submit, Event::Click);
        event_loop.run_until_idle();

        assert_eq!(*source.queries.lock().unwrap(), vec!["pe".to_string()]);
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(
            Command::parse("click Back to Home"),
            Ok(Command::Click("Back to Home".into()))
        );
        assert_eq!(Command::parse("select 2 4"), Ok(Command::Select(2, 4)));
        assert_eq!(Command::parse("input"), Ok(Command::Input(String::new())));
        assert_eq!(Command::parse("  wait \n"), Ok(Command::Wait));
        assert_eq!(
            Command::parse("select 2"),
            Err(CommandError::BadRange("2".into()))
        );
        assert_eq!(
            Command::parse("type"),
            Err(CommandError::MissingArgument("type"))
        );
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }

    #[test]
    fn test_click_unknown_label() {
        let h = Harness::home();
        let cmd = Command::parse("click Checkout").unwrap();
        assert_eq!(
            repl::execute(&h.renderer, &h.event_loop, &cmd),
            Err(CommandError::NoSuchLabel("Checkout".into()))
        );
    }

    #[test]
    fn test_options_overrides() {
        let opts = DemoOptions::default().with_overrides(|key| match key {
            "REMOUNT_SEARCH_URL" => Some("http://localhost:9000/search".into()),
            "REMOUNT_HASH" => Some("#about".into()),
            _ => None,
        });
        assert_eq!(opts.search_url, "http://localhost:9000/search");
        assert_eq!(opts.start_hash, "#about");
        assert_eq!(opts.storage_path, None);

        let parsed: DemoOptions = serde_json::from_str(r##"{"start_hash": "#home"}"##).unwrap();
        assert_eq!(parsed.search_url, config::DEFAULT_SEARCH_URL);
        assert_eq!(parsed.start_hash, "#home");
    }

    #[test]
    fn test_product_decodes_without_id() {
        let body = r#"{"products": [{"title": "Pen"}, {"id": 7, "title": "Lamp", "price": 12}], "total": 2}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.products[0].id, None);
        assert_eq!(parsed.products[1].title, "Lamp");
    }

    /// Answers one HTTP request with `status` and `body`, returning the
    /// search url and the request line it received.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, std::thread::JoinHandle<String>) {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/products/search", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            let text = String::from_utf8_lossy(&request).into_owned();
            text.lines().next().unwrap_or_default().to_string()
        });
        (url, handle)
    }

    #[test]
    fn test_http_source_decodes_products() {
        let (url, server) = serve_once("200 OK", r#"{"products": [{"id": 1, "title": "Pen"}], "total": 1}"#);
        let source = HttpProductSource::new(&url).unwrap();
        let response = source.search("pen").unwrap();
        assert_eq!(
            response.products,
            vec![Product {
                id: Some(1),
                title: "Pen".into()
            }]
        );
        assert_eq!(server.join().unwrap(), "GET /products/search?q=pen HTTP/1.1");
    }

    #[test]
    fn test_http_source_reports_bad_body_and_status() {
        let (url, server) = serve_once("200 OK", r#"{"items": []}"#);
        let err = HttpProductSource::new(&url).unwrap().search("pen").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
        server.join().unwrap();

        let (url, server) = serve_once("503 Service Unavailable", "{}");
        let err = HttpProductSource::new(&url).unwrap().search("pen").unwrap_err();
        assert!(matches!(err, FetchError::Status(503)), "{err:?}");
        server.join().unwrap();
    }
}
