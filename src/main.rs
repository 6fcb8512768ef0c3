//! Command-line page runtime.
//!
//! Drives the library the way the browser pages do: events go through
//! `handle_event`, dispatched requests are sent over HTTP, and their
//! completions come back as events until nothing is left to do. The rendered
//! fragment is printed to stdout; logs go to stderr or the configured file.
//!
//! # Usage
//!
//! ```text
//! videotheque [key=value ...]
//!
//!   config=PATH          TOML config (default: ~/.config/videotheque/config.toml)
//!   view=index|management|search
//!   width=PX             viewport width (default: 1280)
//!   category=NAME        category select value
//!   search=TEXT          management search box
//!   name=TEXT | year=YYYY | genres=A,B   provider search (view=search)
//!   delete=ID            delete a movie (confirmed)
//!
//! Any Config key (base_url, breakpoint_px, theme, ...) may also be given.
//! ```
//!
//! # Event Mapping
//!
//! - start → `Event::PageLoaded` or `Event::OpenManagement`
//! - `width` → `Event::ViewportResized`
//! - `category` / `search` → `Event::CategorySelected` / `Event::SearchInput`
//! - `delete` → `Event::RowAction` then `Event::ConfirmDelete`
//! - every finished request → `Event::Completed`

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use std::process::ExitCode;
use std::time::Duration;

use videotheque::api::{ApiClient, HttpTransport, Transport};
use videotheque::app::{RowAction, Toast};
use videotheque::domain::ThirdPartyQuery;
use videotheque::infrastructure::{expand_tilde, get_config_dir};
use videotheque::{handle_event, Action, AppState, Config, Event};

const DEFAULT_WIDTH: u32 = 1280;

/// Runtime state wrapper.
///
/// Wraps the library's `AppState` with the HTTP client and the toasts shown
/// so far.
struct State<T: Transport> {
    app: AppState,
    client: ApiClient<T>,
    toasts: Vec<Toast>,
    queue: VecDeque<Event>,
}

impl<T: Transport> State<T> {
    fn new(app: AppState, client: ApiClient<T>) -> Self {
        Self {
            app,
            client,
            toasts: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Processes `event` and everything it triggers.
    fn run(&mut self, event: Event) {
        self.queue.push_back(event);
        while let Some(event) = self.queue.pop_front() {
            self.update(&event);
        }
    }

    fn update(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Dispatch { ticket, request } => {
                let token = self.app.sequencer.token(ticket);
                let completion = self.client.handle_request(ticket, &request, &token);
                self.queue.push_back(Event::Completed(completion));
            }
            Action::ShowToast(toast) => {
                tracing::info!(level = ?toast.level, text = %toast.message, "toast");
                self.toasts.push(toast);
            }
            Action::ResetAddForm => tracing::debug!("add form reset"),
            Action::FieldUpdated {
                input_name,
                previous,
                content,
            } => {
                tracing::info!(%input_name, %previous, %content, "field updated");
            }
            Action::ShowMovie { movie_id } => {
                tracing::info!(movie_id, "opening movie page");
            }
            Action::ShowThirdPartyDetails(movie) => {
                tracing::info!(id = movie.id, title = %movie.title, "opening provider movie");
            }
        }
    }
}

/// Splits `key=value` arguments; anything else is ignored with a warning.
fn parse_args(args: impl Iterator<Item = String>) -> BTreeMap<String, String> {
    args.filter_map(|arg| match arg.split_once('=') {
        Some((k, v)) => Some((k.trim().to_string(), v.to_string())),
        None => {
            eprintln!("videotheque: ignoring argument without '=': {arg}");
            None
        }
    })
    .collect()
}

fn load_config(args: &BTreeMap<String, String>) -> Result<Config, videotheque::VideothequeError> {
    let explicit = args.get("config").map(|p| expand_tilde(p));
    let path = explicit
        .clone()
        .map_or_else(|| get_config_dir().join("config.toml"), Into::into);

    let base = if path.exists() {
        Config::from_file(&path)?
    } else if explicit.is_some() {
        return Err(videotheque::VideothequeError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    } else {
        Config::default()
    };
    Ok(base.merged_with(args))
}

fn provider_query(args: &BTreeMap<String, String>) -> Option<ThirdPartyQuery> {
    if let Some(name) = args.get("name") {
        return Some(ThirdPartyQuery::ByName(name.clone()));
    }
    if let Some(year) = args.get("year") {
        return Some(ThirdPartyQuery::ByYear(year.clone()));
    }
    args.get("genres").map(|genres| {
        ThirdPartyQuery::ByCategories(
            genres
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(String::from)
                .collect(),
        )
    })
}

fn main() -> ExitCode {
    let args = parse_args(std::env::args().skip(1));
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("videotheque: {e}");
            return ExitCode::FAILURE;
        }
    };
    videotheque::observability::init_tracing(&config);

    let span = tracing::debug_span!("videotheque_run");
    let _guard = span.entered();

    let transport = match HttpTransport::new(&config.base_url, Duration::from_secs(config.timeout_secs)) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "cannot build HTTP client");
            eprintln!("videotheque: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut state = State::new(videotheque::initialize(&config), ApiClient::new(transport));

    let width = args
        .get("width")
        .and_then(|w| w.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_WIDTH);
    state.run(Event::ViewportResized { width });

    let view = args.get("view").map_or("management", String::as_str);
    match view {
        "index" => {
            state.run(Event::PageLoaded);
            if let Some(category) = args.get("category") {
                state.run(Event::IndexCategorySelected(category.clone()));
            }
        }
        "search" => match provider_query(&args) {
            Some(query) => state.run(Event::ThirdPartySearch(query)),
            None => {
                eprintln!("videotheque: view=search needs name=, year= or genres=");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            state.run(Event::OpenManagement);
            if let Some(category) = args.get("category") {
                state.run(Event::CategorySelected(category.clone()));
            }
            if let Some(term) = args.get("search") {
                state.run(Event::SearchInput(term.clone()));
            }
        }
    }

    if let Some(movie_id) = args.get("delete").and_then(|id| id.trim().parse::<i64>().ok()) {
        state.run(Event::RowAction {
            action: RowAction::Delete,
            movie_id,
        });
        state.run(Event::ConfirmDelete);
    }

    println!("{}", videotheque::ui::render_page(&state.app, &state.toasts));
    ExitCode::SUCCESS
}
