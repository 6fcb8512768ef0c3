//! End-to-end flows through the event handler, the api client and the renderer,
//! with an in-memory transport standing in for the server.

use std::collections::HashMap;
use std::sync::Mutex;

use videotheque::api::{
    ApiClient, CancellationToken, Channel, HttpReply, HttpRequest, Method, Transport,
};
use videotheque::app::forms::FieldEdit;
use videotheque::app::{RowAction, Toast};
use videotheque::domain::MovieRecord;
use videotheque::ui::{render_management, render_narrow, render_wide, select_layout, Layout};
use videotheque::{handle_event, initialize, Action, AppState, Config, Event, Result};

/// Replies from a fixed table keyed by path.
struct FakeServer {
    replies: HashMap<&'static str, (u16, String)>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl FakeServer {
    fn new() -> Self {
        Self {
            replies: HashMap::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn reply(mut self, path: &'static str, status: u16, body: &str) -> Self {
        self.replies.insert(path, (status, body.to_string()));
        self
    }
}

impl Transport for FakeServer {
    fn send(&self, request: &HttpRequest, _token: &CancellationToken) -> Result<HttpReply> {
        self.sent.lock().unwrap().push(request.clone());
        let (status, body) = self
            .replies
            .get(request.path.as_str())
            .cloned()
            .unwrap_or((404, r#"{"status":"404","error":"introuvable"}"#.to_string()));
        Ok(HttpReply { status, body })
    }
}

/// Feeds `event` and every completion it triggers through the handler.
fn run(state: &mut AppState, client: &ApiClient<FakeServer>, event: Event) -> Vec<Action> {
    let mut queue = vec![event];
    let mut seen = Vec::new();
    while let Some(event) = queue.pop() {
        let (_, actions) = handle_event(state, &event).unwrap();
        for action in actions {
            if let Action::Dispatch { ticket, request } = &action {
                let token = state.sequencer.token(*ticket);
                queue.insert(0, Event::Completed(client.handle_request(*ticket, request, &token)));
            }
            seen.push(action);
        }
    }
    seen
}

fn alien() -> MovieRecord {
    MovieRecord::new(1, "Alien", "Scott", "Horreur", "1979", 4)
}

const MANAGEMENT_ALIEN: &str = r#"{"status":"200","nb_movies":1,"movies":[
    {"id":1,"movie_name":"Alien","director":"Scott","category":"Horreur","year_of_creation":"1979","notation":4}
]}"#;

#[test]
fn alien_is_found_by_name_and_hidden_by_other_category() {
    let client = ApiClient::new(FakeServer::new().reply("/api/get-movies/gestions", 200, MANAGEMENT_ALIEN));
    let mut state = initialize(&Config::default());
    run(&mut state, &client, Event::OpenManagement);

    state.management.set_filter(Some("Toutes"), "alien");
    let ids: Vec<i64> = state.management.visible_records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);

    state.management.set_filter(Some("Drame"), "");
    assert!(state.management.visible_records().is_empty());

    let html = render_management(&state);
    assert_eq!(html.matches("AUCUN FILM").count(), 2, "one placeholder per table");
}

#[test]
fn count_label_reads_server_total() {
    let movies: Vec<String> = (1..=42)
        .map(|i| format!(r#"{{"id":{i},"movie_name":"Film {i}","category":"Drame","year_of_creation":"2000","notation":3}}"#))
        .collect();
    let body = format!(r#"{{"status":"200","nb_movies":"42","movies":[{}]}}"#, movies.join(","));
    let client = ApiClient::new(FakeServer::new().reply("/api/get-movies/gestions", 200, &body));
    let mut state = initialize(&Config::default());
    run(&mut state, &client, Event::OpenManagement);

    assert!(render_management(&state).contains(r#"<p id="nbTotalMovie">Nombre total de films : 42</p>"#));
}

#[test]
fn later_request_wins_when_it_completes_first() {
    let older = ApiClient::new(FakeServer::new().reply(
        "/api/get-movies/gestions",
        200,
        r#"{"status":"200","nb_movies":2,"movies":[
            {"id":1,"movie_name":"Ancien","category":"Drame","year_of_creation":"1950","notation":2},
            {"id":2,"movie_name":"Vieux","category":"Drame","year_of_creation":"1951","notation":2}]}"#,
    ));
    let newer = ApiClient::new(FakeServer::new().reply("/api/get-movies/gestions", 200, MANAGEMENT_ALIEN));
    let mut state = initialize(&Config::default());

    let (_, first) = handle_event(&mut state, &Event::OpenManagement).unwrap();
    let (_, second) = handle_event(&mut state, &Event::OpenManagement).unwrap();
    let (Action::Dispatch { ticket: t1, request: r1 }, Action::Dispatch { ticket: t2, request: r2 }) =
        (&first[0], &second[0])
    else {
        panic!("listing events must dispatch");
    };

    assert!(state.sequencer.token(*t1).is_cancelled());
    let done_second = newer.handle_request(*t2, r2, &state.sequencer.token(*t2));
    let done_first = older.handle_request(*t1, r1, &CancellationToken::default());

    handle_event(&mut state, &Event::Completed(done_second)).unwrap();
    handle_event(&mut state, &Event::Completed(done_first)).unwrap();

    let names: Vec<&str> = state
        .management
        .records()
        .iter()
        .map(|r| r.movie_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alien"]);
    assert_eq!(state.management.total_count(), Some(1));
}

#[test]
fn empty_lists_render_exactly_one_placeholder() {
    let theme = videotheque::Theme::default();
    for html in [render_wide(&[], &theme), render_narrow(&[], &theme)] {
        assert_eq!(html.matches("<tr").count(), 1);
        assert_eq!(html.matches("AUCUN FILM").count(), 1);
    }
}

#[test]
fn stars_always_total_five() {
    let theme = videotheque::Theme::default();
    for (rating, gold) in [(0u8, 0usize), (3, 3), (5, 5), (9, 5)] {
        let movie = MovieRecord::new(1, "Alien", "Scott", "Horreur", "1979", rating);
        let html = render_wide(&[&movie], &theme);
        assert_eq!(html.matches("star-gold").count(), gold, "rating {rating}");
        assert_eq!(html.matches("star-silver").count(), 5 - gold, "rating {rating}");
    }
}

#[test]
fn interpolated_fields_are_escaped() {
    let theme = videotheque::Theme::default();
    let movie = MovieRecord::new(1, r#"<img src=x onerror="alert(1)">"#, "A & B", "Horreur", "1979", 2);
    let html = render_narrow(&[&movie], &theme);
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img"));
    assert!(html.contains("A &amp; B"));
    assert!(html.contains("data-movie-name=\"&lt;img src=x onerror=&quot;alert(1)&quot;&gt;\""));
}

#[test]
fn layout_selection_is_idempotent() {
    for width in [320, 768, 769, 1920] {
        let once = select_layout(width, 768);
        assert_eq!(select_layout(width, 768), once);
    }
    assert_eq!(select_layout(768, 768), Layout::Narrow);

    let mut state = initialize(&Config::default());
    state.management.replace(vec![alien()], Some(1));
    state.resize(400);
    let first = render_management(&state);
    state.resize(400);
    assert_eq!(render_management(&state), first);
    assert!(first.contains(r#"id="smartphoneTable" class="table" style="display: table""#));
}

#[test]
fn unchanged_edit_never_reaches_the_server() {
    let server = FakeServer::new();
    let client = ApiClient::new(server);
    let mut state = initialize(&Config::default());

    let edit = FieldEdit {
        movie_id: 1,
        input_name: "year_of_creation".into(),
        original: "1979".into(),
        content: "1979".into(),
    };
    let actions = run(&mut state, &client, Event::SubmitFieldEdit(edit));

    assert_eq!(actions, vec![Action::ShowToast(Toast::success("Aucun changement détecté"))]);
}

#[test]
fn confirmed_delete_refetches_both_listings() {
    let server = FakeServer::new()
        .reply("/delete-movie", 200, r#"{"status":"200","message":"Film supprimé"}"#)
        .reply("/api/get-movies/gestions", 200, r#"{"status":"200","nb_movies":0,"movies":[]}"#)
        .reply("/api/get-movies/index", 200, r#"{"status":"200","data":{"movies":[]}}"#);
    let client = ApiClient::new(server);
    let mut state = initialize(&Config::default());
    state.management.replace(vec![alien()], Some(1));

    run(
        &mut state,
        &client,
        Event::RowAction {
            action: RowAction::Delete,
            movie_id: 1,
        },
    );
    let actions = run(&mut state, &client, Event::ConfirmDelete);

    let sent: Vec<(Method, String)> = client_sent(&client);
    assert_eq!(
        sent,
        vec![
            (Method::Delete, "/delete-movie".to_string()),
            (Method::Get, "/api/get-movies/gestions".to_string()),
            (Method::Get, "/api/get-movies/index".to_string()),
        ]
    );
    assert!(actions.contains(&Action::ShowToast(Toast::success("Film supprimé"))));
    assert!(state.management.records().is_empty());
    assert_eq!(state.management.count_label().as_deref(), Some("Nombre total de films : 0"));
    assert!(!state.sequencer.is_pending(Channel::IndexListing));
}

#[test]
fn server_error_keeps_list_and_reports_internal_error() {
    let client = ApiClient::new(FakeServer::new().reply(
        "/api/get-movies/gestions",
        500,
        r#"{"status":"500","error":"base indisponible"}"#,
    ));
    let mut state = initialize(&Config::default());
    state.management.replace(vec![alien()], Some(1));

    let actions = run(&mut state, &client, Event::OpenManagement);

    assert_eq!(state.management.records().len(), 1);
    assert!(actions.contains(&Action::ShowToast(Toast::danger(
        "Erreur interne du serveur : base indisponible"
    ))));
}

fn client_sent(client: &ApiClient<FakeServer>) -> Vec<(Method, String)> {
    client
        .transport()
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|r| (r.method, r.path.clone()))
        .collect()
}
