//! End-to-end tests: feed served over HTTP, state kept in a SQLite file,
//! board rendered through the plain-text sink.

use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tldr_board::config::Config;
use tldr_board::controller::{LoadState, RenderSink, Screen, StateController, LOAD_ERROR_MESSAGE};
use tldr_board::digest::DigestView;
use tldr_board::feed::{build_client, FeedSource};
use tldr_board::storage::{Database, LIKED_IDS_KEY, READ_IDS_KEY};
use tldr_board::ui::PlainTextSink;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"{
    "updated_at": "2026-10-18T07:00:00+00:00",
    "items": [
        {"id": "m1", "theme": "Misc", "title": "Misc story"},
        {"id": "a1", "theme": "AI", "title": "AI story one", "source": "TLDR AI", "date": "2026-10-17"},
        {"id": "u1", "theme": "Crypto", "title": "Unlisted one"},
        {"id": "a2", "theme": "AI", "title": "AI story two", "summary": "Second"},
        {"id": "n1", "title": "No theme"}
    ]
}"#;

#[derive(Default)]
struct Recorder {
    screens: Vec<Screen>,
}

impl RenderSink for Recorder {
    fn present(&mut self, screen: &Screen) {
        self.screens.push(screen.clone());
    }
}

impl Recorder {
    fn digest(&self) -> &DigestView {
        match self.screens.last() {
            Some(Screen::Digest(view)) => view,
            other => panic!("Expected digest, got {:?}", other),
        }
    }
}

fn temp_db_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tldr_board_it_{}", name));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("state.db");
    let _ = std::fs::remove_file(&path);
    path
}

async fn serve(body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tldr.json"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn source(server: &MockServer) -> FeedSource {
    FeedSource::Http(Url::parse(&format!("{}/tldr.json", server.uri())).unwrap())
}

async fn controller<S: RenderSink>(
    db: Database,
    server: &MockServer,
    sink: S,
) -> StateController<S> {
    let client = build_client(Duration::from_secs(5)).unwrap();
    StateController::new(db, client, source(server), &Config::default(), sink)
}

fn themes(view: &DigestView) -> Vec<&str> {
    view.categories().iter().map(|c| c.theme.as_str()).collect()
}

#[tokio::test]
async fn test_initial_load_orders_and_counts() {
    let server = serve(FEED, 200).await;
    let db = Database::open(":memory:").await.unwrap();
    let mut c = controller(db, &server, Recorder::default()).await;

    c.refresh().await;

    assert_eq!(c.load_state(), LoadState::Rendered);
    let view = c.sink().digest();
    assert_eq!(themes(view), vec!["AI", "Misc", "Crypto", "General"]);
    assert_eq!(view.header.unread_count, 5);
    assert_eq!(view.header.updated_label, "Oct 18, 2026");

    let ai = &view.categories()[0];
    assert_eq!(ai.tiles[0].display_tag, "TLDR AI");
    assert_eq!(ai.tiles[0].display_date, "Oct 17, 2026");
    assert_eq!(ai.tiles[1].display_tag, "TLDR");
    assert_eq!(ai.tiles[1].summary, "Second");
}

#[tokio::test]
async fn test_state_survives_restart() {
    let server = serve(FEED, 200).await;
    let db_path = temp_db_path("restart");
    let db_str = db_path.to_str().unwrap().to_string();

    {
        let db = Database::open(&db_str).await.unwrap();
        let mut c = controller(db, &server, Recorder::default()).await;
        c.refresh().await;
        c.mark_read("a1").await;
        c.toggle_liked("m1").await;
        assert_eq!(c.sink().digest().header.unread_count, 4);
    }

    let db = Database::open(&db_str).await.unwrap();
    assert_eq!(
        db.get_value(READ_IDS_KEY).await.unwrap().as_deref(),
        Some("[\"a1\"]")
    );
    assert_eq!(
        db.get_value(LIKED_IDS_KEY).await.unwrap().as_deref(),
        Some("[\"m1\"]")
    );

    let mut c = controller(db, &server, Recorder::default()).await;
    c.refresh().await;
    let view = c.sink().digest();
    assert_eq!(view.header.unread_count, 4);
    assert_eq!(view.categories()[0].tiles.len(), 1);
    assert_eq!(view.categories()[0].tile_count, 2);
    assert!(view.categories()[1].tiles[0].is_liked);

    std::fs::remove_dir_all(db_path.parent().unwrap()).ok();
}

#[tokio::test]
async fn test_corrupt_stored_sets_are_treated_as_empty() {
    let server = serve(FEED, 200).await;
    let db = Database::open(":memory:").await.unwrap();
    db.set_value(READ_IDS_KEY, "{not json").await.unwrap();
    db.set_value(LIKED_IDS_KEY, "{\"a1\": true}").await.unwrap();

    let mut c = controller(db, &server, Recorder::default()).await;
    c.refresh().await;

    let view = c.sink().digest();
    assert_eq!(view.header.unread_count, 5);
    assert!(view.visible_tiles().all(|(_, t)| !t.is_liked));
}

#[tokio::test]
async fn test_server_error_shows_error_placeholder() {
    let server = serve("oops", 503).await;
    let db = Database::open(":memory:").await.unwrap();
    let mut c = controller(db, &server, Recorder::default()).await;

    c.refresh().await;

    assert_eq!(c.load_state(), LoadState::Error);
    assert_eq!(
        c.sink().screens,
        vec![Screen::Loading, Screen::Error(LOAD_ERROR_MESSAGE.to_string())]
    );
}

#[tokio::test]
async fn test_archive_toggle_refetches_and_reveals_read_tiles() {
    let server = serve(FEED, 200).await;
    let db = Database::open(":memory:").await.unwrap();
    let mut c = controller(db, &server, Recorder::default()).await;

    c.refresh().await;
    c.mark_read("u1").await;
    assert!(c.sink().digest().categories()[2].tiles.is_empty());

    c.toggle_show_archived().await;
    assert_eq!(c.archive_toggle_label(), "Hide archived");
    let crypto = &c.sink().digest().categories()[2];
    assert_eq!(crypto.tiles.len(), 1);
    assert_eq!(crypto.tiles[0].read_label(), "Archived");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.url.query_pairs().any(|(k, _)| k == "v")));
}

#[tokio::test]
async fn test_empty_feed_prints_placeholder() {
    let server = serve(r#"{"updated_at": null, "items": []}"#, 200).await;
    let db = Database::open(":memory:").await.unwrap();
    let mut c = controller(db, &server, PlainTextSink::new(Vec::new())).await;

    c.refresh().await;

    let mut sink = std::mem::replace(c.sink_mut(), PlainTextSink::new(Vec::new()));
    assert!(sink.take_error().is_none());
    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        out,
        "TLDR Board | Updated — | 0 unread\n\nNo TLDR emails yet. Check back tomorrow.\n"
    );
}

#[tokio::test]
async fn test_file_source_loads_without_network() {
    let dir = std::env::temp_dir().join("tldr_board_it_file_source");
    std::fs::create_dir_all(&dir).unwrap();
    let feed_path = dir.join("tldr.json");
    std::fs::write(&feed_path, FEED).unwrap();

    let db = Database::open(":memory:").await.unwrap();
    let client = build_client(Duration::from_secs(5)).unwrap();
    let source = FeedSource::parse(feed_path.to_str().unwrap()).unwrap();
    let mut c = StateController::new(db, client, source, &Config::default(), Recorder::default());

    c.refresh().await;
    assert_eq!(c.sink().digest().visible_count(), 5);

    std::fs::remove_dir_all(&dir).ok();
}
