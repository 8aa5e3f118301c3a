#![allow(dead_code)]

use axum::Router;
use canvas_api::cache::Cache;
use canvas_api::client::Client;
use rusqlite::{Connection, params};
use tokio::net::TcpListener;
use url::Url;

const SAMPLE_SCHEMA: &str = r#"
CREATE TABLE users (name TEXT NOT NULL);
CREATE TABLE responses (
    url TEXT NOT NULL,
    user TEXT NOT NULL,
    response TEXT NOT NULL
);
"#;

/// An in-memory cache with the sample-data schema and no rows.
pub fn empty_cache() -> Cache {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SAMPLE_SCHEMA).unwrap();
    Cache::from_connection(conn).unwrap()
}

/// An in-memory cache seeded with identities and (url, user, response)
/// rows, mimicking the course-provided sample database.
pub fn seeded_cache(users: &[&str], rows: &[(&str, &str, &str)]) -> Cache {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SAMPLE_SCHEMA).unwrap();
    for user in users {
        conn.execute("INSERT INTO users (name) VALUES (?1)", params![user])
            .unwrap();
    }
    for (url, user, response) in rows {
        conn.execute(
            "INSERT INTO responses (url, user, response) VALUES (?1, ?2, ?3)",
            params![url, user, response],
        )
        .unwrap();
    }
    Cache::from_connection(conn).unwrap()
}

/// Serves a mock Canvas API on a random port. The router is built after
/// binding so handlers can hand out absolute next-page links under the
/// returned base URL.
pub async fn spawn_api<F>(make_router: F) -> Url
where
    F: FnOnce(&Url) -> Router,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = Url::parse(&format!("http://{addr}/api/v1/")).unwrap();

    let app = make_router(&base);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    base
}

/// A client pointed at a mock API, with an empty cache.
pub fn client(base: Url) -> Client {
    Client::new(base, empty_cache()).unwrap()
}

/// A client whose base URL refuses connections, proving that any
/// successful fetch came from the cache alone.
pub fn unroutable_client(cache: Cache) -> Client {
    let base = Url::parse("http://127.0.0.1:9/api/v1/").unwrap();
    Client::new(base, cache).unwrap()
}
