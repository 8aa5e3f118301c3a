use std::collections::HashSet;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};
use serde_json::Value;
use tracing::debug;

use crate::creds::Credential;
use crate::endpoint::Endpoint;
use crate::error::{CanvasError, Result};

/// Read-only store of sample API responses, keyed by
/// (normalized endpoint, normalized credential). Opened once at startup;
/// the set of identities present in the store is preloaded so callers can
/// decide between cache lookup and live fetch without touching the
/// database again.
#[derive(Debug)]
pub struct Cache {
    conn: Connection,
    users: HashSet<String>,
}

impl Cache {
    /// Opens the cache database. A missing or unreadable file is fatal:
    /// nothing else in the process can work without the sample data.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CanvasError::Setup {
                reason: format!(
                    "could not find `{}`; make sure the sample data file is \
                     in the working directory (spelling matters)",
                    path.display()
                ),
            });
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|err| CanvasError::Setup {
                reason: format!("could not read `{}`: {err}", path.display()),
            })?;
        Self::from_connection(conn)
    }

    /// Builds a cache over an already-open connection. Used by `open` and
    /// by tests seeding an in-memory database.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let users = Self::load_users(&conn)?;
        debug!(identities = users.len(), "preloaded cache identities");
        Ok(Self { conn, users })
    }

    fn load_users(conn: &Connection) -> Result<HashSet<String>> {
        let mut stmt = conn.prepare("SELECT name FROM users").map_err(setup)?;
        let users = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(setup)?
            .map(|name| name.map(|name| name.to_lowercase()))
            .collect::<rusqlite::Result<_>>()
            .map_err(setup)?;
        Ok(users)
    }

    /// Whether this credential names one of the cached test identities.
    /// Case-insensitive.
    pub fn is_known_identity(&self, credential: &Credential) -> bool {
        self.users.contains(&credential.normalized())
    }

    /// Returns the stored JSON document for this (endpoint, credential)
    /// pair, if the store has one.
    pub fn lookup(&self, endpoint: &Endpoint, credential: &Credential) -> Result<Option<Value>> {
        let mut stmt = self
            .conn
            .prepare("SELECT response FROM responses WHERE url = ?1 AND user = ?2")
            .map_err(setup)?;
        let mut rows = stmt
            .query(params![endpoint.as_str(), credential.normalized()])
            .map_err(setup)?;

        match rows.next().map_err(setup)? {
            Some(row) => {
                let raw: String = row.get(0).map_err(setup)?;
                let document =
                    serde_json::from_str(&raw).map_err(|source| CanvasError::Decode {
                        endpoint: endpoint.to_string(),
                        source,
                    })?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }
}

fn setup(err: rusqlite::Error) -> CanvasError {
    CanvasError::Setup {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn seeded() -> Cache {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE users (name TEXT NOT NULL);
            CREATE TABLE responses (
                url TEXT NOT NULL,
                user TEXT NOT NULL,
                response TEXT NOT NULL
            );
            INSERT INTO users (name) VALUES ('hermione'), ('ron');
            INSERT INTO responses (url, user, response) VALUES
                ('courses', 'hermione', '[{"id": 101, "name": "Potions", "workflow_state": "available"}]'),
                ('users/self/profile', 'ron', '{"id": 7, "name": "Ron Weasley", "primary_email": "ron@hogwarts.edu"}');
            "#,
        )
        .unwrap();
        Cache::from_connection(conn).unwrap()
    }

    fn endpoint(path: &str) -> Endpoint {
        Endpoint::new(path).unwrap()
    }

    fn credential(token: &str) -> Credential {
        Credential::new(token).unwrap()
    }

    #[test]
    fn identities_are_case_insensitive() {
        let cache = seeded();
        assert!(cache.is_known_identity(&credential("hermione")));
        assert!(cache.is_known_identity(&credential("Hermione")));
        assert!(!cache.is_known_identity(&credential("draco")));
    }

    #[test]
    fn lookup_returns_stored_document() {
        let cache = seeded();
        let document = cache
            .lookup(&endpoint("courses"), &credential("hermione"))
            .unwrap()
            .unwrap();
        assert_eq!(
            document,
            json!([{"id": 101, "name": "Potions", "workflow_state": "available"}])
        );
    }

    #[test]
    fn lookup_misses_for_unseeded_pair() {
        let cache = seeded();
        let document = cache
            .lookup(&endpoint("courses"), &credential("ron"))
            .unwrap();
        assert!(document.is_none());
    }

    #[test]
    fn open_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Cache::open(&dir.path().join("no_such.db"));
        assert!(matches!(result, Err(CanvasError::Setup { .. })));
    }

    #[test]
    fn open_fails_for_unreadable_store() {
        // sqlite accepts the file lazily; the identity preload is what
        // trips over a file that is not a database.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample_canvas_data.db");
        std::fs::write(&path, "not a sqlite database").unwrap();

        let result = Cache::open(&path);
        assert!(matches!(result, Err(CanvasError::Setup { .. })));
    }
}
