//! Saved request operations

use super::{encode_timestamp, headers, now, timestamp_column, Store};
use crate::error::{Error, Result};
use crate::models::{Entity, Request, RequestInput};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_REQUEST: &str = "INSERT INTO requests
    (name, folder_id, method, url, headers, body, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";
const SELECT_REQUEST: &str = "SELECT id, name, folder_id, method, url, headers, body,
    created_at, updated_at FROM requests WHERE id = ?1";
const SELECT_REQUESTS: &str = "SELECT id, name, folder_id, method, url, headers, body,
    created_at, updated_at FROM requests ORDER BY updated_at DESC, id DESC";
const UPDATE_REQUEST: &str = "UPDATE requests
    SET name = ?1, folder_id = ?2, method = ?3, url = ?4, headers = ?5, body = ?6, updated_at = ?7
    WHERE id = ?8";
const DELETE_REQUEST: &str = "DELETE FROM requests WHERE id = ?1";

/// A row as stored, before the header column is decoded.
struct RequestRow {
    id: i64,
    name: String,
    folder_id: Option<i64>,
    method: String,
    url: String,
    headers: Option<String>,
    body: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RequestRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            folder_id: row.get(2)?,
            method: row.get(3)?,
            url: row.get(4)?,
            headers: row.get(5)?,
            body: row.get(6)?,
            created_at: timestamp_column(row, 7)?,
            updated_at: timestamp_column(row, 8)?,
        })
    }

    fn into_request(self) -> Result<Request> {
        Ok(Request {
            headers: headers::decode(self.headers.as_deref())?,
            id: self.id,
            name: self.name,
            folder_id: self.folder_id,
            method: self.method,
            url: self.url,
            body: self.body.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl Store {
    /// Insert a saved request and return it as persisted, headers decoded
    /// back from storage.
    pub async fn create_request(&self, input: RequestInput) -> Result<Request> {
        tracing::info!(name = %input.name, "Creating request");
        let encoded_headers = headers::encode(&input.headers)?;

        self.run(move |conn| {
            let created_at = encode_timestamp(now());
            conn.execute(
                INSERT_REQUEST,
                params![
                    input.name,
                    input.folder_id,
                    input.method,
                    input.url,
                    encoded_headers,
                    input.body,
                    created_at,
                ],
            )
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to create request");
                err
            })?;
            let id = conn.last_insert_rowid();
            select_request(conn, id)
        })
        .await
    }

    pub async fn get_request(&self, id: i64) -> Result<Request> {
        self.run(move |conn| select_request(conn, id)).await
    }

    /// All saved requests, most recently updated first. Fails as a whole if
    /// any row carries an undecodable header column.
    pub async fn list_requests(&self) -> Result<Vec<Request>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(SELECT_REQUESTS)?;
            let rows = stmt
                .query_map([], RequestRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|err| {
                    tracing::error!(error = %err, "Failed to list requests");
                    err
                })?;
            rows.into_iter().map(RequestRow::into_request).collect()
        })
        .await
    }

    /// Replace every caller-owned field, refreshing `updated_at`.
    pub async fn update_request(&self, id: i64, input: RequestInput) -> Result<()> {
        tracing::info!(id, "Updating request");
        let encoded_headers = headers::encode(&input.headers)?;

        self.run(move |conn| {
            let updated_at = encode_timestamp(now());
            let affected = conn
                .execute(
                    UPDATE_REQUEST,
                    params![
                        input.name,
                        input.folder_id,
                        input.method,
                        input.url,
                        encoded_headers,
                        input.body,
                        updated_at,
                        id,
                    ],
                )
                .map_err(|err| {
                    tracing::error!(id, error = %err, "Failed to update request");
                    err
                })?;
            if affected == 0 {
                return Err(Error::NotFound(Entity::Request));
            }
            Ok(())
        })
        .await
    }

    pub async fn delete_request(&self, id: i64) -> Result<()> {
        tracing::info!(id, "Deleting request");

        self.run(move |conn| {
            let affected = conn.execute(DELETE_REQUEST, params![id]).map_err(|err| {
                tracing::error!(id, error = %err, "Failed to delete request");
                err
            })?;
            if affected == 0 {
                return Err(Error::NotFound(Entity::Request));
            }
            Ok(())
        })
        .await
    }
}

fn select_request(conn: &Connection, id: i64) -> Result<Request> {
    conn.query_row(SELECT_REQUEST, params![id], RequestRow::from_row)
        .optional()
        .map_err(|err| {
            tracing::error!(id, error = %err, "Failed to get request");
            err
        })?
        .ok_or(Error::NotFound(Entity::Request))?
        .into_request()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{FolderInput, Headers};
    use std::time::Duration;

    fn store() -> Store {
        Store::open_in_memory().expect("store initializes")
    }

    #[tokio::test]
    async fn headers_round_trip() {
        let store = store();
        let input = RequestInput::new("Create user", "POST", "https://api.example.com/users")
            .header("Content-Type", "application/json")
            .header("X-Test", "true")
            .body(r#"{"name":"ada"}"#);

        let created = store.create_request(input).await.expect("create ok");
        let fetched = store.get_request(created.id).await.expect("get ok");

        let expected: Headers = [
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-Test".to_string(), "true".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(fetched.headers, expected);
        assert_eq!(fetched.body, r#"{"name":"ada"}"#);
        assert_eq!(fetched.method, "POST");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn empty_headers_are_stored_as_object_and_read_back_empty() {
        let store = store();
        let created = store
            .create_request(RequestInput::new("bare", "GET", "http://localhost"))
            .await
            .expect("create ok");
        assert!(created.headers.is_empty());

        let raw: Option<String> = store
            .with_transaction(move |tx| {
                Ok(tx.query_row(
                    "SELECT headers FROM requests WHERE id = ?1",
                    [created.id],
                    |row| row.get(0),
                )?)
            })
            .await
            .expect("raw read");
        assert_eq!(raw.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn null_or_empty_stored_headers_read_as_empty_map() {
        let store = store();
        let ids = store
            .with_transaction(|tx| {
                let mut ids = Vec::new();
                for headers in [None, Some("")] {
                    tx.execute(
                        "INSERT INTO requests (name, method, url, headers, body, created_at, updated_at)
                         VALUES ('legacy', 'GET', 'http://x', ?1, NULL, ?2, ?2)",
                        params![headers, encode_timestamp(now())],
                    )?;
                    ids.push(tx.last_insert_rowid());
                }
                Ok(ids)
            })
            .await
            .expect("insert");

        for id in ids {
            let request = store.get_request(id).await.expect("get ok");
            assert!(request.headers.is_empty());
            assert_eq!(request.body, "");
        }
        for request in store.list_requests().await.expect("list ok") {
            assert!(request.headers.is_empty());
        }
    }

    #[tokio::test]
    async fn malformed_stored_headers_fail_the_list() {
        let store = store();
        store
            .create_request(RequestInput::new("good", "GET", "http://x"))
            .await
            .unwrap();
        store
            .with_transaction(|tx| {
                tx.execute(
                    "INSERT INTO requests (name, method, url, headers, body, created_at, updated_at)
                     VALUES ('bad', 'GET', 'http://x', '{not json', '', ?1, ?1)",
                    [encode_timestamp(now())],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let err = store.list_requests().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn missing_request_is_not_found() {
        let store = store();
        for err in [
            store.get_request(9999).await.unwrap_err(),
            store
                .update_request(9999, RequestInput::new("ghost", "GET", "http://x"))
                .await
                .unwrap_err(),
            store.delete_request(9999).await.unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert_eq!(err.to_string(), "request not found");
        }
    }

    #[tokio::test]
    async fn list_orders_by_most_recent_update() {
        let store = store();
        assert!(store.list_requests().await.expect("list ok").is_empty());

        let first = store
            .create_request(RequestInput::new("first", "GET", "http://x/1"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = store
            .create_request(RequestInput::new("second", "GET", "http://x/2"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let third = store
            .create_request(RequestInput::new("third", "GET", "http://x/3"))
            .await
            .unwrap();

        let order: Vec<_> = store
            .list_requests()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(order, [third.id, second.id, first.id]);

        tokio::time::sleep(Duration::from_millis(2)).await;
        store
            .update_request(first.id, RequestInput::new("first, edited", "GET", "http://x/1"))
            .await
            .unwrap();

        let order: Vec<_> = store
            .list_requests()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(order, [first.id, third.id, second.id]);
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_replaces_fields() {
        let store = store();
        let folder = store.create_folder(FolderInput::new("api")).await.unwrap();
        let created = store
            .create_request(RequestInput::new("r", "get", "http://x").header("A", "1"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2)).await;
        store
            .update_request(
                created.id,
                RequestInput::new("r2", "PUT", "https://y")
                    .in_folder(folder.id)
                    .body("payload"),
            )
            .await
            .expect("update ok");

        let updated = store.get_request(created.id).await.unwrap();
        assert_eq!(updated.name, "r2");
        assert_eq!(updated.method, "PUT");
        assert_eq!(updated.url, "https://y");
        assert_eq!(updated.folder_id, Some(folder.id));
        assert!(updated.headers.is_empty());
        assert_eq!(updated.body, "payload");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn method_is_stored_as_given() {
        let store = store();
        let created = store
            .create_request(RequestInput::new("lower", "patch", "http://x"))
            .await
            .unwrap();
        assert_eq!(created.method, "patch");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = store();
        let created = store
            .create_request(RequestInput::new("gone", "GET", "http://x"))
            .await
            .unwrap();

        store.delete_request(created.id).await.expect("delete ok");

        let err = store.get_request(created.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.list_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_folder_is_a_storage_error() {
        let err = store()
            .create_request(RequestInput::new("r", "GET", "http://x").in_folder(404))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
