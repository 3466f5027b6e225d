//! Folder operations

use super::{encode_timestamp, now, timestamp_column, Store};
use crate::error::{Error, Result};
use crate::models::{Entity, Folder, FolderInput};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_FOLDER: &str =
    "INSERT INTO folders (name, parent_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)";
const SELECT_FOLDER: &str =
    "SELECT id, name, parent_id, created_at, updated_at FROM folders WHERE id = ?1";
const SELECT_FOLDERS: &str =
    "SELECT id, name, parent_id, created_at, updated_at FROM folders ORDER BY name ASC, id ASC";
const UPDATE_FOLDER: &str =
    "UPDATE folders SET name = ?1, parent_id = ?2, updated_at = ?3 WHERE id = ?4";
const DELETE_FOLDER: &str = "DELETE FROM folders WHERE id = ?1";

impl Store {
    /// Insert a folder and return it as persisted, with its server-assigned
    /// id and timestamps. An unknown `parent_id` fails with a storage error.
    pub async fn create_folder(&self, input: FolderInput) -> Result<Folder> {
        tracing::info!(name = %input.name, "Creating folder");

        self.run(move |conn| {
            let created_at = encode_timestamp(now());
            conn.execute(INSERT_FOLDER, params![input.name, input.parent_id, created_at])
                .map_err(|err| {
                    tracing::error!(error = %err, "Failed to create folder");
                    err
                })?;
            let id = conn.last_insert_rowid();
            select_folder(conn, id)
        })
        .await
    }

    pub async fn get_folder(&self, id: i64) -> Result<Folder> {
        self.run(move |conn| select_folder(conn, id)).await
    }

    /// All folders ordered by name. Empty when there are none.
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(SELECT_FOLDERS)?;
            let rows = stmt.query_map([], folder_from_row)?;
            let folders = rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|err| {
                tracing::error!(error = %err, "Failed to list folders");
                err
            })?;
            Ok(folders)
        })
        .await
    }

    /// Replace name and parent, refreshing `updated_at`.
    pub async fn update_folder(&self, id: i64, input: FolderInput) -> Result<()> {
        tracing::info!(id, "Updating folder");

        self.run(move |conn| {
            let updated_at = encode_timestamp(now());
            let affected = conn
                .execute(UPDATE_FOLDER, params![input.name, input.parent_id, updated_at, id])
                .map_err(|err| {
                    tracing::error!(id, error = %err, "Failed to update folder");
                    err
                })?;
            if affected == 0 {
                return Err(Error::NotFound(Entity::Folder));
            }
            Ok(())
        })
        .await
    }

    /// Delete a folder. Descendant folders go with it; requests filed under
    /// any deleted folder are kept with `folder_id` cleared.
    pub async fn delete_folder(&self, id: i64) -> Result<()> {
        tracing::info!(id, "Deleting folder");

        self.run(move |conn| {
            let affected = conn.execute(DELETE_FOLDER, params![id]).map_err(|err| {
                tracing::error!(id, error = %err, "Failed to delete folder");
                err
            })?;
            if affected == 0 {
                return Err(Error::NotFound(Entity::Folder));
            }
            Ok(())
        })
        .await
    }
}

fn select_folder(conn: &Connection, id: i64) -> Result<Folder> {
    conn.query_row(SELECT_FOLDER, params![id], folder_from_row)
        .optional()
        .map_err(|err| {
            tracing::error!(id, error = %err, "Failed to get folder");
            err
        })?
        .ok_or(Error::NotFound(Entity::Folder))
}

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
        updated_at: timestamp_column(row, 4)?,
    })
}
