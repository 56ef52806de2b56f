//! SQLite [`DocumentStore`] implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use tokio_rusqlite::Connection;
use tracing::debug;

use stracked_protocols::{DocumentStore, Heatmap, HeatmapPoint, Snapshot, SnapshotKey, StoreError};

use crate::rows::{ElementRow, HeatmapRow, SnapshotRow, timestamp};
use crate::schema::init_schema;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// SQLite-based document store.
pub struct SqliteDocumentStore {
    conn: Connection,
}

fn query_error(e: tokio_rusqlite::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

impl SqliteDocumentStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Self::init(conn).await
    }

    /// Open (or create) a file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(query_error)?;
        Ok(Self { conn })
    }
}

const SELECT_SNAPSHOT: &str = "SELECT id, site_id, url, viewport_width, viewport_height, image, image_format, created_at
     FROM snapshots";

fn read_snapshot(conn: &rusqlite::Connection, sql: &str, arg: &str) -> rusqlite::Result<Option<SnapshotRow>> {
    let row = conn
        .query_row(sql, [arg], |row| {
            Ok(SnapshotRow {
                id: row.get(0)?,
                site_id: row.get(1)?,
                url: row.get(2)?,
                viewport_width: row.get(3)?,
                viewport_height: row.get(4)?,
                image: row.get(5)?,
                image_format: row.get(6)?,
                created_at: row.get(7)?,
                elements: Vec::new(),
            })
        })
        .optional()?;

    let Some(mut row) = row else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT selector, box_top, box_left, box_bottom, box_right
         FROM snapshot_elements WHERE snapshot_id = ?1 ORDER BY position",
    )?;
    row.elements = stmt
        .query_map([&row.id], |r| {
            Ok(ElementRow {
                selector: r.get(0)?,
                top: r.get(1)?,
                left: r.get(2)?,
                bottom: r.get(3)?,
                right: r.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(row))
}

fn read_points(conn: &rusqlite::Connection, heatmap_id: &str) -> rusqlite::Result<Vec<HeatmapPoint>> {
    let mut stmt = conn.prepare(
        "SELECT x, y, weight FROM heatmap_points WHERE heatmap_id = ?1 ORDER BY position",
    )?;
    stmt.query_map([heatmap_id], |r| Ok(HeatmapPoint::new(r.get(0)?, r.get(1)?, r.get(2)?)))?
        .collect()
}

fn read_heatmaps(conn: &rusqlite::Connection, sql: &str, site_id: &str) -> rusqlite::Result<Vec<HeatmapRow>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt
        .query_map([site_id], |r| {
            Ok(HeatmapRow {
                id: r.get(0)?,
                site_id: r.get(1)?,
                snapshot_id: r.get(2)?,
                created_at: r.get(3)?,
                points: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for row in &mut rows {
        row.points = read_points(conn, &row.id)?;
    }
    Ok(rows)
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn save_snapshot(&self, snapshot: Snapshot) -> Result<SnapshotKey, StoreError> {
        let id = snapshot.id().to_string();
        let created_at = snapshot.created_at();
        let created = timestamp(created_at);

        let id_clone = id.clone();
        let sequence = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM snapshots WHERE id = ?1)",
                    [&id_clone],
                    |row| row.get(0),
                )?;
                if exists {
                    return Ok(None);
                }

                let viewport = snapshot.viewport();
                let image: &[u8] = snapshot.image();
                tx.execute(
                    "INSERT INTO snapshots (id, site_id, url, viewport_width, viewport_height, image, image_format, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        id_clone,
                        snapshot.site_id(),
                        snapshot.url(),
                        viewport.width,
                        viewport.height,
                        image,
                        snapshot.image_format().as_str(),
                        created
                    ],
                )?;
                let sequence = tx.last_insert_rowid();

                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO snapshot_elements (snapshot_id, position, selector, box_top, box_left, box_bottom, box_right)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    )?;
                    for (position, element) in snapshot.elements().iter().enumerate() {
                        let b = element.bounding_box;
                        stmt.execute(params![
                            id_clone,
                            position as i64,
                            element.selector.as_str(),
                            b.top,
                            b.left,
                            b.bottom,
                            b.right
                        ])?;
                    }
                }

                tx.commit()?;
                Ok(Some(sequence))
            })
            .await
            .map_err(query_error)?
            .ok_or_else(|| StoreError::Duplicate(id.clone()))?;

        debug!("Saved snapshot {} (sequence {})", id, sequence);

        Ok(SnapshotKey {
            created_at,
            sequence: sequence as u64,
        })
    }

    async fn latest_snapshot(&self, site_id: &str) -> Result<Option<Arc<Snapshot>>, StoreError> {
        let site_id = site_id.to_string();
        let row = self
            .conn
            .call(move |conn| {
                let sql = format!(
                    "{} WHERE site_id = ?1 ORDER BY created_at DESC, sequence DESC LIMIT 1",
                    SELECT_SNAPSHOT
                );
                Ok(read_snapshot(conn, &sql, &site_id)?)
            })
            .await
            .map_err(query_error)?;

        row.map(|r| r.into_snapshot().map(Arc::new)).transpose()
    }

    async fn save_heatmap(&self, heatmap: Heatmap) -> Result<(), StoreError> {
        let id = heatmap.id().to_string();
        let created = timestamp(heatmap.created_at());

        let id_clone = id.clone();
        let saved = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM heatmaps WHERE id = ?1)",
                    [&id_clone],
                    |row| row.get(0),
                )?;
                if exists {
                    return Ok(false);
                }

                tx.execute(
                    "INSERT INTO heatmaps (id, site_id, snapshot_id, created_at) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        id_clone,
                        heatmap.site_id(),
                        heatmap.snapshot_id().to_string(),
                        created
                    ],
                )?;

                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO heatmap_points (heatmap_id, position, x, y, weight)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                    )?;
                    for (position, point) in heatmap.points().iter().enumerate() {
                        stmt.execute(params![id_clone, position as i64, point.x, point.y, point.weight])?;
                    }
                }

                tx.commit()?;
                Ok(true)
            })
            .await
            .map_err(query_error)?;

        if !saved {
            return Err(StoreError::Duplicate(id));
        }

        debug!("Saved heatmap {}", id);
        Ok(())
    }

    async fn latest_heatmap(&self, site_id: &str) -> Result<Option<Heatmap>, StoreError> {
        let site_id = site_id.to_string();
        let rows = self
            .conn
            .call(move |conn| {
                Ok(read_heatmaps(
                    conn,
                    "SELECT id, site_id, snapshot_id, created_at FROM heatmaps
                     WHERE site_id = ?1 ORDER BY sequence DESC LIMIT 1",
                    &site_id,
                )?)
            })
            .await
            .map_err(query_error)?;

        rows.into_iter().next().map(HeatmapRow::into_heatmap).transpose()
    }

    async fn heatmaps(&self, site_id: &str) -> Result<Vec<Heatmap>, StoreError> {
        let site_id = site_id.to_string();
        let rows = self
            .conn
            .call(move |conn| {
                Ok(read_heatmaps(
                    conn,
                    "SELECT id, site_id, snapshot_id, created_at FROM heatmaps
                     WHERE site_id = ?1 ORDER BY sequence ASC",
                    &site_id,
                )?)
            })
            .await
            .map_err(query_error)?;

        rows.into_iter().map(HeatmapRow::into_heatmap).collect()
    }
}
