//! Database schema management.

use rusqlite::Connection;
use tokio_rusqlite::Error;

/// Initialize the database schema.
pub fn init_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- Snapshots; sequence breaks created_at ties
CREATE TABLE IF NOT EXISTS snapshots (
    sequence INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    site_id TEXT NOT NULL,
    url TEXT NOT NULL,
    viewport_width INTEGER NOT NULL,
    viewport_height INTEGER NOT NULL,
    image BLOB NOT NULL,
    image_format TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS snapshot_elements (
    snapshot_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    selector TEXT NOT NULL,
    box_top REAL NOT NULL,
    box_left REAL NOT NULL,
    box_bottom REAL NOT NULL,
    box_right REAL NOT NULL,
    PRIMARY KEY (snapshot_id, position),
    UNIQUE (snapshot_id, selector),
    FOREIGN KEY (snapshot_id) REFERENCES snapshots(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS heatmaps (
    sequence INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    site_id TEXT NOT NULL,
    snapshot_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS heatmap_points (
    heatmap_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    x REAL NOT NULL,
    y REAL NOT NULL,
    weight INTEGER NOT NULL,
    PRIMARY KEY (heatmap_id, position),
    FOREIGN KEY (heatmap_id) REFERENCES heatmaps(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_snapshots_site ON snapshots(site_id, created_at, sequence);
CREATE INDEX IF NOT EXISTS idx_heatmaps_site ON heatmaps(site_id, sequence);
"#;
