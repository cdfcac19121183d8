//! # Playlist Store
//!
//! `SQLite`-backed persistence for imported playlists. Playlists arrive as
//! JSON exports, get written into two tables (`playlist` and `track`), and
//! are loaded back whole for a game. Track order within a playlist is
//! preserved through an explicit `position` column; the session shuffles its
//! own in-memory copy, never the stored rows.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rusqlite::Connection;

use crate::model::{Playlist, Track};

/// One row of `list_playlists` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub num_tracks: u32,
}

/// Connect to the store. If the DB doesn't exist, create it. Always in the
/// same location, same name. Returns `rusqlite::Connection`.
pub fn connect(data_dir: &Path) -> Result<Connection> {
    let db_dir = data_dir.join("maestro");
    fs::create_dir_all(&db_dir)
        .with_context(|| format!("Failed to create data directory {}", db_dir.display()))?;

    let conn = Connection::open(db_dir.join("playlists.db3"))
        .with_context(|| format!("Rusqlite DB connection refused. DB location: {data_dir:?}"))?;

    init(&conn)?;
    Ok(conn)
}

/// Create the schema. Idempotent, runs on every connect.
fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS playlist (
            id   TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS track (
            id          TEXT    NOT NULL,
            playlist_id TEXT    NOT NULL REFERENCES playlist(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT    NOT NULL,
            artists     TEXT    NOT NULL,
            album       TEXT    NOT NULL,
            popularity  INTEGER NOT NULL,
            preview_url TEXT    NOT NULL,
            duration_ms INTEGER NOT NULL,
            PRIMARY KEY (playlist_id, position)
        );",
    )
    .context("Invalid SQL command when CREATEing playlist tables.")?;

    Ok(())
}

/// Parse a playlist JSON export from disk.
pub fn read_playlist_file(path: &Path) -> Result<Playlist> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist file {}", path.display()))?;
    let playlist: Playlist = serde_json::from_str(&raw)
        .with_context(|| format!("Playlist file {} is not valid JSON", path.display()))?;
    Ok(playlist)
}

/// Write a playlist into the store, replacing any previous version with the
/// same id.
pub fn save_playlist(conn: &mut Connection, playlist: &Playlist) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM track WHERE playlist_id = (?1)", [&playlist.id])
        .with_context(|| format!("Failed to DELETE old tracks of playlist {}", playlist.id))?;
    tx.execute(
        "INSERT OR REPLACE INTO playlist (id, name) VALUES (?1, ?2)",
        (&playlist.id, &playlist.name),
    )
    .with_context(|| format!("Failed to INSERT playlist {}", playlist.id))?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO track (id, playlist_id, position, name, artists, album, popularity, preview_url, duration_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;

        for (position, track) in playlist.tracks.iter().enumerate() {
            let artists = serde_json::to_string(&track.artists)
                .context("Failed to serialize track artists")?;

            stmt.execute((
                &track.id,
                &playlist.id,
                position as i64,
                &track.name,
                &artists,
                &track.album,
                track.popularity,
                &track.preview_url,
                track.duration_ms,
            ))
            .with_context(|| {
                format!("Invalid SQL statement when INSERTing track: {track:?}")
            })?;
        }
    }

    tx.commit().context("Committing SQL transaction failed.")?;
    info!(
        "saved playlist '{}' ({} tracks)",
        playlist.name,
        playlist.tracks.len()
    );
    Ok(())
}

/// Load one playlist, tracks in stored order, matched by id or by name.
pub fn load_playlist(conn: &Connection, id_or_name: &str) -> Result<Playlist> {
    let (id, name): (String, String) = conn
        .query_row(
            "SELECT id, name FROM playlist WHERE id = (?1) OR name = (?1)",
            [id_or_name],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .with_context(|| format!("No playlist named '{id_or_name}' in the store"))?;

    let mut stmt = conn
        .prepare(
            "SELECT id, name, artists, album, popularity, preview_url, duration_ms
             FROM track WHERE playlist_id = (?1) ORDER BY position",
        )
        .context("Invalid SQL statement when SELECTing tracks.")?;

    let track_iter = stmt
        .query_map([&id], |row| {
            Ok((
                Track {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    artists: Vec::new(),
                    album: row.get(3)?,
                    popularity: row.get(4)?,
                    preview_url: row.get(5)?,
                    duration_ms: row.get(6)?,
                },
                row.get::<_, String>(2)?,
            ))
        })
        .context("Cannot query tracks.")?;

    let mut tracks: Vec<Track> = Vec::new();
    for row in track_iter {
        let (mut track, artists_json) = row.context("Queried track unwrap failed.")?;
        track.artists = serde_json::from_str(&artists_json)
            .with_context(|| format!("Corrupt artists column for track {}", track.id))?;
        tracks.push(track);
    }

    debug!("loaded playlist '{name}' with {} tracks", tracks.len());
    Ok(Playlist { id, name, tracks })
}

/// Summaries of every stored playlist, alphabetical by name.
pub fn list_playlists(conn: &Connection) -> Result<Vec<PlaylistSummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT p.id, p.name, COUNT(t.playlist_id)
             FROM playlist p LEFT JOIN track t ON t.playlist_id = p.id
             GROUP BY p.id ORDER BY p.name",
        )
        .context("Invalid SQL statement when SELECTing playlists.")?;

    let summary_iter = stmt
        .query_map([], |row| {
            Ok(PlaylistSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                num_tracks: row.get(2)?,
            })
        })
        .context("Cannot query playlists.")?;

    let mut summaries: Vec<PlaylistSummary> = Vec::new();
    for summary in summary_iter {
        summaries.push(summary.context("Queried playlist unwrap failed.")?);
    }

    Ok(summaries)
}

/// Remove a playlist and its tracks. Errors when nothing matched.
pub fn delete_playlist(conn: &mut Connection, id_or_name: &str) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM track WHERE playlist_id IN
         (SELECT id FROM playlist WHERE id = (?1) OR name = (?1))",
        [id_or_name],
    )
    .context("Failed to DELETE tracks.")?;
    let removed = tx
        .execute(
            "DELETE FROM playlist WHERE id = (?1) OR name = (?1)",
            [id_or_name],
        )
        .context("Failed to DELETE playlist.")?;
    tx.commit().context("Committing SQL transaction failed.")?;

    if removed == 0 {
        return Err(anyhow!("No playlist named '{id_or_name}' in the store"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_playlist() -> Playlist {
        Playlist {
            id: "pl-space".to_string(),
            name: "Space Rock".to_string(),
            tracks: vec![
                Track {
                    id: "t1".to_string(),
                    name: "Nebula".to_string(),
                    artists: vec!["Aurora Skies".to_string(), "The Orbits".to_string()],
                    album: "Deep Field".to_string(),
                    popularity: 42,
                    preview_url: "https://example.com/1".to_string(),
                    duration_ms: 30_000,
                },
                Track {
                    id: "t2".to_string(),
                    name: "Solar Wind".to_string(),
                    artists: vec!["Aurora Skies".to_string()],
                    album: "Deep Field".to_string(),
                    popularity: 77,
                    preview_url: "https://example.com/2".to_string(),
                    duration_ms: 29_000,
                },
            ],
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let mut conn = connect(dir.path()).unwrap();

        let playlist = sample_playlist();
        save_playlist(&mut conn, &playlist).unwrap();

        let by_id = load_playlist(&conn, "pl-space").unwrap();
        assert_eq!(by_id, playlist);

        let by_name = load_playlist(&conn, "Space Rock").unwrap();
        assert_eq!(by_name, playlist);
    }

    #[test]
    fn test_save_replaces_previous_version() {
        let dir = tempdir().unwrap();
        let mut conn = connect(dir.path()).unwrap();

        let mut playlist = sample_playlist();
        save_playlist(&mut conn, &playlist).unwrap();

        playlist.tracks.pop();
        playlist.name = "Space Rock v2".to_string();
        save_playlist(&mut conn, &playlist).unwrap();

        let loaded = load_playlist(&conn, "pl-space").unwrap();
        assert_eq!(loaded.name, "Space Rock v2");
        assert_eq!(loaded.tracks.len(), 1);

        let summaries = list_playlists(&conn).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].num_tracks, 1);
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let dir = tempdir().unwrap();
        let mut conn = connect(dir.path()).unwrap();

        let mut a = sample_playlist();
        a.id = "z".to_string();
        a.name = "Zebra Beats".to_string();
        let mut b = sample_playlist();
        b.id = "a".to_string();
        b.name = "Ambient Hours".to_string();

        save_playlist(&mut conn, &a).unwrap();
        save_playlist(&mut conn, &b).unwrap();

        let names: Vec<String> = list_playlists(&conn)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Ambient Hours", "Zebra Beats"]);
    }

    #[test]
    fn test_load_missing_playlist_errors() {
        let dir = tempdir().unwrap();
        let conn = connect(dir.path()).unwrap();
        assert!(load_playlist(&conn, "nope").is_err());
    }

    #[test]
    fn test_delete_playlist() {
        let dir = tempdir().unwrap();
        let mut conn = connect(dir.path()).unwrap();

        save_playlist(&mut conn, &sample_playlist()).unwrap();
        delete_playlist(&mut conn, "Space Rock").unwrap();

        assert!(list_playlists(&conn).unwrap().is_empty());
        assert!(delete_playlist(&mut conn, "Space Rock").is_err());
    }

    #[test]
    fn test_read_playlist_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        let playlist = sample_playlist();
        std::fs::write(&path, serde_json::to_string(&playlist).unwrap()).unwrap();

        assert_eq!(read_playlist_file(&path).unwrap(), playlist);

        std::fs::write(&path, "not json").unwrap();
        assert!(read_playlist_file(&path).is_err());
    }
}
