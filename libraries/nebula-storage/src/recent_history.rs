//! Persisted recent-play history

use crate::error::Result;
use nebula_core::Track;
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::warn;

/// Load the history, most recent first
pub async fn load(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT track_id, track_json FROM recent_history ORDER BY position")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(track_id, json)| match serde_json::from_str::<Track>(&json) {
            Ok(track) => Some(track),
            Err(e) => {
                warn!(%track_id, error = %e, "Skipping undecodable history row");
                None
            }
        })
        .collect())
}

/// Replace the stored history with `tracks` (most recent first)
///
/// Later duplicates of an id are dropped; the first occurrence is the most
/// recent play.
pub async fn replace(pool: &SqlitePool, tracks: &[Track]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM recent_history").execute(&mut *tx).await?;

    let unique = tracks.iter().filter(|t| seen.insert(t.id.clone()));
    for (position, track) in unique.enumerate() {
        let json = serde_json::to_string(&Track {
            stream_url: None,
            ..track.clone()
        })?;
        sqlx::query(
            "INSERT INTO recent_history (position, track_id, track_json) VALUES (?, ?, ?)",
        )
        .bind(position as i64)
        .bind(track.id.as_str())
        .bind(json)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
