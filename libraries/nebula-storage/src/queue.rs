//! Persisted play queue

use crate::error::Result;
use nebula_core::Track;
use sqlx::SqlitePool;
use tracing::warn;

/// Load the queue in order
///
/// Rows whose JSON no longer decodes are skipped.
pub async fn load(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT track_id, track_json FROM play_queue ORDER BY position")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(track_id, json)| match serde_json::from_str::<Track>(&json) {
            Ok(track) => Some(track),
            Err(e) => {
                warn!(%track_id, error = %e, "Skipping undecodable queue row");
                None
            }
        })
        .collect())
}

/// Replace the stored queue with `tracks`
pub async fn replace(pool: &SqlitePool, tracks: &[Track]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM play_queue").execute(&mut *tx).await?;

    for (position, track) in tracks.iter().enumerate() {
        let json = serde_json::to_string(&Track {
            stream_url: None,
            ..track.clone()
        })?;
        sqlx::query("INSERT INTO play_queue (position, track_id, track_json) VALUES (?, ?, ?)")
            .bind(position as i64)
            .bind(track.id.as_str())
            .bind(json)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
