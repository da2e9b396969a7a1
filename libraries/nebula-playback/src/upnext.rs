//! Up-next policy engine
//!
//! Decides what the queue holds whenever a track starts playing:
//!
//! - **Static context**: the caller supplied a stable ordered list (an
//!   album, a playlist, the liked list). The queue becomes that list.
//! - **Autoplay**: no context, or a context made only of ad-hoc search
//!   results. The queue becomes the played track followed by server
//!   recommendations.

use nebula_core::{AutoplayService, Track};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which policy produced a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueuePolicy {
    /// Queue copied from the caller's context
    StaticContext,

    /// Queue generated from recommendations
    Autoplay,
}

impl QueuePolicy {
    /// Pick the policy for a caller-supplied context
    ///
    /// A context counts as stable only if it is non-empty and none of its
    /// entries came from search results.
    pub fn for_context(context: Option<&[Track]>) -> Self {
        match context {
            Some(tracks) if !tracks.is_empty() && !tracks.iter().any(|t| t.from_search) => {
                QueuePolicy::StaticContext
            }
            _ => QueuePolicy::Autoplay,
        }
    }
}

/// A computed queue, ready to commit
#[derive(Debug, Clone, PartialEq)]
pub struct QueuePlan {
    /// New queue contents
    pub tracks: Vec<Track>,

    /// Position of the played track in `tracks`
    pub index: usize,

    /// Policy that produced the plan
    pub policy: QueuePolicy,
}

impl QueuePlan {
    /// Queue set verbatim to `context`, pointing at `played`
    ///
    /// A played track missing from the context is treated as its head.
    pub fn from_context(played: &Track, context: &[Track]) -> Self {
        let index = context.iter().position(|t| t.id == played.id).unwrap_or(0);
        Self {
            tracks: context.to_vec(),
            index,
            policy: QueuePolicy::StaticContext,
        }
    }

    /// Queue holding only `played`
    pub fn singleton(played: &Track) -> Self {
        Self {
            tracks: vec![queued(played)],
            index: 0,
            policy: QueuePolicy::Autoplay,
        }
    }
}

/// Computes queues for newly played tracks
pub struct UpNextEngine {
    autoplay: Arc<dyn AutoplayService>,
}

impl UpNextEngine {
    pub fn new(autoplay: Arc<dyn AutoplayService>) -> Self {
        Self { autoplay }
    }

    /// Plan the queue for `played` under the policy `context` selects
    pub async fn plan(&self, played: &Track, context: Option<&[Track]>) -> QueuePlan {
        match (QueuePolicy::for_context(context), context) {
            (QueuePolicy::StaticContext, Some(tracks)) => QueuePlan::from_context(played, tracks),
            _ => self.generate(played).await,
        }
    }

    /// `[played] ++ recommendations`, or just `[played]` when the
    /// recommendation service fails or has nothing
    pub async fn generate(&self, played: &Track) -> QueuePlan {
        let recommendations = match self.autoplay.recommendations(&played.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(track_id = %played.id, error = %e, "Autoplay failed, queueing track alone");
                return QueuePlan::singleton(played);
            }
        };

        let mut tracks = Vec::with_capacity(recommendations.len() + 1);
        tracks.push(queued(played));
        tracks.extend(recommendations.into_iter().filter(Track::has_id));

        debug!(
            track_id = %played.id,
            recommended = tracks.len() - 1,
            "Generated autoplay queue"
        );

        QueuePlan {
            tracks,
            index: 0,
            policy: QueuePolicy::Autoplay,
        }
    }
}

/// Queue entries never carry a resolved stream URL; those expire
fn queued(track: &Track) -> Track {
    Track {
        stream_url: None,
        ..track.clone()
    }
}
