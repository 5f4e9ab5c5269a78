//! Cascade output: per-explosion events and the overall verdict.
//!
//! Events are ordered exactly as explosions were applied, so an
//! animation collaborator can replay them one by one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Neighbors, PlayerId, Position};

/// A neighbor that changed hands because of an explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Captured cell.
    pub position: Position,
    /// Owner before the explosion hit it.
    pub previous_owner: PlayerId,
}

/// One cell exploding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionEvent {
    /// 0-based index of this explosion within its cascade.
    pub step: usize,

    /// The cell that exploded.
    pub exploded: Position,

    /// Neighbors that each received one orb, in down, up, right, left order.
    pub affected_neighbors: Neighbors,

    /// Owner of every affected neighbor after the explosion.
    pub resulting_owner: PlayerId,

    /// Orbs left behind in the exploded cell (excess above critical mass).
    pub remaining_orbs: u32,

    /// Neighbors taken from another player.
    pub captures: SmallVec<[Capture; 4]>,

    /// Players knocked out right after this explosion.
    pub eliminated: SmallVec<[PlayerId; 2]>,
}

/// Result of draining the explosion queue for one placement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Explosions in the order they were applied.
    pub events: Vec<ExplosionEvent>,

    /// Players eliminated during the cascade, in elimination order.
    pub eliminated: Vec<PlayerId>,

    /// The queue was abandoned, either because the match was already
    /// decided or because the cascade could never settle. The triggering
    /// player owns every occupied cell and the board may still hold
    /// unstable cells.
    pub halted: bool,
}

impl CascadeOutcome {
    /// Number of explosions.
    #[must_use]
    pub fn explosion_count(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing exploded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every capture in explosion order.
    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.events.iter().flat_map(|e| e.captures.iter())
    }
}
