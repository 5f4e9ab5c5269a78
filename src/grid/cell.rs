//! A single board cell.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Position};

/// One grid position with its orbs.
///
/// Invariant: `orb_count > 0` if and only if `owner` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    orb_count: u32,
    owner: Option<PlayerId>,
}

impl Cell {
    /// Create an empty cell.
    #[must_use]
    pub const fn empty(position: Position) -> Self {
        Self {
            position,
            orb_count: 0,
            owner: None,
        }
    }

    /// Where this cell sits.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Number of orbs in the cell.
    #[must_use]
    pub const fn orb_count(&self) -> u32 {
        self.orb_count
    }

    /// Player owning the orbs, `None` when empty.
    #[must_use]
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Orb threshold at which this cell explodes.
    #[must_use]
    pub const fn critical_mass(&self) -> u32 {
        self.position.critical_mass()
    }

    /// No orbs and no owner.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.orb_count == 0
    }

    /// At or above critical mass.
    #[must_use]
    pub const fn is_unstable(&self) -> bool {
        self.orb_count >= self.critical_mass()
    }

    /// Check if `player` owns this cell.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Add one orb and hand the cell to `player`.
    pub(crate) fn add_orb(&mut self, player: PlayerId) {
        self.orb_count += 1;
        self.owner = Some(player);
    }

    /// Remove up to `count` orbs, clearing the owner when none remain.
    pub(crate) fn remove_orbs(&mut self, count: u32) {
        self.orb_count = self.orb_count.saturating_sub(count);
        if self.orb_count == 0 {
            self.owner = None;
        }
    }

    /// Transfer ownership of the existing orbs. No-op on an empty cell.
    pub(crate) fn set_owner(&mut self, player: PlayerId) {
        if self.orb_count > 0 {
            self.owner = Some(player);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.orb_count = 0;
        self.owner = None;
    }
}
