//! Read-only match views for rendering collaborators.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Color, MatchPhase, MatchResult, MoveRecord, PlayerId};
use crate::grid::GridSnapshot;

/// One roster entry as seen by a renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Player identifier.
    pub id: PlayerId,
    /// Display color.
    pub color: Color,
    /// Not eliminated.
    pub alive: bool,
    /// Has placed at least one orb.
    pub has_moved: bool,
    /// Cells owned.
    pub cells: usize,
    /// Orbs owned.
    pub orbs: u32,
}

/// Full board plus roster, detached from the live match.
///
/// The board is stable after every move except one whose cascade was
/// halted (see `MoveRecord::halted` on the last history entry). That
/// only happens on the move that decides the match, or on a board too
/// loaded to ever settle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Board contents.
    pub grid: GridSnapshot,
    /// Roster in turn order.
    pub players: Vec<PlayerSnapshot>,
    /// Player to move (the winner once the match is over).
    pub current_player: PlayerId,
    /// Accepted moves so far.
    pub move_count: u32,
    /// Turn cycle position.
    pub phase: MatchPhase,
    /// Final result, once decided.
    pub result: Option<MatchResult>,
    /// Every accepted move, oldest first.
    pub history: Vector<MoveRecord>,
}

impl MatchSnapshot {
    /// Roster entry for `player`.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.get(player.index())
    }

    /// Check if the last move's cascade ran to a stable board.
    #[must_use]
    pub fn is_board_settled(&self) -> bool {
        self.history.back().map_or(true, |record| !record.halted)
    }

    /// Players still in the match.
    pub fn alive_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.alive).map(|p| p.id)
    }
}
