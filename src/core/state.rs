//! Match state: roster, turn order and outcome.
//!
//! `MatchState` is plain bookkeeping. It does not look at the board;
//! the match controller in `rules` feeds it cascade results and asks
//! it whose turn is next.
//!
//! Move history uses `im::Vector` so snapshots clone it in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{Color, MatchConfig};
use super::player::{PlayerId, PlayerMap};
use super::position::Position;

/// Where the match controller is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the current player to place an orb.
    AwaitingMove,
    /// A placement is being resolved.
    CascadeInProgress,
    /// A winner has been decided; no more moves are accepted.
    MatchOver,
}

/// How the winner won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// The cascade settled with every other player knocked out.
    Elimination,
    /// The winner took every occupied cell while explosions were still
    /// pending, cutting the cascade short.
    Domination,
}

/// Final result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winning player.
    pub winner: PlayerId,
    /// Which condition fired.
    pub reason: WinReason,
    /// Move number (1-based) that decided the match.
    pub decided_on_move: u32,
}

/// Per-player bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player identifier (turn order position).
    pub id: PlayerId,
    /// Display color.
    pub color: Color,
    /// Placements made so far.
    pub moves: u32,
    /// Move number on which the player was eliminated.
    pub eliminated_on_move: Option<u32>,
}

impl PlayerRecord {
    fn new(id: PlayerId, color: Color) -> Self {
        Self {
            id,
            color,
            moves: 0,
            eliminated_on_move: None,
        }
    }

    /// Placed at least one orb.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moves > 0
    }

    /// Still in the match.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.eliminated_on_move.is_none()
    }
}

/// One accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Move number, starting at 1.
    pub number: u32,
    /// Player who moved.
    pub player: PlayerId,
    /// Where the orb went.
    pub position: Position,
    /// Explosions the placement caused.
    pub explosions: usize,
    /// Players knocked out by the move.
    pub eliminated: Vec<PlayerId>,
    /// The cascade stopped with explosions still pending, so the board
    /// after this move may hold cells at or above critical mass.
    pub halted: bool,
}

/// Mutable match bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Roster in turn order.
    pub players: PlayerMap<PlayerRecord>,

    /// Player whose turn it is (the winner once the match is over).
    pub current: PlayerId,

    /// Accepted moves so far.
    pub move_count: u32,

    /// Turn cycle position.
    pub phase: MatchPhase,

    /// Set once a win condition fires.
    pub result: Option<MatchResult>,

    /// Every accepted move, oldest first.
    pub history: Vector<MoveRecord>,
}

impl MatchState {
    /// Fresh state for `config`: first player to move, nobody has moved.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        let colors = config.colors();
        Self {
            players: PlayerMap::new(colors.len(), |id| PlayerRecord::new(id, colors[id.index()])),
            current: PlayerId::new(0),
            move_count: 0,
            phase: MatchPhase::AwaitingMove,
            result: None,
            history: Vector::new(),
        }
    }

    /// Number of players in the roster, eliminated ones included.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Record of one player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(player)
    }

    /// Check if the match has a winner.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }

    /// Players not yet eliminated, in turn order.
    pub fn living_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, record)| record.is_alive())
            .map(|(id, _)| id)
    }

    /// Check if every player still in the match has moved.
    #[must_use]
    pub fn all_moved(&self) -> bool {
        self.players
            .values()
            .filter(|record| record.is_alive())
            .all(PlayerRecord::has_moved)
    }

    /// Living players other than `trigger` who have moved and can
    /// therefore be eliminated by its cascade.
    #[must_use]
    pub fn contenders(&self, trigger: PlayerId) -> SmallVec<[PlayerId; 8]> {
        self.players
            .iter()
            .filter(|(id, record)| *id != trigger && record.is_alive() && record.has_moved())
            .map(|(id, _)| id)
            .collect()
    }

    /// Count a placement by `player`. Returns the new move number.
    pub fn record_placement(&mut self, player: PlayerId) -> u32 {
        self.move_count += 1;
        self.players[player].moves += 1;
        self.move_count
    }

    /// Mark `player` as eliminated on the current move.
    pub fn eliminate(&mut self, player: PlayerId) {
        let move_count = self.move_count;
        let record = &mut self.players[player];
        if record.eliminated_on_move.is_none() {
            record.eliminated_on_move = Some(move_count);
        }
    }

    /// Next living player after `player` in turn order, wrapping around.
    #[must_use]
    pub fn next_living_after(&self, player: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        (1..=count)
            .map(|offset| PlayerId::new(((player.index() + offset) % count) as u8))
            .find(|&id| self.players[id].is_alive())
    }

    /// Hand the turn to the next living player.
    pub fn advance_turn(&mut self) {
        if let Some(next) = self.next_living_after(self.current) {
            self.current = next;
        }
        self.phase = MatchPhase::AwaitingMove;
    }

    /// Close the match with `result`.
    pub fn finish(&mut self, result: MatchResult) {
        self.current = result.winner;
        self.result = Some(result);
        self.phase = MatchPhase::MatchOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(players: usize) -> MatchState {
        MatchState::new(&MatchConfig::new(players).unwrap())
    }

    #[test]
    fn test_new_state() {
        let state = state(3);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.current, PlayerId::new(0));
        assert_eq!(state.move_count, 0);
        assert_eq!(state.phase, MatchPhase::AwaitingMove);
        assert!(state.result.is_none());
        assert!(!state.all_moved());
        assert_eq!(state.player(PlayerId::new(1)).unwrap().color, Color::BLUE);
    }

    #[test]
    fn test_all_moved_ignores_eliminated() {
        let mut state = state(3);
        state.record_placement(PlayerId::new(0));
        state.record_placement(PlayerId::new(1));
        assert!(!state.all_moved());

        state.eliminate(PlayerId::new(2));
        assert!(state.all_moved());
    }

    #[test]
    fn test_contenders() {
        let mut state = state(4);
        state.record_placement(PlayerId::new(0));
        state.record_placement(PlayerId::new(1));
        state.record_placement(PlayerId::new(2));
        state.eliminate(PlayerId::new(2));

        let contenders = state.contenders(PlayerId::new(0));
        assert_eq!(contenders.as_slice(), &[PlayerId::new(1)]);
    }

    #[test]
    fn test_turn_order_skips_eliminated() {
        let mut state = state(4);
        state.eliminate(PlayerId::new(1));
        state.eliminate(PlayerId::new(2));

        state.advance_turn();
        assert_eq!(state.current, PlayerId::new(3));

        state.advance_turn();
        assert_eq!(state.current, PlayerId::new(0));
    }

    #[test]
    fn test_eliminate_keeps_first_move_number() {
        let mut state = state(2);
        state.record_placement(PlayerId::new(0));
        state.eliminate(PlayerId::new(1));
        state.record_placement(PlayerId::new(0));
        state.eliminate(PlayerId::new(1));

        assert_eq!(state.player(PlayerId::new(1)).unwrap().eliminated_on_move, Some(1));
    }

    #[test]
    fn test_finish() {
        let mut state = state(2);
        state.finish(MatchResult {
            winner: PlayerId::new(1),
            reason: WinReason::Elimination,
            decided_on_move: 4,
        });

        assert!(state.is_over());
        assert_eq!(state.current, PlayerId::new(1));
        assert_eq!(state.result.unwrap().winner, PlayerId::new(1));
    }
}
