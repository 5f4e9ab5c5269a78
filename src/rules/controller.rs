//! Match controller: turn order, move validation and win conditions.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::snapshot::{MatchSnapshot, PlayerSnapshot};
use crate::cascade::{CascadeContext, CascadeEngine, CascadeOutcome};
use crate::core::{
    ConfigError, MatchConfig, MatchPhase, MatchResult, MatchState, MoveError, MoveRecord, PlayerId,
    Position, WinReason,
};
use crate::grid::Grid;

/// Everything a collaborator needs to know about an accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Move number, starting at 1.
    pub number: u32,
    /// Player who moved.
    pub player: PlayerId,
    /// Where the orb was placed.
    pub position: Position,
    /// Explosions caused by the placement, in playback order.
    pub cascade: CascadeOutcome,
    /// Set if this move decided the match.
    pub result: Option<MatchResult>,
    /// Player to move next, `None` once the match is over.
    pub next_player: Option<PlayerId>,
}

/// A single match: the board plus turn bookkeeping.
///
/// Owns its grid exclusively; any number of matches can coexist.
///
/// ```
/// use chain_reaction::core::{MatchConfig, PlayerId, Position};
/// use chain_reaction::rules::Match;
///
/// let mut game = Match::new(MatchConfig::default());
/// let outcome = game.submit_move(Position::new(3, 3)).unwrap();
///
/// assert_eq!(outcome.player, PlayerId::new(0));
/// assert_eq!(game.current_player(), PlayerId::new(1));
/// ```
#[derive(Clone, Debug)]
pub struct Match {
    config: MatchConfig,
    grid: Grid,
    state: MatchState,
}

impl Match {
    /// Start a match for `config`.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let state = MatchState::new(&config);
        Self {
            config,
            grid: Grid::new(),
            state,
        }
    }

    /// Start a match for `player_count` players with the default palette.
    pub fn with_players(player_count: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(MatchConfig::new(player_count)?))
    }

    /// Roster configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Turn bookkeeping.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current
    }

    /// Turn cycle position.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Final result, once decided.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.state.result
    }

    /// Check if the match has a winner.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Check if the current player may place at `pos`.
    #[must_use]
    pub fn is_legal(&self, pos: Position) -> bool {
        !self.is_over() && self.grid.check_placement(pos, self.state.current).is_ok()
    }

    /// Every cell the current player may place in: empty cells and
    /// cells they already own. Empty once the match is over.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_over() {
            return Vec::new();
        }
        let player = self.state.current;
        self.grid
            .cells()
            .iter()
            .filter(|cell| cell.owner().map_or(true, |owner| owner == player))
            .map(|cell| cell.position())
            .collect()
    }

    /// Place an orb for the current player and resolve the cascade.
    ///
    /// Rejected moves leave the match untouched.
    pub fn submit_move(&mut self, pos: Position) -> Result<MoveOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::MoveAfterGameOver);
        }
        let player = self.state.current;
        self.grid.place(pos, player)?;

        self.state.phase = MatchPhase::CascadeInProgress;
        let number = self.state.record_placement(player);

        let context = CascadeContext {
            trigger: player,
            contenders: self.state.contenders(player),
            all_moved: self.state.all_moved(),
        };
        let cascade = CascadeEngine::resolve(&mut self.grid, pos, &context);
        for &eliminated in &cascade.eliminated {
            self.state.eliminate(eliminated);
        }

        let result = self.evaluate(player, number, &cascade);
        self.state.history.push_back(MoveRecord {
            number,
            player,
            position: pos,
            explosions: cascade.explosion_count(),
            eliminated: cascade.eliminated.clone(),
            halted: cascade.halted,
        });

        let next_player = match result {
            Some(result) => {
                info!(
                    winner = %result.winner,
                    reason = ?result.reason,
                    moves = number,
                    "match over"
                );
                self.state.finish(result);
                None
            }
            None => {
                self.state.advance_turn();
                Some(self.state.current)
            }
        };

        debug!(
            move_number = number,
            player = %player,
            row = pos.row,
            col = pos.col,
            explosions = cascade.explosion_count(),
            "move applied"
        );

        Ok(MoveOutcome {
            number,
            player,
            position: pos,
            cascade,
            result,
            next_player,
        })
    }

    /// Decide whether `player`'s move on `number` ended the match.
    ///
    /// Neither condition applies until every player still in the match
    /// has moved. A cascade cut short because `player` already held the
    /// whole board is a domination win; one that settled after knocking
    /// out the last opponent is an elimination win.
    fn evaluate(&self, player: PlayerId, number: u32, cascade: &CascadeOutcome) -> Option<MatchResult> {
        if !self.state.all_moved() {
            return None;
        }
        if self.state.living_players().any(|p| p != player) {
            return None;
        }

        let reason = if cascade.halted && self.grid.is_dominated_by(player) {
            WinReason::Domination
        } else {
            WinReason::Elimination
        };
        Some(MatchResult {
            winner: player,
            reason,
            decided_on_move: number,
        })
    }

    /// Start over with the same roster.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.state = MatchState::new(&self.config);
        info!(players = self.config.player_count(), "match reset");
    }

    /// Install a new roster and start over.
    pub fn reconfigure(&mut self, config: MatchConfig) {
        self.config = config;
        self.reset();
    }

    /// Read-only view of the board and roster for renderers.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        let players = self
            .state
            .players
            .values()
            .map(|record| PlayerSnapshot {
                id: record.id,
                color: record.color,
                alive: record.is_alive(),
                has_moved: record.has_moved(),
                cells: self.grid.cells_owned_by(record.id),
                orbs: self.grid.orbs_owned_by(record.id),
            })
            .collect();

        MatchSnapshot {
            grid: self.grid.snapshot(),
            players,
            current_player: self.state.current,
            move_count: self.state.move_count,
            phase: self.state.phase,
            result: self.state.result,
            history: self.state.history.clone(),
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn play(game: &mut Match, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            game.submit_move(Position::new(row, col)).unwrap();
        }
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Match::default();
        assert_eq!(game.current_player(), A);

        let outcome = game.submit_move(Position::new(2, 2)).unwrap();
        assert_eq!(outcome.number, 1);
        assert_eq!(outcome.next_player, Some(B));
        assert_eq!(game.current_player(), B);
        assert_eq!(game.phase(), MatchPhase::AwaitingMove);

        game.submit_move(Position::new(5, 5)).unwrap();
        assert_eq!(game.current_player(), A);
        assert_eq!(game.state().move_count, 2);
    }

    #[test]
    fn test_rejects_cell_owned_by_other() {
        let mut game = Match::default();
        play(&mut game, &[(0, 0)]);
        let before = game.snapshot();

        let err = game.submit_move(Position::new(0, 0)).unwrap_err();

        assert_eq!(
            err,
            MoveError::CellOwnedByOther {
                position: Position::new(0, 0),
                owner: A,
            }
        );
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.current_player(), B);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let mut game = Match::default();
        let err = game.submit_move(Position::new(8, 3)).unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds { row: 8, col: 3 });
        assert_eq!(game.state().move_count, 0);
        assert_eq!(game.current_player(), A);
    }

    #[test]
    fn test_elimination_win() {
        let mut game = Match::default();
        play(&mut game, &[(0, 0), (0, 1)]);

        let outcome = game.submit_move(Position::new(0, 0)).unwrap();

        assert_eq!(outcome.cascade.eliminated, vec![B]);
        let result = outcome.result.unwrap();
        assert_eq!(result.winner, A);
        assert_eq!(result.reason, WinReason::Elimination);
        assert_eq!(result.decided_on_move, 3);
        assert_eq!(outcome.next_player, None);
        assert!(game.is_over());
        assert_eq!(game.phase(), MatchPhase::MatchOver);
    }

    #[test]
    fn test_move_after_game_over() {
        let mut game = Match::default();
        play(&mut game, &[(0, 0), (0, 1), (0, 0)]);

        let err = game.submit_move(Position::new(4, 4)).unwrap_err();
        assert_eq!(err, MoveError::MoveAfterGameOver);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_no_win_before_everyone_moved() {
        let mut game = Match::with_players(3).unwrap();
        play(&mut game, &[(0, 0)]);
        // A owns every occupied cell, but B and C have not moved.
        assert!(game.grid().is_dominated_by(A));
        assert!(!game.is_over());

        play(&mut game, &[(7, 7), (5, 5), (0, 0)]);
        assert!(!game.is_over());
    }

    #[test]
    fn test_domination_win_cuts_cascade_short() {
        let mut game = Match::default();
        for pos in Position::all() {
            for _ in 1..pos.critical_mass() {
                game.grid.add_orb(pos, A);
            }
        }
        game.grid.clear(Position::new(4, 4));
        for _ in 0..3 {
            game.grid.add_orb(Position::new(4, 4), B);
        }
        game.state.record_placement(A);
        game.state.record_placement(B);

        let outcome = game.submit_move(Position::new(0, 0)).unwrap();

        assert!(outcome.cascade.halted);
        assert_eq!(outcome.cascade.eliminated, vec![B]);
        let result = outcome.result.unwrap();
        assert_eq!(result.winner, A);
        assert_eq!(result.reason, WinReason::Domination);
        assert!(game.grid().is_dominated_by(A));

        let snapshot = game.snapshot();
        assert!(!snapshot.is_board_settled());
        assert!(snapshot.history.back().unwrap().halted);
    }

    #[test]
    fn test_elimination_before_third_player_moved() {
        let mut game = Match::with_players(3).unwrap();
        let c = PlayerId::new(2);
        game.grid.add_orb(Position::new(0, 0), A);
        game.grid.add_orb(Position::new(0, 1), B);
        game.state.record_placement(A);
        game.state.record_placement(B);

        let outcome = game.submit_move(Position::new(0, 0)).unwrap();

        // B had moved and lost its last cell, so it is out at once. C has
        // not moved yet, so no win condition is checked.
        assert_eq!(outcome.cascade.eliminated, vec![B]);
        assert!(outcome.result.is_none());
        assert!(!game.is_over());
        assert!(!game.state().player(B).unwrap().is_alive());
        assert!(game.state().player(c).unwrap().is_alive());
        assert_eq!(game.current_player(), c);

        // C's first move completes the round; A and C play on.
        game.submit_move(Position::new(7, 7)).unwrap();
        assert!(game.state().all_moved());
        assert!(!game.is_over());
        assert_eq!(game.current_player(), A);
        assert!(game.snapshot().is_board_settled());
    }

    #[test]
    fn test_legal_moves() {
        let mut game = Match::default();
        assert_eq!(game.legal_moves().len(), 64);

        play(&mut game, &[(3, 3)]);
        let legal = game.legal_moves();
        assert_eq!(legal.len(), 63);
        assert!(!legal.contains(&Position::new(3, 3)));
        assert!(!game.is_legal(Position::new(3, 3)));
        assert!(game.is_legal(Position::new(3, 4)));
    }

    #[test]
    fn test_history_records_moves() {
        let mut game = Match::default();
        play(&mut game, &[(0, 0), (0, 1), (0, 0)]);

        let history = &game.state().history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].player, A);
        assert_eq!(history[2].explosions, 1);
        assert_eq!(history[2].eliminated, vec![B]);
    }

    #[test]
    fn test_reset_keeps_roster() {
        let mut game = Match::with_players(3).unwrap();
        play(&mut game, &[(0, 0), (1, 1)]);

        game.reset();

        assert_eq!(game.state().player_count(), 3);
        assert_eq!(game.state().move_count, 0);
        assert_eq!(game.grid().total_orbs(), 0);
        assert_eq!(game.current_player(), A);
        assert!(game.state().history.is_empty());
    }

    #[test]
    fn test_reconfigure() {
        let mut game = Match::default();
        play(&mut game, &[(0, 0)]);

        game.reconfigure(MatchConfig::new(4).unwrap());

        assert_eq!(game.config().player_count(), 4);
        assert_eq!(game.snapshot().players.len(), 4);
        assert_eq!(game.grid().total_orbs(), 0);
    }
}
