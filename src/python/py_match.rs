//! Match bindings for Python.

use pyo3::prelude::*;

use crate::cascade::ExplosionEvent;
use crate::core::{Color, MatchConfig, Position};
use crate::rules::Match;

use super::py_core::{config_error, move_error, PyPlayerId, PyPosition};

/// One explosion, flattened for Python playback.
#[pyclass(name = "Explosion", get_all)]
#[derive(Clone, Debug)]
pub struct PyExplosion {
    /// Index within the cascade.
    pub step: usize,
    /// Exploded cell as (row, col).
    pub exploded: (usize, usize),
    /// Neighbors that received an orb.
    pub neighbors: Vec<(usize, usize)>,
    /// Owner of the neighbors afterwards.
    pub owner: u8,
    /// Orbs left in the exploded cell.
    pub remaining: u32,
    /// Players eliminated by this explosion.
    pub eliminated: Vec<u8>,
}

impl From<&ExplosionEvent> for PyExplosion {
    fn from(event: &ExplosionEvent) -> Self {
        Self {
            step: event.step,
            exploded: (event.exploded.row, event.exploded.col),
            neighbors: event
                .affected_neighbors
                .iter()
                .map(|p| (p.row, p.col))
                .collect(),
            owner: event.resulting_owner.0,
            remaining: event.remaining_orbs,
            eliminated: event.eliminated.iter().map(|p| p.0).collect(),
        }
    }
}

#[pymethods]
impl PyExplosion {
    fn __repr__(&self) -> String {
        format!(
            "Explosion(step={}, cell={:?}, owner={})",
            self.step, self.exploded, self.owner
        )
    }
}

/// Python wrapper for Match.
#[pyclass(name = "Match")]
pub struct PyMatch {
    inner: Match,
}

#[pymethods]
impl PyMatch {
    /// Create a new match.
    ///
    /// # Arguments
    /// - player_count: Number of players (2-4 with default colors)
    /// - colors: Optional list of (r, g, b) tuples, exactly one per player (2-8)
    #[new]
    #[pyo3(signature = (player_count = 2, colors = None))]
    fn new(player_count: usize, colors: Option<Vec<(u8, u8, u8)>>) -> PyResult<Self> {
        let config = build_config(player_count, colors)?;
        Ok(Self {
            inner: Match::new(config),
        })
    }

    /// Place an orb for the current player and return the explosions.
    fn submit_move(&mut self, row: usize, col: usize) -> PyResult<Vec<PyExplosion>> {
        let pos = Position::checked(row, col).map_err(move_error)?;
        let outcome = self.inner.submit_move(pos).map_err(move_error)?;
        Ok(outcome.cascade.events.iter().map(PyExplosion::from).collect())
    }

    /// Check if the current player may place at (row, col).
    fn is_legal(&self, row: usize, col: usize) -> bool {
        self.inner.is_legal(Position::new(row, col))
    }

    /// Cells the current player may place in.
    fn legal_moves(&self) -> Vec<PyPosition> {
        self.inner.legal_moves().into_iter().map(PyPosition).collect()
    }

    /// (orb_count, owner) for every cell, row-major.
    fn cells(&self) -> Vec<(u32, Option<u8>)> {
        self.inner
            .grid()
            .cells()
            .iter()
            .map(|c| (c.orb_count(), c.owner().map(|p| p.0)))
            .collect()
    }

    /// Players still in the match.
    fn alive_players(&self) -> Vec<PyPlayerId> {
        self.inner.state().living_players().map(PyPlayerId).collect()
    }

    /// Winner, once the match is over.
    fn winner(&self) -> Option<PyPlayerId> {
        self.inner.result().map(|r| PyPlayerId(r.winner))
    }

    /// Start over with the same players.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Start over with a new roster.
    #[pyo3(signature = (player_count, colors = None))]
    fn configure(&mut self, player_count: usize, colors: Option<Vec<(u8, u8, u8)>>) -> PyResult<()> {
        let config = build_config(player_count, colors)?;
        self.inner.reconfigure(config);
        Ok(())
    }

    /// Player whose turn it is.
    #[getter]
    fn current_player(&self) -> PyPlayerId {
        PyPlayerId(self.inner.current_player())
    }

    /// Number of accepted moves.
    #[getter]
    fn move_count(&self) -> u32 {
        self.inner.state().move_count
    }

    /// Check if the match has a winner.
    #[getter]
    fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    fn __str__(&self) -> String {
        self.inner.grid().snapshot().to_string()
    }

    fn __repr__(&self) -> String {
        let status = if self.inner.is_over() { "over" } else { "ongoing" };
        format!(
            "Match(move={}, current=P{}, status={})",
            self.inner.state().move_count,
            self.inner.current_player().0,
            status
        )
    }
}

fn build_config(player_count: usize, colors: Option<Vec<(u8, u8, u8)>>) -> PyResult<MatchConfig> {
    let colors: Option<Vec<Color>> = colors.map(|colors| {
        colors
            .into_iter()
            .map(|(r, g, b)| Color::rgb(r, g, b))
            .collect()
    });
    MatchConfig::for_roster(player_count, colors).map_err(config_error)
}
