//! # chain-reaction
//!
//! A deterministic engine for the chain-reaction grid game: players take
//! turns placing orbs on an 8x8 board, and a cell that reaches its
//! critical mass explodes into its neighbors, capturing them.
//!
//! ## Design Principles
//!
//! 1. **Deterministic Cascades**: Explosions are resolved one at a time
//!    from a FIFO worklist. The same board and move always produce the
//!    same event sequence.
//!
//! 2. **Single Writer**: A `Match` owns its grid. No global board; any
//!    number of matches can coexist.
//!
//! 3. **Presentation Agnostic**: Renderers consume snapshots and ordered
//!    explosion events and feed back plain coordinates.
//!
//! ## Modules
//!
//! - `core`: Player ids, positions, configuration, errors, match state
//! - `grid`: Cells, the board and its snapshots
//! - `cascade`: Explosion propagation and the event log
//! - `rules`: Match controller (turns, legality, win conditions)
//! - `python`: Optional PyO3 bindings (feature `python`)

pub mod core;
pub mod grid;
pub mod cascade;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CellClass, Color, ConfigError, MatchConfig, MatchPhase, MatchResult, MatchState, MoveError,
    MoveRecord, PlayerId, PlayerMap, PlayerRecord, Position, WinReason, CELL_COUNT, GRID_SIZE,
};

pub use crate::grid::{Cell, Grid, GridSnapshot};

pub use crate::cascade::{Capture, CascadeContext, CascadeEngine, CascadeOutcome, ExplosionEvent};

pub use crate::rules::{Match, MatchSnapshot, MoveOutcome, PlayerSnapshot};
