//! Match rules: turn order, legality and win conditions.
//!
//! `Match` is the only writer of its grid. A move is validated, placed,
//! handed to the cascade engine, and only then is the roster updated
//! and the turn advanced. Nothing else runs in between.

mod controller;
mod snapshot;

pub use controller::{Match, MoveOutcome};
pub use snapshot::{MatchSnapshot, PlayerSnapshot};
