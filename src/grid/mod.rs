//! The board: cells, placement and raw mutation primitives.
//!
//! The grid knows nothing about turns or cascades. It validates single
//! placements and exposes the primitives the cascade engine drives.

mod board;
mod cell;

pub use board::{Grid, GridSnapshot};
pub use cell::Cell;
