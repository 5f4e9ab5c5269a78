//! Python bindings for the chain-reaction engine.
//!
//! Lets a Python front end (pygame or otherwise) drive matches while the
//! engine keeps sole authority over the board.
//!
//! # Quick Start
//!
//! ```python
//! import chain_reaction as cr
//!
//! game = cr.Match(player_count=2)
//! for explosion in game.submit_move(0, 0):
//!     print(explosion.exploded, explosion.neighbors)
//! print(game)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_match;

pub use py_core::*;
pub use py_match::*;

/// chain_reaction: deterministic chain-reaction grid game engine.
#[pymodule]
fn chain_reaction(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;
    m.add_class::<PyPosition>()?;
    m.add_class::<PyExplosion>()?;
    m.add_class::<PyMatch>()?;
    Ok(())
}
