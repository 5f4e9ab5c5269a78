//! Chain-reaction resolution.
//!
//! Given a placement, the cascade engine explodes unstable cells one at
//! a time until the board is stable or the triggering player owns every
//! occupied cell. It reports each explosion as an `ExplosionEvent` and
//! the players eliminated along the way.
//!
//! ## Example
//!
//! ```
//! use chain_reaction::cascade::{CascadeContext, CascadeEngine};
//! use chain_reaction::core::{PlayerId, Position};
//! use chain_reaction::grid::Grid;
//!
//! let player = PlayerId::new(0);
//! let corner = Position::new(0, 0);
//! let mut grid = Grid::new();
//! grid.place(corner, player).unwrap();
//! grid.place(corner, player).unwrap();
//!
//! let outcome = CascadeEngine::resolve(&mut grid, corner, &CascadeContext::uncontested(player));
//! assert_eq!(outcome.explosion_count(), 1);
//! assert_eq!(grid.orb_count(corner), 0);
//! ```

mod engine;
mod event;

pub use engine::{CascadeContext, CascadeEngine};
pub use event::{Capture, CascadeOutcome, ExplosionEvent};
