//! Queue-driven explosion propagation.
//!
//! One explosion is applied at a time, breadth first. A position is
//! never queued twice at once; it may be queued again after it has
//! exploded if later orbs push it back over critical mass.
//!
//! Explosions move orbs like chips in a chip-firing game on the grid
//! graph. A cascade in which every cell has exploded at least once can
//! never settle, so the engine stops there regardless of context. By
//! then every occupied cell belongs to the trigger.

use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::event::{Capture, CascadeOutcome, ExplosionEvent};
use crate::core::{PlayerId, Position, CELL_COUNT};
use crate::grid::Grid;

/// Who triggered the cascade and who can still be knocked out by it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeContext {
    /// Player whose placement started the cascade. Every orb delivered by
    /// an explosion becomes theirs.
    pub trigger: PlayerId,

    /// Other players still in the match that have already moved.
    /// Only these can be eliminated.
    pub contenders: SmallVec<[PlayerId; 8]>,

    /// Every player still in the match has moved at least once.
    pub all_moved: bool,
}

impl CascadeContext {
    /// Context for a cascade nobody can lose to (e.g. opening moves).
    ///
    /// The match is never treated as decided, so the queue is only
    /// abandoned if the cascade would otherwise run forever.
    #[must_use]
    pub fn uncontested(trigger: PlayerId) -> Self {
        Self {
            trigger,
            contenders: SmallVec::new(),
            all_moved: false,
        }
    }
}

/// Pending-explosion worklist for a single cascade.
///
/// Created fresh per placement and consumed by the drain.
#[derive(Clone, Debug)]
pub struct CascadeEngine {
    queue: VecDeque<Position>,
    queued: [bool; CELL_COUNT],
    exploded: [bool; CELL_COUNT],
    exploded_cells: usize,
}

impl CascadeEngine {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queued: [false; CELL_COUNT],
            exploded: [false; CELL_COUNT],
            exploded_cells: 0,
        }
    }

    /// Resolve every chain reaction caused by a placement at `origin`.
    ///
    /// If `origin` is stable the board is untouched and the outcome is empty.
    pub fn resolve(grid: &mut Grid, origin: Position, context: &CascadeContext) -> CascadeOutcome {
        let mut engine = Self::new();
        if grid.is_unstable(origin) {
            engine.enqueue(origin);
        }
        engine.drain(grid, context)
    }

    /// Explode every unstable cell on the board until it settles.
    ///
    /// A no-op returning an empty outcome on a stable board.
    pub fn stabilize(grid: &mut Grid, context: &CascadeContext) -> CascadeOutcome {
        let mut engine = Self::new();
        let unstable: Vec<Position> = grid.unstable_positions().collect();
        for pos in unstable {
            engine.enqueue(pos);
        }
        engine.drain(grid, context)
    }

    fn enqueue(&mut self, pos: Position) {
        let slot = &mut self.queued[pos.index()];
        if !*slot {
            *slot = true;
            self.queue.push_back(pos);
        }
    }

    fn drain(mut self, grid: &mut Grid, context: &CascadeContext) -> CascadeOutcome {
        let mut outcome = CascadeOutcome::default();
        let mut contenders = context.contenders.clone();

        while let Some(pos) = self.queue.pop_front() {
            self.queued[pos.index()] = false;
            if !grid.is_unstable(pos) {
                continue;
            }

            let mut event = self.explode(grid, pos, context.trigger, outcome.events.len());

            let mut i = 0;
            while i < contenders.len() {
                let player = contenders[i];
                if grid.cells_owned_by(player) == 0 {
                    info!(player = %player, by = %context.trigger, step = event.step, "player eliminated");
                    event.eliminated.push(player);
                    outcome.eliminated.push(player);
                    contenders.remove(i);
                } else {
                    i += 1;
                }
            }
            outcome.events.push(event);

            if self.queue.is_empty() {
                continue;
            }
            if context.all_moved && grid.is_dominated_by(context.trigger) {
                debug!(
                    trigger = %context.trigger,
                    pending = self.queue.len(),
                    "board dominated, abandoning cascade"
                );
                outcome.halted = true;
                break;
            }
            if self.exploded_cells == CELL_COUNT {
                debug!(
                    trigger = %context.trigger,
                    pending = self.queue.len(),
                    explosions = outcome.events.len(),
                    "every cell exploded, cascade cannot settle"
                );
                outcome.halted = true;
                break;
            }
        }

        if !outcome.is_empty() {
            debug!(
                trigger = %context.trigger,
                explosions = outcome.explosion_count(),
                eliminated = outcome.eliminated.len(),
                halted = outcome.halted,
                "cascade resolved"
            );
        }
        outcome
    }

    /// Apply one explosion atomically.
    fn explode(&mut self, grid: &mut Grid, pos: Position, trigger: PlayerId, step: usize) -> ExplosionEvent {
        if !self.exploded[pos.index()] {
            self.exploded[pos.index()] = true;
            self.exploded_cells += 1;
        }

        let critical = grid.critical_mass(pos);
        let remaining = grid.remove_orbs(pos, critical);
        grid.set_owner(pos, trigger);

        let neighbors = grid.neighbors(pos);
        debug_assert_eq!(neighbors.len() as u32, critical);

        let mut captures: SmallVec<[Capture; 4]> = SmallVec::new();
        for &neighbor in &neighbors {
            if let Some(previous_owner) = grid.owner(neighbor) {
                if previous_owner != trigger {
                    captures.push(Capture {
                        position: neighbor,
                        previous_owner,
                    });
                }
            }
            grid.add_orb(neighbor, trigger);
            if grid.is_unstable(neighbor) {
                self.enqueue(neighbor);
            }
        }

        if remaining >= critical {
            self.enqueue(pos);
        }

        trace!(
            step,
            row = pos.row,
            col = pos.col,
            remaining,
            captures = captures.len(),
            "cell exploded"
        );

        ExplosionEvent {
            step,
            exploded: pos,
            affected_neighbors: neighbors,
            resulting_owner: trigger,
            remaining_orbs: remaining,
            captures,
            eliminated: SmallVec::new(),
        }
    }
}
