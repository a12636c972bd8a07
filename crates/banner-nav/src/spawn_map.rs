use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use banner_core::{AgentView, AgentWorld, DeterministicRng, Direction, Loc, ProtocolError, INF};

use crate::hybrid::HybridNav;

/// Best known way home from one cell: the direction to step and how many
/// steps remain to the spawn site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathCell {
    pub toward_spawn: Direction,
    pub steps: i32,
}

/// Lazily-built table of guaranteed step counts back to the spawn site.
///
/// Sparse by construction: only cells the agent has physically occupied get
/// an entry, so memory is bounded by ground actually covered. A missing
/// entry reads as infinite distance. The map never learns about shortcuts
/// through unvisited terrain.
#[derive(Debug, Clone, Default)]
pub struct ReturnMap {
    cells: HashMap<Loc, PathCell>,
}

impl ReturnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over from a fresh spawn site.
    pub fn reset(&mut self, spawn: Loc) {
        self.cells.clear();
        self.cells.insert(
            spawn,
            PathCell {
                toward_spawn: Direction::Center,
                steps: 0,
            },
        );
    }

    pub fn get(&self, at: Loc) -> Option<PathCell> {
        self.cells.get(&at).copied()
    }

    pub fn steps(&self, at: Loc) -> i32 {
        self.cells.get(&at).map(|c| c.steps).unwrap_or(INF)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Relax the entry for the cell the agent now occupies: one more step
    /// than the best-known neighbor, remembering which neighbor that was.
    /// Called after all of a turn's movement.
    pub fn relax(&mut self, world: &impl AgentView) {
        let here = world.location();
        let (width, height) = world.map_size();
        let mut entry = self.cells.get(&here).copied().unwrap_or(PathCell {
            toward_spawn: Direction::Center,
            steps: INF,
        });
        for dir in Direction::COMPASS {
            let neighbor = here.offset(dir);
            if !neighbor.is_within(width, height) {
                continue;
            }
            if let Some(cell) = self.cells.get(&neighbor) {
                if cell.steps < entry.steps {
                    entry = PathCell {
                        toward_spawn: dir,
                        steps: 1 + cell.steps,
                    };
                }
            }
        }
        self.cells.insert(here, entry);
    }

    /// Step toward the spawn site along recorded cells.
    ///
    /// Picks the neighbor with the fewest recorded steps. When the direct
    /// step there is blocked (another agent, new terrain), routes via the
    /// hybrid engine to a fallback two cells out, composed from the blocked
    /// neighbor's own recorded direction, so progress is still made.
    pub fn step_toward_spawn<W: AgentWorld>(
        &self,
        world: &mut W,
        nav: &mut HybridNav,
        rng: &mut impl DeterministicRng,
    ) -> Result<(), ProtocolError> {
        if !world.is_movement_ready() {
            return Ok(());
        }

        let here = world.location();
        let (width, height) = world.map_size();
        let mut best: Option<(Direction, PathCell)> = None;
        for dir in Direction::COMPASS {
            let neighbor = here.offset(dir);
            if !neighbor.is_within(width, height) {
                continue;
            }
            if let Some(cell) = self.cells.get(&neighbor) {
                if cell.steps < INF && best.map(|(_, b)| cell.steps < b.steps).unwrap_or(true) {
                    best = Some((dir, *cell));
                }
            }
        }

        let Some((dir, cell)) = best else {
            // Only possible before the map has been seeded.
            return Ok(());
        };

        if world.can_step(dir) {
            world.step(dir)?;
        } else {
            let fallback = here.offset(dir).offset(cell.toward_spawn);
            nav.advance(world, rng, fallback)?;
        }
        Ok(())
    }
}
