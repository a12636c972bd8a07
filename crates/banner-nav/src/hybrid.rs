use std::collections::HashSet;

use banner_core::{
    AgentWorld, DeterministicRng, Direction, Loc, ProtocolError, ADJACENT_DISTANCE_SQUARED, INF,
};

/// Result of one `advance` call. `Stuck` is an ordinary outcome, not an
/// error: the caller is free to try a different destination this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Arrived,
    /// Movement budget exhausted before arrival.
    OutOfMoves,
    /// No step makes progress and the perimeter walk gave up.
    Stuck,
}

#[derive(Debug, Clone, Default)]
enum Mode {
    #[default]
    Direct,
    Perimeter {
        /// The blocked neighbor currently being walked around.
        obstacle: Loc,
        /// Cells stepped on during this perimeter episode. Revisiting one
        /// means the obstacle was circumnavigated without progress.
        visited: HashSet<Loc>,
        rotate_left: bool,
        /// Squared distance to the destination when the episode began.
        start_dist_sq: i32,
    },
}

/// Two-mode navigation state machine.
///
/// `Direct` greedily steps to the neighbor closest to the destination and
/// demands strict improvement; on a local minimum it switches to
/// `Perimeter`, which follows the blocking obstacle's edge (handedness
/// chosen at random per episode) until progress is made, the obstacle
/// moves, or the episode proves futile. State resets whenever the
/// destination changes between calls or something else moved the agent.
#[derive(Debug, Clone, Default)]
pub struct HybridNav {
    mode: Mode,
    last_end: Option<Loc>,
    last_dest: Option<Loc>,
}

impl HybridNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance toward `dest` using the world's own step legality.
    pub fn advance<W: AgentWorld>(
        &mut self,
        world: &mut W,
        rng: &mut impl DeterministicRng,
        dest: Loc,
    ) -> Result<NavOutcome, ProtocolError> {
        self.advance_with(world, rng, dest, |w: &W, d| w.can_step(d))
    }

    /// Advance toward `dest`, consulting `can_step` for step legality.
    /// Takes one or more unit steps, as many as the movement budget allows.
    pub fn advance_with<W, F>(
        &mut self,
        world: &mut W,
        rng: &mut impl DeterministicRng,
        dest: Loc,
        can_step: F,
    ) -> Result<NavOutcome, ProtocolError>
    where
        W: AgentWorld,
        F: Fn(&W, Direction) -> bool,
    {
        if !world.is_movement_ready() {
            return Ok(NavOutcome::OutOfMoves);
        }

        if self.last_end != Some(world.location()) || self.last_dest != Some(dest) {
            self.mode = Mode::Direct;
        }

        let mut stuck = false;
        while !stuck && world.is_movement_ready() && world.location() != dest {
            stuck = match std::mem::take(&mut self.mode) {
                Mode::Direct => self.direct_step(world, rng, dest, &can_step)?,
                Mode::Perimeter {
                    obstacle,
                    visited,
                    rotate_left,
                    start_dist_sq,
                } => self.perimeter_step(
                    world,
                    dest,
                    &can_step,
                    obstacle,
                    visited,
                    rotate_left,
                    start_dist_sq,
                )?,
            };
        }

        self.last_end = Some(world.location());
        self.last_dest = Some(dest);

        if world.location() == dest {
            Ok(NavOutcome::Arrived)
        } else if stuck {
            Ok(NavOutcome::Stuck)
        } else {
            Ok(NavOutcome::OutOfMoves)
        }
    }

    /// Greedy step; returns whether the agent is stuck. Leaves `self.mode`
    /// set for the next iteration.
    fn direct_step<W, F>(
        &mut self,
        world: &mut W,
        rng: &mut impl DeterministicRng,
        dest: Loc,
        can_step: &F,
    ) -> Result<bool, ProtocolError>
    where
        W: AgentWorld,
        F: Fn(&W, Direction) -> bool,
    {
        let here = world.location();
        let mut best_dir = None;
        let mut best_dist = INF;
        for dir in Direction::COMPASS {
            if !can_step(world, dir) {
                continue;
            }
            let dist = here.offset(dir).distance_squared(dest);
            if best_dir.is_none() || dist < best_dist {
                best_dir = Some(dir);
                best_dist = dist;
            }
        }

        let Some(dir) = best_dir else {
            // Boxed in on all eight sides.
            return Ok(true);
        };

        if best_dist < here.distance_squared(dest) {
            world.step(dir)?;
        } else {
            // Local minimum: start walking the obstacle's edge.
            self.mode = Mode::Perimeter {
                obstacle: here.offset(here.direction_to(dest)),
                visited: HashSet::new(),
                rotate_left: rng.next_bool(),
                start_dist_sq: here.distance_squared(dest),
            };
        }
        Ok(false)
    }

    /// One perimeter-following step; returns whether the agent is stuck.
    #[allow(clippy::too_many_arguments)]
    fn perimeter_step<W, F>(
        &mut self,
        world: &mut W,
        dest: Loc,
        can_step: &F,
        mut obstacle: Loc,
        mut visited: HashSet<Loc>,
        rotate_left: bool,
        start_dist_sq: i32,
    ) -> Result<bool, ProtocolError>
    where
        W: AgentWorld,
        F: Fn(&W, Direction) -> bool,
    {
        let here = world.location();

        if visited.contains(&here) {
            // Full lap with no progress; try direct mode again.
            return Ok(false);
        }

        if here.distance_squared(dest) <= ADJACENT_DISTANCE_SQUARED
            && !can_step(world, here.direction_to(dest))
        {
            // Adjacent but blocked: the destination itself is obstructed,
            // walking away from it would not help.
            return Ok(true);
        }

        let mut dir = here.direction_to(obstacle);
        if can_step(world, dir) {
            // The obstacle moved out of the way.
            return Ok(false);
        }

        let mut rotations = 0;
        while !can_step(world, dir) && rotations < 8 {
            obstacle = here.offset(dir);
            dir = if rotate_left {
                dir.rotate_left()
            } else {
                dir.rotate_right()
            };
            rotations += 1;
        }

        if !can_step(world, dir) {
            // Fully enclosed.
            return Ok(true);
        }

        visited.insert(here);
        world.step(dir)?;

        if world.location().distance_squared(dest) < start_dist_sq {
            // Progress past the episode's starting distance; go direct.
            return Ok(false);
        }

        self.mode = Mode::Perimeter {
            obstacle,
            visited,
            rotate_left,
            start_dist_sq,
        };
        Ok(false)
    }
}
