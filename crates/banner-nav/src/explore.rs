use banner_core::{AgentWorld, DeterministicRng, Direction, Loc, ProtocolError};

/// Random-walk exploration with a persistent long-range bearing.
///
/// Targets are drawn from a rectangle twice the map size, centered on the
/// map, so edge and corner regions get as much traffic as the middle;
/// off-map targets are fine because the walk only ever takes legal steps.
/// A target is re-rolled when reached or when the greedy step toward it is
/// blocked, with a bounded number of attempts per turn.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    target: Option<Loc>,
    last_end: Option<Loc>,
}

const REROLL_ATTEMPTS: i32 = 10;

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<Loc> {
        self.target
    }

    /// Take greedy steps toward the current target while the movement
    /// budget allows, re-rolling the target as needed. Returns whether any
    /// step was taken.
    pub fn step<W: AgentWorld>(
        &mut self,
        world: &mut W,
        rng: &mut impl DeterministicRng,
    ) -> Result<bool, ProtocolError> {
        if self.last_end.is_some() && self.last_end != Some(world.location()) {
            // Something else moved the agent since last time; the old
            // bearing is meaningless now.
            self.target = None;
        }

        let (width, height) = world.map_size();
        let mut moved = false;

        while world.is_movement_ready() {
            let mut attempts = REROLL_ATTEMPTS;
            while attempts >= 0 && !self.target_is_usable(world) {
                self.target = Some(Loc::new(
                    rng.next_below(2 * width as u32) as i32 - width / 2,
                    rng.next_below(2 * height as u32) as i32 - height / 2,
                ));
                attempts -= 1;
            }

            let Some(target) = self.target else { break };
            let dir = world.location().direction_to(target);
            if dir != Direction::Center && world.can_step(dir) {
                world.step(dir)?;
                moved = true;
            } else {
                break;
            }
        }

        self.last_end = Some(world.location());
        Ok(moved)
    }

    fn target_is_usable<W: AgentWorld>(&self, world: &W) -> bool {
        match self.target {
            Some(target) => {
                let here = world.location();
                here != target && world.can_step(here.direction_to(target))
            }
            None => false,
        }
    }
}
