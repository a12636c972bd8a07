use tracing::{debug, warn};

use banner_bot::BotContext;
use banner_core::Team;

use crate::scenario::Scenario;
use crate::world::SimWorld;

/// Outcome summary of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub rounds_played: u32,
    pub red_captures: u32,
    pub blue_captures: u32,
    /// Turns that ended in a caught fault instead of completing.
    pub faulted_turns: u32,
}

/// Drives one full match: every agent gets one turn per round, in stable
/// id order, and any fault in a turn is logged and contained to that turn.
pub struct Match {
    world: SimWorld,
    bots: Vec<(u32, BotContext)>,
    rounds: u32,
    faulted_turns: u32,
}

impl Match {
    pub fn new(scenario: &Scenario) -> Self {
        let world = SimWorld::new(scenario);
        let mut bots = Vec::new();
        let mut ids = world.agent_ids();
        ids.sort_unstable();
        for id in ids {
            bots.push((id, BotContext::new(scenario.rules, id, scenario.seed)));
        }
        Self {
            world,
            bots,
            rounds: scenario.rounds,
            faulted_turns: 0,
        }
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Run one round of turns. Returns false once the scheduled rounds are
    /// exhausted.
    pub fn step_round(&mut self) -> bool {
        if self.world.round() >= self.rounds {
            return false;
        }
        self.world.begin_round();
        for (id, bot) in &mut self.bots {
            let mut handle = self.world.handle(*id);
            if let Err(fault) = bot.run_turn(&mut handle) {
                // One bad turn must never forfeit the agent for the match.
                self.faulted_turns += 1;
                warn!(agent = *id, %fault, "turn faulted; continuing");
            }
        }
        debug!(
            round = self.world.round(),
            red = self.world.captures(Team::Red),
            blue = self.world.captures(Team::Blue),
            "round complete"
        );
        true
    }

    pub fn play(&mut self) -> MatchReport {
        while self.step_round() {}
        MatchReport {
            rounds_played: self.world.round(),
            red_captures: self.world.captures(Team::Red),
            blue_captures: self.world.captures(Team::Blue),
            faulted_turns: self.faulted_turns,
        }
    }
}
