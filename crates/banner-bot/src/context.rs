use banner_core::{derive_seed, Loc, Rules, SplitMix64};
use banner_know::{BroadcastTracker, FlagMemory, Observation};
use banner_nav::{Explorer, HybridNav, ReturnMap};

/// All mutable state one agent carries between turns.
///
/// Nothing here is shared: several contexts can run against the same world
/// in one process, which is exactly how the simulator and the integration
/// tests exercise the team.
pub struct BotContext {
    pub(crate) rules: Rules,
    pub(crate) rng: SplitMix64,
    pub(crate) observation: Observation,
    pub(crate) flag_memory: FlagMemory,
    pub(crate) broadcast: BroadcastTracker,
    pub(crate) nav: HybridNav,
    pub(crate) explorer: Explorer,
    pub(crate) return_map: ReturnMap,
    pub(crate) last_spawn: Option<Loc>,
    pub(crate) round_last_attacked: u32,
    /// Effective drop-reset threshold, recomputed at the top of every turn
    /// from the currently-held upgrades.
    pub(crate) drop_reset_rounds: u32,
}

impl BotContext {
    pub fn new(rules: Rules, agent_id: u32, match_seed: u64) -> Self {
        Self {
            rules,
            rng: SplitMix64::new(derive_seed(match_seed, agent_id as u64, 0)),
            observation: Observation::new(),
            flag_memory: FlagMemory::new(),
            broadcast: BroadcastTracker::new(),
            nav: HybridNav::new(),
            explorer: Explorer::new(),
            return_map: ReturnMap::new(),
            last_spawn: None,
            round_last_attacked: 0,
            drop_reset_rounds: rules.flag_dropped_reset_rounds,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn flag_memory(&self) -> &FlagMemory {
        &self.flag_memory
    }

    pub fn broadcast(&self) -> &BroadcastTracker {
        &self.broadcast
    }

    pub fn return_map(&self) -> &ReturnMap {
        &self.return_map
    }

    pub fn last_spawn(&self) -> Option<Loc> {
        self.last_spawn
    }
}
