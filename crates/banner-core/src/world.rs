#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::grid::{Direction, Loc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// One visible agent, as reported by sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentInfo {
    pub id: u32,
    pub team: Team,
    pub at: Loc,
    pub health: i32,
    pub action_ready: bool,
}

/// One visible flag, including pick-up state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagInfo {
    pub id: u16,
    pub team: Team,
    pub at: Loc,
    pub picked_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrapKind {
    Stun,
    Explosive,
}

/// Read-only view of the environment as seen by one agent this turn.
///
/// The core crate does not prescribe how sensing works; the environment
/// (or the simulator) implements this for each agent. Everything is
/// bounded by the vision radius except `broadcast_flag_locations`, which
/// is map-wide but noisy.
pub trait AgentView {
    fn id(&self) -> u32;
    fn team(&self) -> Team;
    fn round(&self) -> u32;
    fn map_size(&self) -> (i32, i32);

    /// False while the agent is waiting to be placed on the map.
    fn is_spawned(&self) -> bool;
    fn location(&self) -> Loc;
    fn health(&self) -> i32;
    fn is_action_ready(&self) -> bool;
    fn is_movement_ready(&self) -> bool;
    /// True while this agent carries an enemy flag.
    fn has_flag(&self) -> bool;
    fn has_capture_upgrade(&self) -> bool;
    /// Spendable build resource.
    fn resources(&self) -> i32;

    fn visible_agents(&self) -> Vec<AgentInfo>;
    fn visible_flags(&self) -> Vec<FlagInfo>;
    /// Approximate locations of enemy flags still in play. May be empty;
    /// each entry is within the broadcast noise radius of a real flag's
    /// default site.
    fn broadcast_flag_locations(&self) -> Vec<Loc>;
    /// Whether terrain at `at` can be stood on. Only meaningful within
    /// vision.
    fn is_passable(&self, at: Loc) -> bool;
    /// True when no agent occupies `at`. Only meaningful within vision.
    fn is_unoccupied(&self, at: Loc) -> bool;
    fn spawn_sites(&self) -> Vec<Loc>;

    fn read_slot(&self, index: usize) -> u16;
}

/// Actuation surface. Every action has a legality predicate that MUST be
/// consulted first; acting illegally is a [`ProtocolError`], not a game
/// event.
pub trait AgentWorld: AgentView {
    fn can_step(&self, dir: Direction) -> bool;
    fn step(&mut self, dir: Direction) -> Result<(), ProtocolError>;

    fn can_attack(&self, at: Loc) -> bool;
    fn attack(&mut self, at: Loc) -> Result<(), ProtocolError>;

    fn can_heal(&self, at: Loc) -> bool;
    fn heal(&mut self, at: Loc) -> Result<(), ProtocolError>;

    fn can_build_trap(&self, kind: TrapKind, at: Loc) -> bool;
    fn build_trap(&mut self, kind: TrapKind, at: Loc) -> Result<(), ProtocolError>;
    /// Trap of the given kind already present at `at`, within vision.
    fn trap_at(&self, at: Loc) -> Option<TrapKind>;

    fn can_pickup_flag(&self, at: Loc) -> bool;
    fn pickup_flag(&mut self, at: Loc) -> Result<(), ProtocolError>;

    fn can_spawn(&self, at: Loc) -> bool;
    fn spawn(&mut self, at: Loc) -> Result<(), ProtocolError>;

    fn write_slot(&mut self, index: usize, value: u16);
}
