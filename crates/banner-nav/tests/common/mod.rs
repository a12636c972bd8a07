// Each test binary compiles its own copy; not every test uses every helper.
#![allow(dead_code)]

use std::collections::HashSet;

use banner_core::{
    AgentInfo, AgentView, AgentWorld, Direction, FlagInfo, Loc, ProtocolError, Team, TrapKind,
};

/// Minimal deterministic world for navigation tests: static walls, one
/// agent, a per-scenario movement budget.
pub struct GridWorld {
    pub width: i32,
    pub height: i32,
    pub blocked: HashSet<Loc>,
    pub at: Loc,
    pub moves_left: u32,
    pub steps_taken: Vec<Direction>,
}

impl GridWorld {
    pub fn new(width: i32, height: i32, at: Loc) -> Self {
        Self {
            width,
            height,
            blocked: HashSet::new(),
            at,
            moves_left: 1,
            steps_taken: Vec::new(),
        }
    }

    pub fn with_budget(mut self, moves: u32) -> Self {
        self.moves_left = moves;
        self
    }

    pub fn block(&mut self, x: i32, y: i32) {
        self.blocked.insert(Loc::new(x, y));
    }
}

impl AgentView for GridWorld {
    fn id(&self) -> u32 {
        1
    }
    fn team(&self) -> Team {
        Team::Red
    }
    fn round(&self) -> u32 {
        1
    }
    fn map_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
    fn is_spawned(&self) -> bool {
        true
    }
    fn location(&self) -> Loc {
        self.at
    }
    fn health(&self) -> i32 {
        1000
    }
    fn is_action_ready(&self) -> bool {
        true
    }
    fn is_movement_ready(&self) -> bool {
        self.moves_left > 0
    }
    fn has_flag(&self) -> bool {
        false
    }
    fn has_capture_upgrade(&self) -> bool {
        false
    }
    fn resources(&self) -> i32 {
        0
    }
    fn visible_agents(&self) -> Vec<AgentInfo> {
        Vec::new()
    }
    fn visible_flags(&self) -> Vec<FlagInfo> {
        Vec::new()
    }
    fn broadcast_flag_locations(&self) -> Vec<Loc> {
        Vec::new()
    }
    fn is_passable(&self, at: Loc) -> bool {
        !self.blocked.contains(&at)
    }
    fn is_unoccupied(&self, _at: Loc) -> bool {
        true
    }
    fn spawn_sites(&self) -> Vec<Loc> {
        Vec::new()
    }
    fn read_slot(&self, _index: usize) -> u16 {
        0
    }
}

impl AgentWorld for GridWorld {
    fn can_step(&self, dir: Direction) -> bool {
        if dir == Direction::Center || self.moves_left == 0 {
            return false;
        }
        let to = self.at.offset(dir);
        to.is_within(self.width, self.height) && !self.blocked.contains(&to)
    }

    fn step(&mut self, dir: Direction) -> Result<(), ProtocolError> {
        if !self.can_step(dir) {
            return Err(ProtocolError::IllegalAction {
                action: "step",
                at: self.at.offset(dir),
            });
        }
        self.at = self.at.offset(dir);
        self.moves_left -= 1;
        self.steps_taken.push(dir);
        Ok(())
    }

    fn can_attack(&self, _at: Loc) -> bool {
        false
    }
    fn attack(&mut self, at: Loc) -> Result<(), ProtocolError> {
        Err(ProtocolError::IllegalAction {
            action: "attack",
            at,
        })
    }
    fn can_heal(&self, _at: Loc) -> bool {
        false
    }
    fn heal(&mut self, at: Loc) -> Result<(), ProtocolError> {
        Err(ProtocolError::IllegalAction { action: "heal", at })
    }
    fn can_build_trap(&self, _kind: TrapKind, _at: Loc) -> bool {
        false
    }
    fn build_trap(&mut self, _kind: TrapKind, at: Loc) -> Result<(), ProtocolError> {
        Err(ProtocolError::IllegalAction {
            action: "build_trap",
            at,
        })
    }
    fn trap_at(&self, _at: Loc) -> Option<TrapKind> {
        None
    }
    fn can_pickup_flag(&self, _at: Loc) -> bool {
        false
    }
    fn pickup_flag(&mut self, at: Loc) -> Result<(), ProtocolError> {
        Err(ProtocolError::IllegalAction {
            action: "pickup_flag",
            at,
        })
    }
    fn can_spawn(&self, _at: Loc) -> bool {
        false
    }
    fn spawn(&mut self, at: Loc) -> Result<(), ProtocolError> {
        Err(ProtocolError::IllegalAction {
            action: "spawn",
            at,
        })
    }
    fn write_slot(&mut self, _index: usize, _value: u16) {}
}
