use banner_core::{AgentInfo, AgentView, AgentWorld, Direction, FlagInfo, Loc, ProtocolError, Team, TrapKind};

/// Stationary world for knowledge tests: a shared array, scripted flag and
/// broadcast sightings, and a settable round counter.
pub struct KnowWorld {
    pub round: u32,
    pub team: Team,
    pub at: Loc,
    pub flags: Vec<FlagInfo>,
    pub broadcasts: Vec<Loc>,
    pub slots: Vec<u16>,
}

impl KnowWorld {
    pub fn new() -> Self {
        Self {
            round: 1,
            team: Team::Red,
            at: Loc::new(0, 0),
            flags: Vec::new(),
            broadcasts: Vec::new(),
            slots: vec![0; 64],
        }
    }
}

impl AgentView for KnowWorld {
    fn id(&self) -> u32 {
        1
    }
    fn team(&self) -> Team {
        self.team
    }
    fn round(&self) -> u32 {
        self.round
    }
    fn map_size(&self) -> (i32, i32) {
        (60, 60)
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
        false
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
        self.flags.clone()
    }
    fn broadcast_flag_locations(&self) -> Vec<Loc> {
        self.broadcasts.clone()
    }
    fn is_passable(&self, _at: Loc) -> bool {
        true
    }
    fn is_unoccupied(&self, _at: Loc) -> bool {
        true
    }
    fn spawn_sites(&self) -> Vec<Loc> {
        Vec::new()
    }
    fn read_slot(&self, index: usize) -> u16 {
        self.slots[index]
    }
}

impl AgentWorld for KnowWorld {
    fn can_step(&self, _dir: Direction) -> bool {
        false
    }
    fn step(&mut self, dir: Direction) -> Result<(), ProtocolError> {
        Err(ProtocolError::IllegalAction {
            action: "step",
            at: self.at.offset(dir),
        })
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
    fn write_slot(&mut self, index: usize, value: u16) {
        self.slots[index] = value;
    }
}
