use std::collections::{HashMap, HashSet};

use banner_core::{
    AgentInfo, AgentView, AgentWorld, DeterministicRng, Direction, FlagInfo, Loc, ProtocolError,
    Rules, SplitMix64, Team, TrapKind,
};

use crate::scenario::Scenario;

pub const ATTACK_DAMAGE: i32 = 150;
pub const HEAL_AMOUNT: i32 = 80;
pub const PASSIVE_INCOME: i32 = 10;
pub const STARTING_RESOURCES: i32 = 400;
/// Squared reach for pickups and trap building.
pub const INTERACT_RADIUS_SQUARED: i32 = 2;

const fn trap_cost(kind: TrapKind) -> i32 {
    match kind {
        TrapKind::Stun => 100,
        TrapKind::Explosive => 250,
    }
}

#[derive(Debug, Clone)]
struct FlagState {
    id: u16,
    team: Team,
    at: Loc,
    home: Loc,
    carrier: Option<u32>,
    captured: bool,
}

#[derive(Debug, Clone)]
struct AgentState {
    id: u32,
    team: Team,
    at: Option<Loc>,
    health: i32,
    moved: bool,
    acted: bool,
}

/// The whole match state. Agents interact with it through [`AgentHandle`],
/// which scopes every query and action to one agent's viewpoint.
pub struct SimWorld {
    rules: Rules,
    round: u32,
    rng: SplitMix64,
    walls: HashSet<Loc>,
    traps: HashMap<Loc, (TrapKind, Team)>,
    flags: Vec<FlagState>,
    agents: Vec<AgentState>,
    spawns: [Vec<Loc>; 2],
    shared: [Vec<u16>; 2],
    resources: [i32; 2],
    captures: [u32; 2],
    broadcasts: [Vec<Loc>; 2],
    capture_upgrade_round: Option<u32>,
}

const fn team_index(team: Team) -> usize {
    match team {
        Team::Red => 0,
        Team::Blue => 1,
    }
}

impl SimWorld {
    pub fn new(scenario: &Scenario) -> Self {
        let rules = scenario.rules;
        let mut flags = Vec::new();
        let mut next_flag_id = 1u16;
        for (team, sites) in [
            (Team::Red, &scenario.red_flags),
            (Team::Blue, &scenario.blue_flags),
        ] {
            for &at in sites.iter() {
                flags.push(FlagState {
                    id: next_flag_id,
                    team,
                    at,
                    home: at,
                    carrier: None,
                    captured: false,
                });
                next_flag_id += 1;
            }
        }

        let mut agents = Vec::new();
        let mut next_agent_id = 1u32;
        for team in [Team::Red, Team::Blue] {
            for _ in 0..scenario.agents_per_team {
                agents.push(AgentState {
                    id: next_agent_id,
                    team,
                    at: None,
                    health: rules.max_health,
                    moved: false,
                    acted: false,
                });
                next_agent_id += 1;
            }
        }

        Self {
            rules,
            round: 0,
            rng: SplitMix64::new(scenario.seed ^ 0xB4BE),
            walls: scenario.walls.iter().copied().collect(),
            traps: HashMap::new(),
            flags,
            agents,
            spawns: [scenario.red_spawns.clone(), scenario.blue_spawns.clone()],
            shared: [
                vec![0; rules.shared_array_len],
                vec![0; rules.shared_array_len],
            ],
            resources: [STARTING_RESOURCES; 2],
            captures: [0; 2],
            broadcasts: [Vec::new(), Vec::new()],
            capture_upgrade_round: scenario.capture_upgrade_round,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn captures(&self, team: Team) -> u32 {
        self.captures[team_index(team)]
    }

    pub fn agent_ids(&self) -> Vec<u32> {
        self.agents.iter().map(|a| a.id).collect()
    }

    pub fn agent_team(&self, id: u32) -> Option<Team> {
        self.agents.iter().find(|a| a.id == id).map(|a| a.team)
    }

    pub fn agent_location(&self, id: u32) -> Option<Loc> {
        self.agents.iter().find(|a| a.id == id).and_then(|a| a.at)
    }

    pub fn shared_array(&self, team: Team) -> &[u16] {
        &self.shared[team_index(team)]
    }

    pub fn flags_in_play(&self, team: Team) -> usize {
        self.flags
            .iter()
            .filter(|f| f.team == team && !f.captured)
            .count()
    }

    /// Advance to the next round: refresh readiness, pay income, and
    /// re-noise the broadcast reports.
    pub fn begin_round(&mut self) {
        self.round += 1;
        for agent in &mut self.agents {
            agent.moved = false;
            agent.acted = false;
        }
        for r in &mut self.resources {
            *r += PASSIVE_INCOME;
        }

        let noise = self.rules.broadcast_noise_radius;
        for team in [Team::Red, Team::Blue] {
            let enemy = team.opponent();
            let mut reports = Vec::new();
            for flag in self.flags.iter().filter(|f| f.team == enemy && !f.captured) {
                let (dx, dy) = loop {
                    let dx = self.rng.next_below(7) as i32 - 3;
                    let dy = self.rng.next_below(7) as i32 - 3;
                    if dx * dx + dy * dy <= noise {
                        break (dx, dy);
                    }
                };
                let reported = Loc::new(
                    (flag.home.x + dx).clamp(0, self.rules.map_width - 1),
                    (flag.home.y + dy).clamp(0, self.rules.map_height - 1),
                );
                reports.push(reported);
            }
            self.broadcasts[team_index(team)] = reports;
        }
    }

    /// Borrow the world as one agent for its turn.
    pub fn handle(&mut self, agent_id: u32) -> AgentHandle<'_> {
        let index = self
            .agents
            .iter()
            .position(|a| a.id == agent_id)
            .expect("unknown agent id");
        AgentHandle { world: self, index }
    }

    fn agent_at(&self, at: Loc) -> Option<&AgentState> {
        self.agents.iter().find(|a| a.at == Some(at))
    }

    fn occupied(&self, at: Loc) -> bool {
        self.agent_at(at).is_some()
    }

    fn passable(&self, at: Loc) -> bool {
        at.is_within(self.rules.map_width, self.rules.map_height) && !self.walls.contains(&at)
    }

    fn kill(&mut self, index: usize) {
        let at = self.agents[index].at.take();
        let id = self.agents[index].id;
        self.agents[index].health = self.rules.max_health;
        if let Some(at) = at {
            for flag in &mut self.flags {
                if flag.carrier == Some(id) {
                    flag.carrier = None;
                    flag.at = at;
                }
            }
        }
    }
}

/// The world as seen and acted on by one agent.
pub struct AgentHandle<'a> {
    world: &'a mut SimWorld,
    index: usize,
}

impl AgentHandle<'_> {
    fn me(&self) -> &AgentState {
        &self.world.agents[self.index]
    }

    fn in_vision(&self, at: Loc) -> bool {
        match self.me().at {
            Some(here) => here.distance_squared(at) <= self.world.rules.vision_radius_squared,
            None => false,
        }
    }

    fn illegal(&self, action: &'static str, at: Loc) -> ProtocolError {
        ProtocolError::IllegalAction { action, at }
    }
}

impl AgentView for AgentHandle<'_> {
    fn id(&self) -> u32 {
        self.me().id
    }

    fn team(&self) -> Team {
        self.me().team
    }

    fn round(&self) -> u32 {
        self.world.round
    }

    fn map_size(&self) -> (i32, i32) {
        (self.world.rules.map_width, self.world.rules.map_height)
    }

    fn is_spawned(&self) -> bool {
        self.me().at.is_some()
    }

    fn location(&self) -> Loc {
        self.me().at.expect("location queried before spawn")
    }

    fn health(&self) -> i32 {
        self.me().health
    }

    fn is_action_ready(&self) -> bool {
        self.is_spawned() && !self.me().acted
    }

    fn is_movement_ready(&self) -> bool {
        self.is_spawned() && !self.me().moved
    }

    fn has_flag(&self) -> bool {
        let id = self.me().id;
        self.world.flags.iter().any(|f| f.carrier == Some(id))
    }

    fn has_capture_upgrade(&self) -> bool {
        self.world
            .capture_upgrade_round
            .map(|r| self.world.round >= r)
            .unwrap_or(false)
    }

    fn resources(&self) -> i32 {
        self.world.resources[team_index(self.me().team)]
    }

    fn visible_agents(&self) -> Vec<AgentInfo> {
        let my_id = self.me().id;
        self.world
            .agents
            .iter()
            .filter(|a| a.id != my_id)
            .filter_map(|a| {
                let at = a.at?;
                if !self.in_vision(at) {
                    return None;
                }
                Some(AgentInfo {
                    id: a.id,
                    team: a.team,
                    at,
                    health: a.health,
                    action_ready: !a.acted,
                })
            })
            .collect()
    }

    fn visible_flags(&self) -> Vec<FlagInfo> {
        self.world
            .flags
            .iter()
            .filter(|f| !f.captured && self.in_vision(f.at))
            .map(|f| FlagInfo {
                id: f.id,
                team: f.team,
                at: f.at,
                picked_up: f.carrier.is_some(),
            })
            .collect()
    }

    fn broadcast_flag_locations(&self) -> Vec<Loc> {
        self.world.broadcasts[team_index(self.me().team)].clone()
    }

    fn is_passable(&self, at: Loc) -> bool {
        self.world.passable(at)
    }

    fn is_unoccupied(&self, at: Loc) -> bool {
        !self.world.occupied(at)
    }

    fn spawn_sites(&self) -> Vec<Loc> {
        self.world.spawns[team_index(self.me().team)].clone()
    }

    fn read_slot(&self, index: usize) -> u16 {
        self.world.shared[team_index(self.me().team)][index]
    }
}

impl AgentWorld for AgentHandle<'_> {
    fn can_step(&self, dir: Direction) -> bool {
        if dir == Direction::Center || !self.is_movement_ready() {
            return false;
        }
        let to = self.location().offset(dir);
        self.world.passable(to) && !self.world.occupied(to)
    }

    fn step(&mut self, dir: Direction) -> Result<(), ProtocolError> {
        if !self.can_step(dir) {
            return Err(self.illegal("step", self.location().offset(dir)));
        }
        let to = self.location().offset(dir);
        let me = &mut self.world.agents[self.index];
        me.at = Some(to);
        me.moved = true;
        let id = me.id;
        let team = me.team;

        // Enemy traps trigger on entry.
        if let Some(&(kind, owner)) = self.world.traps.get(&to) {
            if owner != team {
                self.world.traps.remove(&to);
                if kind == TrapKind::Explosive {
                    self.world.agents[self.index].health -= self.world.rules.explosive_trap_damage;
                    if self.world.agents[self.index].health <= 0 {
                        self.world.kill(self.index);
                        return Ok(());
                    }
                }
            }
        }

        // A carried flag travels with the carrier and scores on reaching
        // any friendly spawn site.
        let carried = self
            .world
            .flags
            .iter()
            .position(|f| f.carrier == Some(id));
        if let Some(fi) = carried {
            self.world.flags[fi].at = to;
            if self.world.spawns[team_index(team)].contains(&to) {
                self.world.flags[fi].captured = true;
                self.world.flags[fi].carrier = None;
                self.world.captures[team_index(team)] += 1;
            }
        }
        Ok(())
    }

    fn can_attack(&self, at: Loc) -> bool {
        self.is_action_ready()
            && self.location().distance_squared(at) <= self.world.rules.action_radius_squared
            && self
                .world
                .agent_at(at)
                .map(|a| a.team != self.me().team)
                .unwrap_or(false)
    }

    fn attack(&mut self, at: Loc) -> Result<(), ProtocolError> {
        if !self.can_attack(at) {
            return Err(self.illegal("attack", at));
        }
        self.world.agents[self.index].acted = true;
        let victim = self
            .world
            .agents
            .iter()
            .position(|a| a.at == Some(at))
            .expect("can_attack checked occupancy");
        self.world.agents[victim].health -= ATTACK_DAMAGE;
        if self.world.agents[victim].health <= 0 {
            self.world.kill(victim);
        }
        Ok(())
    }

    fn can_heal(&self, at: Loc) -> bool {
        self.is_action_ready()
            && self.location().distance_squared(at) <= self.world.rules.action_radius_squared
            && self
                .world
                .agent_at(at)
                .map(|a| a.team == self.me().team && a.health < self.world.rules.max_health)
                .unwrap_or(false)
    }

    fn heal(&mut self, at: Loc) -> Result<(), ProtocolError> {
        if !self.can_heal(at) {
            return Err(self.illegal("heal", at));
        }
        self.world.agents[self.index].acted = true;
        let max = self.world.rules.max_health;
        let patient = self
            .world
            .agents
            .iter()
            .position(|a| a.at == Some(at))
            .expect("can_heal checked occupancy");
        self.world.agents[patient].health = (self.world.agents[patient].health + HEAL_AMOUNT).min(max);
        Ok(())
    }

    fn can_build_trap(&self, kind: TrapKind, at: Loc) -> bool {
        self.is_action_ready()
            && self.location().distance_squared(at) <= INTERACT_RADIUS_SQUARED
            && at != self.location()
            && self.world.passable(at)
            && !self.world.occupied(at)
            && !self.world.traps.contains_key(&at)
            && self.resources() >= trap_cost(kind)
    }

    fn build_trap(&mut self, kind: TrapKind, at: Loc) -> Result<(), ProtocolError> {
        if !self.can_build_trap(kind, at) {
            return Err(self.illegal("build_trap", at));
        }
        let team = self.me().team;
        self.world.agents[self.index].acted = true;
        self.world.resources[team_index(team)] -= trap_cost(kind);
        self.world.traps.insert(at, (kind, team));
        Ok(())
    }

    fn trap_at(&self, at: Loc) -> Option<TrapKind> {
        if !self.in_vision(at) {
            return None;
        }
        self.world.traps.get(&at).map(|&(kind, _)| kind)
    }

    fn can_pickup_flag(&self, at: Loc) -> bool {
        self.is_spawned()
            && self.location().distance_squared(at) <= INTERACT_RADIUS_SQUARED
            && !self.has_flag()
            && self.world.flags.iter().any(|f| {
                f.team != self.me().team && !f.captured && f.carrier.is_none() && f.at == at
            })
    }

    fn pickup_flag(&mut self, at: Loc) -> Result<(), ProtocolError> {
        if !self.can_pickup_flag(at) {
            return Err(self.illegal("pickup_flag", at));
        }
        let id = self.me().id;
        let team = self.me().team;
        let flag = self
            .world
            .flags
            .iter_mut()
            .find(|f| f.team != team && !f.captured && f.carrier.is_none() && f.at == at)
            .expect("can_pickup_flag checked presence");
        flag.carrier = Some(id);
        Ok(())
    }

    fn can_spawn(&self, at: Loc) -> bool {
        !self.is_spawned()
            && self.world.spawns[team_index(self.me().team)].contains(&at)
            && !self.world.occupied(at)
    }

    fn spawn(&mut self, at: Loc) -> Result<(), ProtocolError> {
        if !self.can_spawn(at) {
            return Err(self.illegal("spawn", at));
        }
        let me = &mut self.world.agents[self.index];
        me.at = Some(at);
        me.health = self.world.rules.max_health;
        Ok(())
    }

    fn write_slot(&mut self, index: usize, value: u16) {
        let team = self.me().team;
        self.world.shared[team_index(team)][index] = value;
    }
}
