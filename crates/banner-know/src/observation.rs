use banner_core::{AgentInfo, AgentView, FlagInfo, Loc, INF};

/// Per-turn snapshot of everything within vision, plus a few summaries the
/// decision layer keys on. Fully recomputed by [`Observation::refresh`];
/// the centroid markers are the only fields that survive turns with nothing
/// visible, as "last seen at round R" memories.
#[derive(Debug, Clone, Default)]
pub struct Observation {
    pub friendlies: Vec<AgentInfo>,
    pub enemies: Vec<AgentInfo>,
    pub nearest_friendly: Option<AgentInfo>,
    pub nearest_enemy: Option<AgentInfo>,
    /// Centroid of visible friendlies and the round it was computed.
    pub friendly_centroid: Option<(Loc, u32)>,
    /// Centroid of visible enemies and the round it was computed.
    pub enemy_centroid: Option<(Loc, u32)>,
    pub flags: Vec<FlagInfo>,
    /// Nearest enemy flag in vision, picked up or not.
    pub nearest_enemy_flag: Option<FlagInfo>,
}

impl Observation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, world: &impl AgentView) {
        let me = world.location();
        let team = world.team();
        let round = world.round();

        self.friendlies.clear();
        self.enemies.clear();
        self.nearest_friendly = None;
        self.nearest_enemy = None;

        let mut friendly_sum = (0i64, 0i64);
        let mut enemy_sum = (0i64, 0i64);
        let mut nearest_friendly_dist = INF;
        let mut nearest_enemy_dist = INF;

        for agent in world.visible_agents() {
            let dist = me.distance_squared(agent.at);
            if agent.team == team {
                friendly_sum.0 += agent.at.x as i64;
                friendly_sum.1 += agent.at.y as i64;
                if dist < nearest_friendly_dist {
                    self.nearest_friendly = Some(agent);
                    nearest_friendly_dist = dist;
                }
                self.friendlies.push(agent);
            } else {
                enemy_sum.0 += agent.at.x as i64;
                enemy_sum.1 += agent.at.y as i64;
                if dist < nearest_enemy_dist {
                    self.nearest_enemy = Some(agent);
                    nearest_enemy_dist = dist;
                }
                self.enemies.push(agent);
            }
        }

        if !self.friendlies.is_empty() {
            let n = self.friendlies.len() as i64;
            self.friendly_centroid = Some((
                Loc::new((friendly_sum.0 / n) as i32, (friendly_sum.1 / n) as i32),
                round,
            ));
        }
        if !self.enemies.is_empty() {
            let n = self.enemies.len() as i64;
            self.enemy_centroid = Some((
                Loc::new((enemy_sum.0 / n) as i32, (enemy_sum.1 / n) as i32),
                round,
            ));
        }

        self.flags = world.visible_flags();
        self.nearest_enemy_flag = None;
        let mut nearest_flag_dist = INF;
        for flag in &self.flags {
            if flag.team == team.opponent() {
                let dist = me.distance_squared(flag.at);
                if dist < nearest_flag_dist {
                    self.nearest_enemy_flag = Some(*flag);
                    nearest_flag_dist = dist;
                }
            }
        }
    }
}
