use tracing::trace;

use banner_core::{AgentView, AgentWorld, Direction, Loc, ProtocolError, TrapKind};

use crate::context::BotContext;

/// Squared distance a like trap suppresses further trap building within.
const TRAP_SPACING_SQUARED: i32 = 9;

impl BotContext {
    /// Attack the most finishable reachable enemy: lowest health wins,
    /// distance breaks ties.
    pub(crate) fn attack<W: AgentWorld>(&mut self, world: &mut W) -> Result<(), ProtocolError> {
        let here = world.location();
        let mut best: Option<(Loc, f64)> = None;
        for enemy in &self.observation.enemies {
            if !world.can_attack(enemy.at) {
                continue;
            }
            let score = enemy.health as f64 + here.distance_squared(enemy.at) as f64;
            if best.map(|(_, b)| score < b).unwrap_or(true) {
                best = Some((enemy.at, score));
            }
        }
        if let Some((at, _)) = best {
            world.attack(at)?;
            self.round_last_attacked = world.round();
            trace!(agent = world.id(), at = %at, "attacked");
        }
        Ok(())
    }

    /// Heal the lowest-health reachable friendly, but never in the middle
    /// of an exchange: attacking in the last two rounds takes precedence.
    pub(crate) fn heal<W: AgentWorld>(&mut self, world: &mut W) -> Result<(), ProtocolError> {
        if world.round().saturating_sub(self.round_last_attacked) < 2 {
            return Ok(());
        }
        let mut best: Option<(Loc, i32)> = None;
        for friend in &self.observation.friendlies {
            if !world.can_heal(friend.at) {
                continue;
            }
            if best.map(|(_, h)| friend.health < h).unwrap_or(true) {
                best = Some((friend.at, friend.health));
            }
        }
        if let Some((at, _)) = best {
            world.heal(at)?;
            trace!(agent = world.id(), at = %at, "healed");
        }
        Ok(())
    }

    /// Ring the flag an agent is standing on with traps: stun on the
    /// orthogonal neighbors, explosive on the diagonals.
    pub(crate) fn build_defensive_traps<W: AgentWorld>(
        &self,
        world: &mut W,
    ) -> Result<(), ProtocolError> {
        let own = world.team();
        let here = world.location();
        let on_own_flag = self
            .observation
            .flags
            .iter()
            .any(|f| f.team == own && f.at == here);
        if !on_own_flag {
            return Ok(());
        }

        for dir in Direction::COMPASS {
            let at = here.offset(dir);
            let kind = if here.distance_squared(at) == 1 {
                TrapKind::Stun
            } else {
                TrapKind::Explosive
            };
            if world.can_build_trap(kind, at) {
                world.build_trap(kind, at)?;
            }
        }
        Ok(())
    }

    /// Drop a trap into a brewing mass fight when the local pressure
    /// justifies the spend.
    pub(crate) fn build_combat_traps<W: AgentWorld>(
        &self,
        world: &mut W,
    ) -> Result<(), ProtocolError> {
        let enemies = &self.observation.enemies;
        let friendlies = &self.observation.friendlies;
        if enemies.len() < 5 {
            return Ok(());
        }

        let kind = if friendlies.len() >= 5 {
            TrapKind::Stun
        } else {
            TrapKind::Explosive
        };
        let outnumbered_scalar = 1.2f64.powi(enemies.len() as i32 - friendlies.len() as i32);
        let spend_threshold = 1000.0 / world.resources() as f64;

        let here = world.location();
        let mut best: Option<(Loc, f64)> = None;
        for dir in Direction::COMPASS {
            let at = here.offset(dir);
            if !world.can_build_trap(kind, at) || !world.is_passable(at) {
                continue;
            }
            let pressure: f64 = enemies
                .iter()
                .map(|e| 1.0 / at.distance_squared(e.at) as f64)
                .sum();
            let score = pressure * outnumbered_scalar;
            if score >= spend_threshold
                && best.map(|(_, b)| score > b).unwrap_or(true)
                && !self.like_trap_nearby(world, kind, at)
            {
                best = Some((at, score));
            }
        }

        if let Some((at, _)) = best {
            world.build_trap(kind, at)?;
            trace!(agent = world.id(), at = %at, ?kind, "built combat trap");
        }
        Ok(())
    }

    fn like_trap_nearby<W: AgentWorld>(&self, world: &W, kind: TrapKind, at: Loc) -> bool {
        for dx in -3..=3 {
            for dy in -3..=3 {
                let cell = Loc::new(at.x + dx, at.y + dy);
                if at.distance_squared(cell) <= TRAP_SPACING_SQUARED
                    && world.trap_at(cell) == Some(kind)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Score a candidate cell for combat positioning, higher is better.
    ///
    /// Rewards standing where exactly one enemy can trade with a ready
    /// agent, punishes exposure while on cooldown, and otherwise weighs
    /// remaining health against the worst-case trap hit; everything decays
    /// with distance from the engagement anchor (the nearest enemy, or the
    /// last-seen enemy centroid once nothing is visible).
    pub(crate) fn combat_score<W: AgentView>(&self, world: &W, at: Loc) -> f64 {
        let anchor = self
            .observation
            .nearest_enemy
            .map(|e| e.at)
            .or_else(|| self.observation.enemy_centroid.map(|(loc, _)| loc));
        let Some(anchor) = anchor else {
            return 0.0;
        };

        let in_reach = self
            .observation
            .enemies
            .iter()
            .filter(|e| e.at.distance_squared(at) <= self.rules.action_radius_squared)
            .count();

        let numerator = if in_reach == 1 && world.is_action_ready() {
            1.0
        } else if !world.is_action_ready() {
            -(in_reach as f64)
        } else {
            (world.health() - self.rules.explosive_trap_damage) as f64
                / self.rules.max_health as f64
        };

        numerator / (1 + at.distance_squared(anchor)) as f64
    }
}
