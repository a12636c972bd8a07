use tracing::{debug, trace};

use banner_core::{AgentWorld, DeterministicRng, Direction, ProtocolError};
use banner_know::{publish_assistance, read_beacon, AssistKind};

use crate::context::BotContext;

impl BotContext {
    /// One full decision cycle. Called exactly once per turn by the
    /// harness; any error is a programming defect the harness logs and
    /// contains to this turn.
    pub fn run_turn<W: AgentWorld>(&mut self, world: &mut W) -> Result<(), ProtocolError> {
        if !world.is_spawned() {
            return self.try_spawn(world);
        }

        // Upgrade-sensitive: must be current before any reconciliation
        // arithmetic runs this turn.
        self.drop_reset_rounds = self.rules.drop_reset_rounds(world.has_capture_upgrade());

        self.observation.refresh(world);

        let broadcasts = world.broadcast_flag_locations();
        self.broadcast.ingest(world.location(), &broadcasts);
        self.broadcast
            .check_elimination(world, self.rules.broadcast_noise_radius);

        self.flag_memory.record_sensed(world, &self.observation.flags);
        self.flag_memory
            .sync_shared(world, self.rules.flags_per_team, self.drop_reset_rounds)?;

        self.call_for_help(world);
        self.pickup_flags(world)?;
        self.build_defensive_traps(world)?;
        self.attack(world)?;
        self.movement(world)?;
        self.build_combat_traps(world)?;
        // Movement may have brought a flag into reach or a target into
        // range; try both again before healing.
        self.pickup_flags(world)?;
        self.attack(world)?;
        self.heal(world)?;

        self.return_map.relax(world);
        Ok(())
    }

    fn try_spawn<W: AgentWorld>(&mut self, world: &mut W) -> Result<(), ProtocolError> {
        let site = match self.last_spawn {
            Some(site) if world.can_spawn(site) => site,
            _ => {
                let sites = world.spawn_sites();
                if sites.is_empty() {
                    return Ok(());
                }
                sites[self.rng.next_below(sites.len() as u32) as usize]
            }
        };

        if world.can_spawn(site) {
            world.spawn(site)?;
            if self.last_spawn != Some(site) {
                self.last_spawn = Some(site);
                self.return_map.reset(site);
            }
            debug!(agent = world.id(), site = %site, "spawned");
        }
        Ok(())
    }

    fn call_for_help<W: AgentWorld>(&self, world: &mut W) {
        let own = world.team();
        let here = world.location();
        for flag in &self.observation.flags {
            if flag.picked_up && flag.team == own && world.round() > self.rules.setup_rounds {
                publish_assistance(world, flag.at, AssistKind::FlagUnderAttack);
            }

            if here == flag.at {
                if let Some(enemy) = self.observation.nearest_enemy {
                    if here.distance_squared(enemy.at) <= 8 {
                        publish_assistance(world, here, AssistKind::EnemyNearOwnFlag);
                    }
                }
            }
        }
    }

    fn pickup_flags<W: AgentWorld>(&self, world: &mut W) -> Result<(), ProtocolError> {
        let enemy = world.team().opponent();
        // Re-sense rather than reuse the snapshot: the second pass runs
        // after movement.
        for flag in world.visible_flags() {
            if flag.team == enemy && world.can_pickup_flag(flag.at) {
                world.pickup_flag(flag.at)?;
                debug!(agent = world.id(), at = %flag.at, "picked up enemy flag");
            }
        }
        Ok(())
    }

    /// Destination selection and movement for this turn, in strict
    /// priority order.
    fn movement<W: AgentWorld>(&mut self, world: &mut W) -> Result<(), ProtocolError> {
        let round = world.round();

        // Carrying a flag: everything else is secondary to getting home.
        if world.has_flag() && round >= self.rules.setup_rounds {
            self.return_map
                .step_toward_spawn(world, &mut self.nav, &mut self.rng)?;
            if self.observation.friendlies.len() <= self.observation.enemies.len() {
                publish_assistance(world, world.location(), AssistKind::CarryingEnemyFlag);
            }
        }

        // An own flag sitting unguarded: go stand on it.
        let own = world.team();
        let mut on_own_flag = false;
        for flag in &self.observation.flags {
            if flag.team != own {
                continue;
            }
            if world.location() == flag.at {
                on_own_flag = true;
            } else if world.is_unoccupied(flag.at) {
                self.nav.advance(world, &mut self.rng, flag.at)?;
            }
        }

        if !on_own_flag
            && world.is_movement_ready()
            && round >= self.rules.setup_rounds.saturating_sub(20)
        {
            if let Some(flag) = self.observation.nearest_enemy_flag {
                if !flag.picked_up {
                    trace!(agent = world.id(), dest = %flag.at, "advance: sensed flag");
                    self.nav.advance(world, &mut self.rng, flag.at)?;
                }
            }

            let engaged = self.observation.nearest_enemy.filter(|e| {
                world.location().distance_squared(e.at) <= 6 + self.rules.action_radius_squared
            });
            if engaged.is_some() {
                let mut best: Option<(Direction, f64)> = None;
                for dir in Direction::COMPASS {
                    if !world.can_step(dir) {
                        continue;
                    }
                    let score = self.combat_score(world, world.location().offset(dir));
                    if best.map(|(_, b)| score > b).unwrap_or(true) {
                        best = Some((dir, score));
                    }
                }
                if let Some((dir, _)) = best {
                    trace!(agent = world.id(), ?dir, "advance: combat position");
                    world.step(dir)?;
                }
            } else {
                let beacon =
                    read_beacon(world).filter(|b| b.is_actionable(round, world.location()));

                if let Some(b) = beacon.filter(|b| b.kind == AssistKind::CarryingEnemyFlag) {
                    trace!(agent = world.id(), dest = %b.at, "advance: escort carrier");
                    self.nav.advance(world, &mut self.rng, b.at)?;
                } else {
                    let target = self
                        .flag_memory
                        .nearest_recent(round, world.location())
                        .map(|s| s.at)
                        .or_else(|| self.broadcast.nearest_candidate());

                    if let Some(target) =
                        target.filter(|_| !self.observation.friendlies.is_empty())
                    {
                        trace!(agent = world.id(), dest = %target, "advance: remembered flag");
                        self.nav.advance(world, &mut self.rng, target)?;
                    } else if let Some(b) = beacon {
                        trace!(agent = world.id(), dest = %b.at, "advance: assist beacon");
                        self.nav.advance(world, &mut self.rng, b.at)?;
                    } else {
                        self.explorer.step(world, &mut self.rng)?;
                    }
                }
            }
        }

        // Whatever budget is left goes to exploration, unless parked on an
        // own flag on purpose.
        if !on_own_flag && world.is_movement_ready() {
            self.explorer.step(world, &mut self.rng)?;
        }
        Ok(())
    }
}
