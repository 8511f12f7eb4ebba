//! The drone engine — owner of the world, clock, queues, and drone records.
//!
//! Completely headless: the host populates the world with actor bodies,
//! targets, and obstacles, then drives the engine by queueing commands and
//! calling `tick()` once per frame. All mutation happens on the calling
//! thread; the only delayed actions are stored deadline ticks checked
//! against the monotonic clock, guarded by each drone's active flag.

use std::collections::{BTreeMap, VecDeque};

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::commands::DroneCommand;
use skyguard_core::components::{
    Authority, Collidable, Collider, Fade, FreeFall, Light, PoseActuator, RemoveAfter,
    Transparency,
};
use skyguard_core::config::DroneConfig;
use skyguard_core::constants::{
    ACTUATOR_RESPONSIVENESS, DESPAWN_FADE_SECS, DRONE_BODY_RADIUS, OWNER_READY_WAIT_SECS,
};
use skyguard_core::enums::{AttackPhase, SpawnError};
use skyguard_core::events::DroneEvent;
use skyguard_core::math;
use skyguard_core::state::SimSnapshot;
use skyguard_core::types::{duration_ticks, ActorId, Pose, SimTime, Velocity};

use crate::drone::{Drone, Subscriptions};
use crate::engagement::Engagement;
use crate::systems;
use crate::world_setup::actor_body;

/// Configuration for a new engine.
pub struct SimConfig {
    /// RNG seed for beam jitter. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// A queued spawn waiting for its owner's body, bounded by a deadline.
struct PendingSpawn {
    owner: ActorId,
    config: DroneConfig,
    deadline_tick: u64,
}

/// The drone controller engine. Owns the ECS world and all drone state.
pub struct DroneEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<DroneCommand>,
    drones: BTreeMap<u32, Drone>,
    next_drone_id: u32,
    engagements: BTreeMap<u32, Engagement>,
    next_engagement_id: u32,
    pending_spawns: Vec<PendingSpawn>,
    despawn_buffer: Vec<Entity>,
    events: Vec<DroneEvent>,
}

impl DroneEngine {
    /// Create a new engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            drones: BTreeMap::new(),
            next_drone_id: 0,
            engagements: BTreeMap::new(),
            next_engagement_id: 0,
            pending_spawns: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for host-side setup (actors, targets, props).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: DroneCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = DroneCommand>) {
        self.command_queue.extend(commands);
    }

    /// Spawn a drone for `owner` immediately.
    ///
    /// Fails with `OwnerNotReady` when the owner has no controllable body
    /// right now. Queue `DroneCommand::Spawn` instead to wait (bounded by
    /// `OWNER_READY_WAIT_SECS`) for the body to appear. Neither path
    /// leaves partial state behind on failure.
    pub fn spawn(
        &mut self,
        owner: ActorId,
        config: Option<DroneConfig>,
    ) -> Result<u32, SpawnError> {
        let Some(owner_body) = actor_body(&self.world, owner) else {
            return Err(SpawnError::OwnerNotReady);
        };
        Ok(self.complete_spawn(owner, owner_body, config.unwrap_or_default().sanitized()))
    }

    /// Toggle the drone's lamp on behalf of `requested_by`.
    ///
    /// Requests from anyone but the owner are silently ignored, as are
    /// requests to unknown or inactive drones and bodies without a lamp.
    pub fn toggle_light(&mut self, drone_id: u32, requested_by: ActorId) {
        let Some(drone) = self.drones.get(&drone_id) else {
            return;
        };
        if !drone.active || !drone.subscriptions.light_live() {
            return;
        }
        if requested_by != drone.owner {
            // Unauthorized request: ignored.
            return;
        }
        let body = drone.body;
        let Ok(mut light) = self.world.get::<&mut Light>(body) else {
            return;
        };
        light.enabled = !light.enabled;
        let enabled = light.enabled;
        drop(light);
        self.events
            .push(DroneEvent::LightToggled { drone_id, enabled });
    }

    /// Tear down a drone. Idempotent: repeated calls are no-ops.
    ///
    /// Drops the active flag, releases subscriptions, then removes the
    /// body — immediately when it has no fade support, otherwise released
    /// into collidable free fall while fading out, with removal scheduled
    /// at the fade's end.
    pub fn teardown(&mut self, drone_id: u32) {
        let Some(drone) = self.drones.get_mut(&drone_id) else {
            return;
        };
        if !drone.active {
            // Already torn down.
            return;
        }
        drone.active = false;
        drone.subscriptions.release();
        let body = drone.body;

        if !self.world.contains(body) {
            return;
        }
        let fade_supported = self.world.get::<&Transparency>(body).is_ok();
        if fade_supported {
            let _ = self.world.remove_one::<PoseActuator>(body);
            if let Ok(mut collidable) = self.world.get::<&mut Collidable>(body) {
                collidable.enabled = true;
            }
            let start_value = self
                .world
                .get::<&Transparency>(body)
                .map(|t| t.value)
                .unwrap_or(0.0);
            let fade_ticks = duration_ticks(DESPAWN_FADE_SECS);
            let _ = self.world.insert(
                body,
                (
                    FreeFall,
                    Fade {
                        start_value,
                        target_value: 1.0,
                        start_tick: self.time.tick,
                        duration_ticks: fade_ticks,
                    },
                    RemoveAfter {
                        at_tick: self.time.tick + fade_ticks,
                    },
                ),
            );
            self.events.push(DroneEvent::DroneFadingOut { drone_id });
        } else {
            let _ = self.world.despawn(body);
        }
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();
        self.process_pending_spawns();

        let drone_ids: Vec<u32> = self.drones.keys().copied().collect();

        // 1. Flight commands, then actuator integration, so the attack
        //    check below sees this tick's body positions.
        for id in &drone_ids {
            if let Some(drone) = self.drones.get(id) {
                if drone.active && drone.subscriptions.tick_live() {
                    systems::flight::run(&mut self.world, drone);
                }
            }
        }
        systems::movement::run(&mut self.world);

        // 2. Attack sequencer per drone. A drone whose owner currently has
        //    no body skips its whole update and freezes until the owner
        //    respawns.
        for id in &drone_ids {
            let Some(drone) = self.drones.get_mut(id) else {
                continue;
            };
            if !(drone.active && drone.subscriptions.tick_live()) {
                continue;
            }
            if actor_body(&self.world, drone.owner).is_none() {
                continue;
            }
            systems::attack::run(
                &mut self.world,
                drone,
                &mut self.engagements,
                &mut self.next_engagement_id,
                &mut self.rng,
                &mut self.events,
                &self.time,
            );
        }

        // 3. Due engagements resolve against the active-flag guard.
        systems::attack::resolve_due(
            &mut self.world,
            &mut self.drones,
            &mut self.engagements,
            &mut self.events,
            &mut self.despawn_buffer,
            &self.time,
        );

        // 4. Effects, removals, record cleanup.
        systems::effects::run(&mut self.world, self.time.tick);
        systems::cleanup::run(
            &mut self.world,
            &mut self.drones,
            &mut self.despawn_buffer,
            &mut self.events,
            self.time.tick,
        );

        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.drones, events)
    }

    /// Get a drone record (for tests).
    #[cfg(test)]
    pub fn drone(&self, drone_id: u32) -> Option<&Drone> {
        self.drones.get(&drone_id)
    }

    /// Get a read-only reference to the engagement map (for tests).
    #[cfg(test)]
    pub fn engagements(&self) -> &BTreeMap<u32, Engagement> {
        &self.engagements
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                DroneCommand::Spawn { owner, config } => {
                    let config = config.unwrap_or_default().sanitized();
                    match actor_body(&self.world, owner) {
                        Some(owner_body) => {
                            self.complete_spawn(owner, owner_body, config);
                        }
                        None => self.pending_spawns.push(PendingSpawn {
                            owner,
                            config,
                            deadline_tick: self.time.tick
                                + duration_ticks(OWNER_READY_WAIT_SECS),
                        }),
                    }
                }
                DroneCommand::ToggleLight {
                    drone_id,
                    requested_by,
                } => self.toggle_light(drone_id, requested_by),
                DroneCommand::Teardown { drone_id } => self.teardown(drone_id),
            }
        }
    }

    /// Complete queued spawns whose owner body appeared; expire the rest
    /// at their deadline. The wait never blocks other drones' ticks.
    fn process_pending_spawns(&mut self) {
        let pending = std::mem::take(&mut self.pending_spawns);
        for spawn in pending {
            match actor_body(&self.world, spawn.owner) {
                Some(owner_body) => {
                    self.complete_spawn(spawn.owner, owner_body, spawn.config);
                }
                None if self.time.tick >= spawn.deadline_tick => {
                    self.events.push(DroneEvent::SpawnFailed {
                        owner: spawn.owner,
                        reason: SpawnError::OwnerNotReady,
                    });
                }
                None => self.pending_spawns.push(spawn),
            }
        }
    }

    /// Create the drone body and record for a ready owner.
    fn complete_spawn(&mut self, owner: ActorId, owner_body: Entity, config: DroneConfig) -> u32 {
        let owner_pose = self
            .world
            .get::<&Pose>(owner_body)
            .map(|p| *p)
            .unwrap_or_default();
        let start = Pose::new(
            owner_pose.position + DVec3::Z * config.hover_height,
            math::yaw_orientation(math::yaw_of(owner_pose.orientation)),
        );

        let body = self.world.spawn((
            start,
            Velocity::default(),
            PoseActuator {
                target: start,
                responsiveness: ACTUATOR_RESPONSIVENESS,
            },
            Transparency::default(),
            Light { enabled: false },
            Collider {
                radius: DRONE_BODY_RADIUS,
            },
            Collidable { enabled: false },
            Authority { actor: owner },
        ));

        let id = self.next_drone_id;
        self.next_drone_id += 1;
        self.drones.insert(
            id,
            Drone {
                id,
                owner,
                config,
                body,
                active: true,
                phase: AttackPhase::Cooldown,
                last_fire_tick: None,
                subscriptions: Subscriptions::registered(),
            },
        );
        self.events.push(DroneEvent::DroneSpawned {
            drone_id: id,
            owner,
        });
        id
    }
}
