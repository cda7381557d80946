//! Per-tick decision engine for every ship in the world.

pub mod destination;
pub mod escort;
pub mod player;
pub mod steering;
pub mod targeting;

use crate::command::Command;
use crate::rng::{new_rng, SeededRng};
use crate::ship::{ShipAccessor, ShipHandle};
use crate::simulation::World;
use destination::Destination;
use player::{Keys, PlayerPilot};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Independent ships rerun target selection once every this many ticks,
    /// staggered so only a slice of the roster scans in any one tick.
    pub retarget_slots: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config { retarget_slots: 32 }
    }
}

/// The output of the AI pass for one ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub ship: ShipHandle,
    pub command: Command,
    /// Retargeting slot assigned to independent ships this tick.
    pub retarget_slot: Option<u32>,
}

/// Which behavior flies a ship this tick.
pub enum Pilot<'a> {
    Player,
    Escort(ShipAccessor<'a>),
    Independent,
}

pub fn classify<'a>(world: &'a World, ship: &ShipAccessor<'a>) -> Pilot<'a> {
    if world.player == Some(ship.handle()) {
        Pilot::Player
    } else if let Some(parent) = ship.parent() {
        Pilot::Escort(parent)
    } else {
        Pilot::Independent
    }
}

pub struct Ai {
    config: Config,
    rng: SeededRng,
    player: PlayerPilot,
}

impl Ai {
    pub fn new(config: Config, seed: u64) -> Ai {
        Ai {
            config,
            rng: new_rng(seed),
            player: PlayerPilot::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Most recent message for the player, such as why landing was refused.
    pub fn message(&self) -> &str {
        self.player.message()
    }

    pub fn player(&self) -> &PlayerPilot {
        &self.player
    }

    /// Decides a command for every ship, in roster order.
    ///
    /// Reads `world` only; the caller applies the decisions after the whole
    /// pass so every ship sees the same snapshot.
    pub fn step(&mut self, world: &World, keys: Keys, tick: u32) -> Vec<Decision> {
        let slots = self.config.retarget_slots.max(1);
        let phase = tick % slots;
        let mut slot = 0;
        let mut decisions = Vec::with_capacity(world.ships.len());

        for ship in world.iter_ships() {
            let mut command = Command::neutral(ship.goals());
            let mut retarget_slot = None;
            match classify(world, &ship) {
                Pilot::Player => self.player.move_player(world, &ship, keys, &mut command),
                Pilot::Escort(parent) => escort::move_escort(&ship, &parent, &mut command),
                Pilot::Independent => {
                    slot = (slot + 1) % slots;
                    retarget_slot = Some(slot);
                    if slot == phase {
                        let target = targeting::find_target(world, &ship);
                        if target != ship.goals().target_ship {
                            log::debug!("{:?} targets {:?}", ship.handle(), target);
                        }
                        command.set_target_ship(target);
                    }
                    self.move_independent(world, &ship, &mut command);
                }
            }
            decisions.push(Decision {
                ship: ship.handle(),
                command,
                retarget_slot,
            });
        }
        decisions
    }

    fn move_independent(&mut self, world: &World, ship: &ShipAccessor, command: &mut Command) {
        let kinematics = ship.kinematics();

        match command.goals.target_ship.map(|h| ship.live_target(h)) {
            Some(Some(target)) => {
                command.apply(steering::attack(
                    &kinematics,
                    target.position(),
                    ship.aim_at(&target),
                    ship.is_in_range(&target),
                ));
                return;
            }
            Some(None) => command.set_target_ship(None),
            None => {}
        }

        let mut planet = command
            .goals
            .target_planet
            .and_then(|p| ship.planet_in_system(p));
        let mut system = command
            .goals
            .target_system
            .filter(|&s| world.galaxy.get(s).is_some());

        if system.is_none() && planet.is_none() {
            match destination::plan(&world.galaxy, ship, &mut self.rng) {
                Some(Destination::System(link)) => {
                    log::debug!("{:?} heading for {:?}", ship.handle(), link);
                    command.set_target_system(Some(link));
                    system = Some(link);
                }
                Some(Destination::Planet(handle)) => {
                    log::debug!("{:?} heading for {:?}", ship.handle(), handle);
                    command.set_target_planet(Some(handle));
                    planet = ship.planet_in_system(handle);
                }
                None => {}
            }
        }

        if let Some(system) = system {
            let direction = ship
                .direction_to(system)
                .unwrap_or_else(|| nalgebra::vector![0.0, 0.0]);
            command.apply(steering::prepare_for_hyperspace(&kinematics, direction));
            command.set_jump();
        } else if let Some((_, planet)) = planet {
            command.apply(steering::move_to_planet(
                &kinematics,
                planet.position,
                planet.radius,
            ));
            command.set_land();
        }
    }
}
