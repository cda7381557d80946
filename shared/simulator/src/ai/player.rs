use super::{steering, targeting};
use crate::command::{Command, Turn};
use crate::ship::ShipAccessor;
use crate::simulation::World;
use crate::system::PlanetHandle;
use nalgebra::vector;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask of logical commands the player is holding this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Keys(u32);

impl Keys {
    pub const NONE: Keys = Keys(0);
    pub const THRUST: Keys = Keys(1 << 0);
    pub const TURN_LEFT: Keys = Keys(1 << 1);
    pub const TURN_RIGHT: Keys = Keys(1 << 2);
    pub const BACK: Keys = Keys(1 << 3);
    pub const PRIMARY: Keys = Keys(1 << 4);
    pub const LAND: Keys = Keys(1 << 5);
    pub const HYPERSPACE: Keys = Keys(1 << 6);
    pub const TARGET_NEAR: Keys = Keys(1 << 7);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Keys) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Manual turn axis. Left is counter-clockwise.
    pub fn turn(self) -> Turn {
        let left = self.contains(Keys::TURN_LEFT) as i32;
        let right = self.contains(Keys::TURN_RIGHT) as i32;
        Turn::from_axis((left - right) as f64)
    }
}

impl BitOr for Keys {
    type Output = Keys;

    fn bitor(self, other: Keys) -> Keys {
        Keys(self.0 | other.0)
    }
}

impl BitOrAssign for Keys {
    fn bitor_assign(&mut self, other: Keys) {
        self.0 |= other.0;
    }
}

impl BitAnd for Keys {
    type Output = Keys;

    fn bitand(self, other: Keys) -> Keys {
        Keys(self.0 & other.0)
    }
}

/// Translates captured key state into commands for the player's ship.
///
/// Holds the keys from the last tick that had any input, so a single LAND or
/// HYPERSPACE press keeps flying the approach after the key is released.
#[derive(Clone, Debug, Default)]
pub struct PlayerPilot {
    sticky: Keys,
    message: String,
}

impl PlayerPilot {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sticky(&self) -> Keys {
        self.sticky
    }

    pub fn move_player(
        &mut self,
        world: &World,
        ship: &ShipAccessor,
        keys: Keys,
        command: &mut Command,
    ) {
        self.message.clear();
        let kinematics = ship.kinematics();

        if let Some(&next_hop) = world.travel_plan.last() {
            command.set_target_system(Some(next_hop));
        }

        if keys.contains(Keys::TARGET_NEAR) {
            if let Some(target) = targeting::find_nearest_preferring_enemies(world, ship) {
                command.set_target_ship(Some(target));
            }
        }

        if keys.contains(Keys::LAND) {
            self.pick_landing_target(world, ship, command);
        }

        if !keys.is_empty() {
            if keys.contains(Keys::BACK) {
                command.set_turn(steering::turn_backward(&kinematics));
            } else {
                command.set_turn(keys.turn());
            }
            if keys.contains(Keys::THRUST) {
                command.set_thrust(true);
            }
            if keys.contains(Keys::PRIMARY) {
                command.fire_all();
            }
            self.sticky = keys;
            return;
        }

        let planet = command
            .goals
            .target_planet
            .and_then(|p| ship.planet_in_system(p));
        let system = command
            .goals
            .target_system
            .and_then(|s| world.galaxy.get(s).map(|_| s));

        match (planet, system) {
            (Some((_, planet)), _) if self.sticky.contains(Keys::LAND) => {
                if ship.has_landed() {
                    self.sticky = Keys::NONE;
                } else {
                    command.apply(steering::move_to_planet(
                        &kinematics,
                        planet.position,
                        planet.radius,
                    ));
                    command.set_land();
                }
            }
            (_, Some(system)) if self.sticky.contains(Keys::HYPERSPACE) => {
                let direction = ship
                    .direction_to(system)
                    .unwrap_or_else(|| vector![0.0, 0.0]);
                command.apply(steering::prepare_for_hyperspace(&kinematics, direction));
                command.set_jump();
            }
            _ => self.sticky = Keys::NONE,
        }
    }

    /// Explain why landing is impossible if the ship is over a body with no
    /// planet; otherwise target the nearest planet.
    fn pick_landing_target(&mut self, world: &World, ship: &ShipAccessor, command: &mut Command) {
        let Some(system) = world.galaxy.get(ship.system()) else {
            return;
        };
        for object in system.objects.iter() {
            let distance = (ship.position() - object.position).norm();
            if object.planet.is_none()
                && !object.landing_message.is_empty()
                && distance < object.radius
            {
                self.message = object.landing_message.clone();
            }
        }
        if !self.message.is_empty() {
            return;
        }

        let mut closest = f64::INFINITY;
        for (index, object) in system.objects.iter().enumerate() {
            if object.planet.is_none() {
                continue;
            }
            let distance = (ship.position() - object.position).norm();
            if distance < closest {
                closest = distance;
                command.set_target_planet(Some(PlanetHandle {
                    system: ship.system(),
                    object: index,
                }));
            }
        }
    }
}
