use crate::angle::Angle;
use crate::command::{Command, Goals};
use crate::government::GovernmentHandle;
use crate::index_set::{HasIndex, Index};
use crate::simulation::{Error, World};
use crate::system::{Galaxy, PlanetHandle, StellarObject, SystemHandle};
use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};

/// Ticks from touchdown clearance until the ship is on the ground.
pub const LANDING_TICKS: u32 = 60;
/// Ticks spent charging the hyperdrive before arriving in the next system.
pub const HYPERSPACE_TICKS: u32 = 60;
/// A ship must be at most this fast to engage its hyperdrive.
pub const HYPERSPACE_SPEED: f64 = 0.1;
/// Distance from the system center at which jumping ships arrive.
pub const ARRIVAL_DISTANCE: f64 = 2000.0;
pub const ARRIVAL_SPEED: f64 = 2.0;

#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(into = "u64", from = "u64")]
pub struct ShipHandle(pub Index);

impl HasIndex for ShipHandle {
    fn index(self) -> Index {
        self.0
    }
}

impl From<ShipHandle> for u64 {
    fn from(handle: ShipHandle) -> u64 {
        let (idx, gen) = handle.0.into_raw_parts();
        ((gen as u64) << 32) | idx as u64
    }
}

impl From<u64> for ShipHandle {
    fn from(id: u64) -> ShipHandle {
        ShipHandle(Index::from_raw_parts(id as u32, (id >> 32) as u32))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Projectile speed relative to the firing ship, per tick.
    pub speed: f64,
    /// Projectile lifetime in ticks.
    pub lifetime: u32,
}

impl Weapon {
    pub fn range(&self) -> f64 {
        self.speed * self.lifetime as f64
    }
}

/// Where a ship is in the landing or hyperspace sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Departure {
    #[default]
    None,
    Landing { ticks: u32 },
    Landed,
    Jumping { ticks: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipData {
    pub name: String,
    pub government: Option<GovernmentHandle>,
    pub system: SystemHandle,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub facing: Angle,
    /// Degrees per tick.
    pub turn_rate: f64,
    /// Speed gained per tick of full thrust.
    pub acceleration: f64,
    pub jumps_remaining: u32,
    pub weapons: Vec<Weapon>,
    pub parent: Option<ShipHandle>,
    pub goals: Goals,
    /// Last command applied by the integrator.
    pub command: Command,
    pub retarget_slot: Option<u32>,
    pub departure: Departure,
}

impl Default for ShipData {
    fn default() -> ShipData {
        ShipData {
            name: String::new(),
            government: None,
            system: SystemHandle(0),
            position: vector![0.0, 0.0],
            velocity: vector![0.0, 0.0],
            facing: Angle::default(),
            turn_rate: 5.0,
            acceleration: 0.5,
            jumps_remaining: 3,
            weapons: vec![],
            parent: None,
            goals: Goals::default(),
            command: Command::default(),
            retarget_slot: None,
            departure: Departure::None,
        }
    }
}

pub fn blaster() -> Weapon {
    Weapon {
        speed: 12.0,
        lifetime: 40,
    }
}

pub fn shuttle(government: GovernmentHandle, system: SystemHandle) -> ShipData {
    ShipData {
        name: "Shuttle".to_string(),
        government: Some(government),
        system,
        turn_rate: 6.0,
        acceleration: 0.4,
        jumps_remaining: 2,
        ..Default::default()
    }
}

pub fn freighter(government: GovernmentHandle, system: SystemHandle) -> ShipData {
    ShipData {
        name: "Freighter".to_string(),
        government: Some(government),
        system,
        turn_rate: 2.0,
        acceleration: 0.15,
        jumps_remaining: 4,
        weapons: vec![blaster()],
        ..Default::default()
    }
}

pub fn interceptor(government: GovernmentHandle, system: SystemHandle) -> ShipData {
    ShipData {
        name: "Interceptor".to_string(),
        government: Some(government),
        system,
        turn_rate: 8.0,
        acceleration: 0.8,
        jumps_remaining: 3,
        weapons: vec![blaster(), blaster()],
        ..Default::default()
    }
}

/// Adds a ship to the roster. Fails if its system or parent does not exist,
/// or if it cannot turn or accelerate.
pub fn create(
    world: &mut World,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    facing: Angle,
    data: ShipData,
) -> Result<ShipHandle, Error> {
    if world.galaxy.get(data.system).is_none() {
        return Err(Error {
            msg: format!("{} placed in unknown system {:?}", data.name, data.system),
        });
    }
    let positive = |v: f64| v > 0.0;
    if !positive(data.turn_rate) || !positive(data.acceleration) {
        return Err(Error {
            msg: format!(
                "{} needs a positive turn rate and acceleration, got {} and {}",
                data.name, data.turn_rate, data.acceleration
            ),
        });
    }
    if let Some(parent) = data.parent {
        if world.ship(parent).is_none() {
            return Err(Error {
                msg: format!("{} escorts missing ship {:?}", data.name, parent),
            });
        }
    }
    let data = ShipData {
        position,
        velocity,
        facing,
        command: Command::neutral(data.goals),
        ..data
    };
    let handle = ShipHandle(world.ship_data.insert(data));
    world.ships.insert(handle);
    Ok(handle)
}

/// Read-only kinematic state used by the steering routines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub facing: Angle,
    pub turn_rate: f64,
    pub acceleration: f64,
}

/// Landing and hyperspace clearance, evaluated against the world before the
/// integrator mutates the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Clearance {
    pub land: bool,
    pub jump: bool,
}

/// What happened to a ship during integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    StartedLanding(PlanetHandle),
    Landed(PlanetHandle),
    StartedJump(SystemHandle),
    Arrived(SystemHandle),
}

pub struct ShipAccessor<'a> {
    pub(crate) world: &'a World,
    pub(crate) handle: ShipHandle,
    pub(crate) data: &'a ShipData,
}

impl<'a> ShipAccessor<'a> {
    pub fn handle(&self) -> ShipHandle {
        self.handle
    }

    pub fn data(&self) -> &'a ShipData {
        self.data
    }

    pub fn position(&self) -> Vector2<f64> {
        self.data.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.data.velocity
    }

    pub fn facing(&self) -> Angle {
        self.data.facing
    }

    pub fn system(&self) -> SystemHandle {
        self.data.system
    }

    pub fn government(&self) -> Option<GovernmentHandle> {
        self.data.government
    }

    pub fn jumps_remaining(&self) -> u32 {
        self.data.jumps_remaining
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.data.position,
            velocity: self.data.velocity,
            facing: self.data.facing,
            turn_rate: self.data.turn_rate,
            acceleration: self.data.acceleration,
        }
    }

    pub fn goals(&self) -> Goals {
        self.data.goals
    }

    pub fn parent(&self) -> Option<ShipAccessor<'a>> {
        self.world.ship(self.data.parent?)
    }

    /// The target ship, if it still exists, can be targeted and shares our
    /// system.
    pub fn target_ship(&self) -> Option<ShipAccessor<'a>> {
        self.live_target(self.data.goals.target_ship?)
    }

    pub fn live_target(&self, handle: ShipHandle) -> Option<ShipAccessor<'a>> {
        let target = self.world.ship(handle)?;
        (target.system() == self.system() && target.is_targetable()).then_some(target)
    }

    /// The target planet, if it is a planet in our current system.
    pub fn target_planet(&self) -> Option<(PlanetHandle, &'a StellarObject)> {
        self.planet_in_system(self.data.goals.target_planet?)
    }

    pub fn planet_in_system(&self, handle: PlanetHandle) -> Option<(PlanetHandle, &'a StellarObject)> {
        if handle.system != self.system() {
            return None;
        }
        let object = self.world.galaxy.object(handle)?;
        object.planet.as_ref().map(|_| (handle, object))
    }

    pub fn target_system(&self) -> Option<SystemHandle> {
        let system = self.data.goals.target_system?;
        self.world.galaxy.get(system).map(|_| system)
    }

    /// Galaxy-map direction from our system toward `system`.
    pub fn direction_to(&self, system: SystemHandle) -> Option<Vector2<f64>> {
        self.world.galaxy.direction(self.system(), system)
    }

    /// Destroyed ships are removed from the world, so only departures matter.
    pub fn is_targetable(&self) -> bool {
        self.data.departure == Departure::None
    }

    pub fn is_landing(&self) -> bool {
        matches!(
            self.data.departure,
            Departure::Landing { .. } | Departure::Landed
        )
    }

    pub fn has_landed(&self) -> bool {
        self.data.departure == Departure::Landed
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.data.departure, Departure::Jumping { .. })
    }

    pub fn has_land_command(&self) -> bool {
        self.data.command.land
    }

    pub fn has_jump_command(&self) -> bool {
        self.data.command.jump
    }

    pub fn can_land(&self) -> bool {
        self.data.departure == Departure::None
            && self
                .target_planet()
                .map(|(_, object)| (object.position - self.position()).norm() < object.radius)
                .unwrap_or(false)
    }

    pub fn can_jump(&self) -> bool {
        if self.data.departure != Departure::None || self.jumps_remaining() == 0 {
            return false;
        }
        let Some(system) = self.target_system() else {
            return false;
        };
        if !self.world.galaxy.is_linked(self.system(), system) {
            return false;
        }
        let Some(direction) = self.direction_to(system) else {
            return false;
        };
        if self.velocity().norm() > HYPERSPACE_SPEED || direction.norm() == 0.0 {
            return false;
        }
        // Allow one tick of turn error on either side of the link heading.
        let error = (Angle::from_vector(direction).raw() - self.facing().raw() + 180.0)
            .rem_euclid(360.0)
            - 180.0;
        error.abs() <= self.data.turn_rate.max(1.0)
    }

    pub fn clearance(&self) -> Clearance {
        Clearance {
            land: self.can_land(),
            jump: self.can_jump(),
        }
    }

    pub fn is_in_range(&self, target: &ShipAccessor) -> bool {
        let distance = (target.position() - self.position()).norm();
        self.data.weapons.iter().any(|w| w.range() >= distance)
    }

    /// Direction to fire so that a projectile meets `target`, leading it for
    /// its velocity relative to us. `None` if no weapon can reach it.
    pub fn aim_at(&self, target: &ShipAccessor) -> Option<Vector2<f64>> {
        let dp = target.position() - self.position();
        let dv = target.velocity() - self.velocity();
        for weapon in self.data.weapons.iter() {
            for t in 1..=weapon.lifetime {
                let t = t as f64;
                let predicted = dp + dv * t;
                if predicted.norm() <= weapon.speed * t {
                    if predicted.norm() == 0.0 {
                        break;
                    }
                    return Some(predicted);
                }
            }
        }
        None
    }
}

impl ShipData {
    /// Integrates one tick of the last applied command. Drag free.
    pub fn tick(&mut self, galaxy: &Galaxy, clearance: Clearance) -> Option<Transition> {
        match self.departure {
            Departure::Landed => None,
            Departure::Landing { ticks } => {
                let target = self
                    .goals
                    .target_planet
                    .and_then(|p| galaxy.object(p).map(|o| (p, o.position)));
                if let Some((_, center)) = target {
                    self.position += (center - self.position) * 0.1;
                }
                self.velocity *= 0.9;
                if ticks + 1 >= LANDING_TICKS {
                    self.departure = Departure::Landed;
                    self.velocity = vector![0.0, 0.0];
                    target.map(|(p, _)| Transition::Landed(p))
                } else {
                    self.departure = Departure::Landing { ticks: ticks + 1 };
                    None
                }
            }
            Departure::Jumping { ticks } => {
                if ticks + 1 < HYPERSPACE_TICKS {
                    self.departure = Departure::Jumping { ticks: ticks + 1 };
                    return None;
                }
                self.departure = Departure::None;
                let destination = self.goals.target_system?;
                let direction = galaxy
                    .direction(self.system, destination)
                    .and_then(|d| d.try_normalize(1e-9))
                    .unwrap_or_else(|| self.facing.unit());
                self.system = destination;
                self.jumps_remaining = self.jumps_remaining.saturating_sub(1);
                self.position = -direction * ARRIVAL_DISTANCE;
                self.velocity = direction * ARRIVAL_SPEED;
                self.goals = Goals::default();
                Some(Transition::Arrived(destination))
            }
            Departure::None => {
                let command = self.command;
                self.facing += self.turn_rate * command.turn.value();
                if command.thrust {
                    let unit = self.facing.unit();
                    let speed = self.velocity.norm();
                    // A retrograde burn that would overshoot leaves the ship at rest.
                    if speed > 0.0
                        && speed <= self.acceleration
                        && unit.dot(&self.velocity) / speed < -0.5
                    {
                        self.velocity = vector![0.0, 0.0];
                    } else {
                        self.velocity += unit * self.acceleration;
                    }
                }
                self.position += self.velocity;

                if command.land && clearance.land {
                    let planet = self.goals.target_planet?;
                    self.departure = Departure::Landing { ticks: 0 };
                    Some(Transition::StartedLanding(planet))
                } else if command.jump && clearance.jump {
                    let system = self.goals.target_system?;
                    self.departure = Departure::Jumping { ticks: 0 };
                    self.velocity = vector![0.0, 0.0];
                    Some(Transition::StartedJump(system))
                } else {
                    None
                }
            }
        }
    }
}
