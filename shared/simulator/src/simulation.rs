use crate::ai::{player::Keys, Ai, Config, Decision};
use crate::debug::{self, Line};
use crate::government::Governments;
use crate::index_set::{HasIndex, IndexSet};
use crate::scenario::{self, Scenario};
use crate::ship::{ShipAccessor, ShipData, ShipHandle, Transition};
use crate::snapshot::*;
use crate::system::{Galaxy, PlanetHandle, SystemHandle};
use instant::Instant;
use rapier2d_f64::data::arena::Arena;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub msg: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for Error {}

/// Everything the AI reads during a tick.
pub struct World {
    pub ships: IndexSet<ShipHandle>,
    pub(crate) ship_data: Arena<ShipData>,
    pub galaxy: Galaxy,
    pub governments: Governments,
    pub player: Option<ShipHandle>,
    /// Systems the player plans to visit; the next hop is last.
    pub travel_plan: Vec<SystemHandle>,
}

impl World {
    pub fn new() -> Self {
        World {
            ships: IndexSet::new(),
            ship_data: Arena::new(),
            galaxy: Galaxy::new(),
            governments: Governments::new(),
            player: None,
            travel_plan: vec![],
        }
    }

    /// `None` once the ship has been removed, even if its slot was reused.
    pub fn ship(&self, handle: ShipHandle) -> Option<ShipAccessor<'_>> {
        let data = self.ship_data.get(handle.index())?;
        Some(ShipAccessor {
            world: self,
            handle,
            data,
        })
    }

    pub fn ship_data_mut(&mut self, handle: ShipHandle) -> Option<&mut ShipData> {
        self.ship_data.get_mut(handle.index())
    }

    /// Ships in roster order.
    pub fn iter_ships(&self) -> impl Iterator<Item = ShipAccessor<'_>> + '_ {
        self.ships.iter().filter_map(|&handle| self.ship(handle))
    }

    pub fn remove_ship(&mut self, handle: ShipHandle) -> Option<ShipData> {
        self.ships.remove(handle);
        if self.player == Some(handle) {
            self.player = None;
        }
        self.ship_data.remove(handle.index())
    }
}

pub struct Simulation {
    scenario: Option<Box<dyn Scenario>>,
    pub world: World,
    ai: Ai,
    keys: Keys,
    pub(crate) events: SimEvents,
    tick: u32,
    seed: u32,
    timing: Timing,
}

impl Simulation {
    pub fn new(scenario_name: &str, seed: u32) -> Result<Simulation, Error> {
        Simulation::with_config(scenario_name, seed, Config::default())
    }

    pub fn with_config(scenario_name: &str, seed: u32, config: Config) -> Result<Simulation, Error> {
        log::info!("scenario {scenario_name} seed {seed}");
        let mut scenario = scenario::load_safe(scenario_name).ok_or_else(|| {
            log::warn!("unknown scenario {scenario_name:?}");
            Error {
                msg: format!("Unknown scenario {scenario_name:?}"),
            }
        })?;
        let mut sim = Simulation {
            scenario: None,
            world: World::new(),
            ai: Ai::new(config, seed as u64),
            keys: Keys::NONE,
            events: SimEvents::new(),
            tick: 0,
            seed,
            timing: Default::default(),
        };
        scenario.init(&mut sim.world, seed)?;
        sim.scenario = Some(scenario);
        Ok(sim)
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn scenario_name(&self) -> Option<String> {
        self.scenario.as_ref().map(|s| s.name())
    }

    pub fn ship(&self, handle: ShipHandle) -> Option<ShipAccessor<'_>> {
        self.world.ship(handle)
    }

    pub fn ai(&self) -> &Ai {
        &self.ai
    }

    /// Keys held by the player for the next step.
    pub fn set_keys(&mut self, keys: Keys) {
        self.keys = keys;
    }

    pub fn step(&mut self) {
        self.events.clear();

        let ai_start_time = Instant::now();
        let decisions = self.ai.step(&self.world, self.keys, self.tick);
        self.timing.ai = (Instant::now() - ai_start_time).as_secs_f64();
        self.events.message = self.ai.message().to_string();

        let physics_start_time = Instant::now();
        self.apply(&decisions);

        let handle_snapshot: Vec<ShipHandle> = self.world.ships.iter().cloned().collect();
        for handle in handle_snapshot {
            self.tick_ship(handle);
        }
        self.timing.physics = (Instant::now() - physics_start_time).as_secs_f64();

        let handle_snapshot: Vec<ShipHandle> = self.world.ships.iter().cloned().collect();
        for handle in handle_snapshot {
            debug::emit_ship(self, handle);
        }

        self.tick = self.tick.wrapping_add(1);
    }

    fn apply(&mut self, decisions: &[Decision]) {
        for decision in decisions {
            if let Some(data) = self.world.ship_data_mut(decision.ship) {
                data.command = decision.command;
                data.goals = decision.command.goals;
                if decision.retarget_slot.is_some() {
                    data.retarget_slot = decision.retarget_slot;
                }
            }
        }
    }

    fn tick_ship(&mut self, handle: ShipHandle) {
        let Some(clearance) = self.world.ship(handle).map(|s| s.clearance()) else {
            return;
        };
        let galaxy = &self.world.galaxy;
        let Some(data) = self.world.ship_data.get_mut(handle.index()) else {
            return;
        };
        match data.tick(galaxy, clearance) {
            Some(Transition::StartedLanding(planet)) => {
                log::debug!("{handle:?} landing on {planet:?}");
            }
            Some(Transition::StartedJump(system)) => {
                log::debug!("{handle:?} jumping to {system:?}");
            }
            Some(Transition::Landed(planet)) => self.on_landed(handle, planet),
            Some(Transition::Arrived(system)) => self.on_arrived(handle, system),
            None => {}
        }
    }

    fn on_landed(&mut self, handle: ShipHandle, planet: PlanetHandle) {
        log::debug!("{handle:?} landed on {planet:?}");
        self.events.landed.push((handle, planet));
        if self.world.player != Some(handle) {
            self.world.remove_ship(handle);
        }
    }

    fn on_arrived(&mut self, handle: ShipHandle, system: SystemHandle) {
        log::debug!("{handle:?} arrived in {system:?}");
        self.events.arrived.push((handle, system));
        if self.world.player == Some(handle) && self.world.travel_plan.last() == Some(&system) {
            self.world.travel_plan.pop();
        }
    }

    /// Takes a ship out of the world. Handles to it stop resolving at once,
    /// including for ships that have not yet decided this tick.
    pub fn destroy(&mut self, handle: ShipHandle) -> Option<ShipData> {
        log::debug!("{handle:?} destroyed");
        self.world.remove_ship(handle)
    }

    pub fn events(&self) -> &SimEvents {
        &self.events
    }

    pub fn emit_debug_lines(&mut self, ship: ShipHandle, lines: &[Line]) {
        self.events.debug_lines.push((ship.into(), lines.to_vec()));
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        for ship in self.world.iter_ships() {
            s.write_u64(ship.handle().into());
            s.write_i64(fixedpoint(ship.position().x));
            s.write_i64(fixedpoint(ship.position().y));
            s.write_i64(fixedpoint(ship.facing().raw()));
            s.write_i64(fixedpoint(ship.velocity().x));
            s.write_i64(fixedpoint(ship.velocity().y));
            s.write_usize(ship.system().0);
        }
        s.finish()
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            tick: self.tick,
            ships: vec![],
            message: self.events.message.clone(),
            debug_lines: self.events.debug_lines.clone(),
            timing: self.timing.clone(),
        };

        for ship in self.world.iter_ships() {
            let data = ship.data();
            snapshot.ships.push(ShipSnapshot {
                id: ship.handle().into(),
                name: data.name.clone(),
                system: data.system,
                government: data.government,
                position: data.position,
                velocity: data.velocity,
                facing: data.facing.degrees(),
                command: data.command,
                retarget_slot: data.retarget_slot,
                player: self.world.player == Some(ship.handle()),
            });
        }

        snapshot
    }
}

pub struct SimEvents {
    pub message: String,
    pub debug_lines: Vec<(u64, Vec<Line>)>,
    pub landed: Vec<(ShipHandle, PlanetHandle)>,
    pub arrived: Vec<(ShipHandle, SystemHandle)>,
}

impl SimEvents {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            debug_lines: Vec::new(),
            landed: vec![],
            arrived: vec![],
        }
    }

    pub fn clear(&mut self) {
        self.message.clear();
        self.debug_lines.clear();
        self.landed.clear();
        self.arrived.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl Default for SimEvents {
    fn default() -> Self {
        SimEvents::new()
    }
}
