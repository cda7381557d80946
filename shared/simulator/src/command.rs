use crate::ship::ShipHandle;
use crate::system::{PlanetHandle, SystemHandle};
use serde::{Deserialize, Serialize};

/// Fraction of the maximum turn rate to apply this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Turn {
    Clockwise,
    #[default]
    Straight,
    CounterClockwise,
}

impl Turn {
    pub fn value(self) -> f64 {
        match self {
            Turn::Clockwise => -1.0,
            Turn::Straight => 0.0,
            Turn::CounterClockwise => 1.0,
        }
    }

    /// Turn toward increasing heading when `counter_clockwise`.
    pub fn toward(counter_clockwise: bool) -> Turn {
        if counter_clockwise {
            Turn::CounterClockwise
        } else {
            Turn::Clockwise
        }
    }

    /// Nearest turn for an analog axis value.
    pub fn from_axis(axis: f64) -> Turn {
        if axis > 0.0 {
            Turn::CounterClockwise
        } else if axis < 0.0 {
            Turn::Clockwise
        } else {
            Turn::Straight
        }
    }
}

/// Control output of a steering routine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Maneuver {
    pub turn: Turn,
    pub thrust: bool,
    pub fire: bool,
}

impl Maneuver {
    pub fn turn(turn: Turn) -> Maneuver {
        Maneuver {
            turn,
            ..Default::default()
        }
    }
}

/// Goals a ship pursues across ticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Goals {
    pub target_ship: Option<ShipHandle>,
    pub target_planet: Option<PlanetHandle>,
    pub target_system: Option<SystemHandle>,
}

/// Per-tick command sink for one ship.
///
/// Controls start neutral every tick. Goals start as the ship's current goals
/// and are written back to the ship when the command is applied, so leaving a
/// goal untouched keeps it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Command {
    pub turn: Turn,
    pub thrust: bool,
    pub fire: bool,
    pub land: bool,
    pub jump: bool,
    pub goals: Goals,
}

impl Command {
    pub fn neutral(goals: Goals) -> Command {
        Command {
            goals,
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Command::neutral(self.goals);
    }

    pub fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
    }

    pub fn set_thrust(&mut self, thrust: bool) {
        self.thrust = thrust;
    }

    pub fn fire_all(&mut self) {
        self.fire = true;
    }

    pub fn set_land(&mut self) {
        self.land = true;
    }

    pub fn set_jump(&mut self) {
        self.jump = true;
    }

    /// Applies every control of a maneuver; fire is only ever raised.
    pub fn apply(&mut self, maneuver: Maneuver) {
        self.turn = maneuver.turn;
        self.thrust = maneuver.thrust;
        self.fire |= maneuver.fire;
    }

    pub fn set_target_ship(&mut self, ship: Option<ShipHandle>) {
        self.goals.target_ship = ship;
    }

    pub fn set_target_planet(&mut self, planet: Option<PlanetHandle>) {
        self.goals.target_planet = planet;
    }

    pub fn set_target_system(&mut self, system: Option<SystemHandle>) {
        self.goals.target_system = system;
    }
}
