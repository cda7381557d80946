use crate::command::Command;
use crate::debug::Line;
use crate::government::GovernmentHandle;
use crate::system::SystemHandle;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Snapshot {
    pub tick: u32,
    pub ships: Vec<ShipSnapshot>,
    /// Message for the player, empty if none.
    pub message: String,
    pub debug_lines: Vec<(u64, Vec<Line>)>,
    pub timing: Timing,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShipSnapshot {
    pub id: u64,
    pub name: String,
    pub system: SystemHandle,
    pub government: Option<GovernmentHandle>,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Degrees in (-180, 180].
    pub facing: f64,
    pub command: Command,
    pub retarget_slot: Option<u32>,
    pub player: bool,
}

/// Seconds spent in each phase of the last step.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Timing {
    pub ai: f64,
    pub physics: f64,
}

impl Timing {
    pub fn total(&self) -> f64 {
        self.ai + self.physics
    }
}

/// Advances ship positions in a snapshot by `ticks` of coasting.
pub fn interpolate(snapshot: &mut Snapshot, ticks: f64) {
    for ship in snapshot.ships.iter_mut() {
        ship.position += ship.velocity * ticks;
    }
}
