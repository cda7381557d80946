use crate::ai::steering;
use crate::ship::ShipHandle;
use crate::simulation::Simulation;
use nalgebra::{vector, Point2, Vector4};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Line {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub color: Vector4<f32>,
}

/// Velocity, facing and predicted stopping point of a ship.
pub fn emit_ship(sim: &mut Simulation, handle: ShipHandle) {
    let Some(ship) = sim.ship(handle) else {
        return;
    };
    let kinematics = ship.kinematics();
    let p: Point2<f64> = kinematics.position.into();
    let lines = [
        Line {
            a: p,
            b: p + kinematics.velocity * 10.0,
            color: vector![0.0, 0.81, 1.0, 1.0],
        },
        Line {
            a: p,
            b: p + kinematics.facing.unit() * 50.0,
            color: vector![1.0, 0.2, 0.0, 1.0],
        },
        Line {
            a: p,
            b: steering::stopping_point(&kinematics).into(),
            color: vector![0.0, 1.0, 0.2, 1.0],
        },
    ];
    sim.emit_debug_lines(handle, &lines);
}
