//! Ship steering and decision engine for a 2D space trading sim.
//!
//! Once per tick the [`ai::Ai`] pass reads the [`simulation::World`] and emits
//! one [`command::Command`] per ship; the simulation then integrates those
//! commands.

pub mod ai;
pub mod angle;
pub mod command;
pub mod debug;
pub mod government;
pub mod index_set;
pub mod rng;
pub mod scenario;
pub mod ship;
pub mod simulation;
pub mod snapshot;
pub mod system;
