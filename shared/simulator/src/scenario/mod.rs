mod frontier;
mod stress;

use crate::simulation::{Error, World};

pub mod prelude {
    pub use super::Scenario;
    pub use crate::angle::Angle;
    pub use crate::rng::{new_rng, SeededRng};
    pub use crate::ship::{self, freighter, interceptor, shuttle, ShipData, ShipHandle};
    pub use crate::simulation::{Error, World};
    pub use crate::system::{StellarObject, SystemHandle};
    pub use nalgebra::{vector, Vector2};
    pub use rand::Rng;
}

/// A named setup of galaxy, governments and ships.
pub trait Scenario {
    fn name(&self) -> String;

    fn human_name(&self) -> String {
        self.name()
    }

    fn init(&mut self, world: &mut World, seed: u32) -> Result<(), Error>;
}

pub fn load_safe(name: &str) -> Option<Box<dyn Scenario>> {
    let scenario: Option<Box<dyn Scenario>> = match name {
        "test" => Some(Box::new(test::TestScenario {})),
        "frontier" => Some(Box::new(frontier::Frontier {})),
        "stress" => Some(Box::new(stress::StressScenario { ships: 500 })),
        _ => None,
    };
    if let Some(scenario) = scenario.as_ref() {
        debug_assert_eq!(scenario.name(), name);
    }
    scenario
}

pub fn load(name: &str) -> Box<dyn Scenario> {
    match load_safe(name) {
        Some(scenario) => scenario,
        None => panic!("Unknown scenario {name:?}"),
    }
}

pub fn list() -> Vec<String> {
    ["test", "frontier", "stress"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}
