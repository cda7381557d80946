use crate::simulation::Error;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SystemHandle(pub usize);

/// A stellar object inside a system, addressed by system and object slot.
#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PlanetHandle {
    pub system: SystemHandle,
    pub object: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub has_spaceport: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StellarObject {
    pub position: Vector2<f64>,
    pub radius: f64,
    pub planet: Option<Planet>,
    /// Shown to the player when they try to land on a body without a planet.
    pub landing_message: String,
}

impl StellarObject {
    pub fn star(position: Vector2<f64>, radius: f64) -> StellarObject {
        StellarObject {
            position,
            radius,
            planet: None,
            landing_message: "You cannot land on a star!".to_string(),
        }
    }

    pub fn planet(name: &str, position: Vector2<f64>, radius: f64, has_spaceport: bool) -> Self {
        StellarObject {
            position,
            radius,
            planet: Some(Planet {
                name: name.to_string(),
                has_spaceport,
            }),
            landing_message: String::new(),
        }
    }

    pub fn has_spaceport(&self) -> bool {
        self.planet.as_ref().map(|p| p.has_spaceport).unwrap_or(false)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    /// Position on the galaxy map.
    pub position: Vector2<f64>,
    pub links: Vec<SystemHandle>,
    pub objects: Vec<StellarObject>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Galaxy {
    systems: Vec<StarSystem>,
}

impl Galaxy {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_system(&mut self, name: &str, position: Vector2<f64>) -> SystemHandle {
        self.systems.push(StarSystem {
            name: name.to_string(),
            position,
            links: vec![],
            objects: vec![],
        });
        SystemHandle(self.systems.len() - 1)
    }

    /// Links are bidirectional.
    pub fn link(&mut self, a: SystemHandle, b: SystemHandle) {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return;
        }
        if !self.systems[a.0].links.contains(&b) {
            self.systems[a.0].links.push(b);
        }
        if !self.systems[b.0].links.contains(&a) {
            self.systems[b.0].links.push(a);
        }
    }

    /// Fails if `system` is not part of this galaxy.
    pub fn add_object(
        &mut self,
        system: SystemHandle,
        object: StellarObject,
    ) -> Result<PlanetHandle, Error> {
        let objects = &mut self
            .get_mut(system)
            .ok_or_else(|| Error {
                msg: format!("Object added to unknown system {system:?}"),
            })?
            .objects;
        objects.push(object);
        Ok(PlanetHandle {
            system,
            object: objects.len() - 1,
        })
    }

    pub fn get(&self, handle: SystemHandle) -> Option<&StarSystem> {
        self.systems.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: SystemHandle) -> Option<&mut StarSystem> {
        self.systems.get_mut(handle.0)
    }

    pub fn object(&self, handle: PlanetHandle) -> Option<&StellarObject> {
        self.get(handle.system)?.objects.get(handle.object)
    }

    pub fn is_linked(&self, from: SystemHandle, to: SystemHandle) -> bool {
        self.get(from)
            .map(|system| system.links.contains(&to))
            .unwrap_or(false)
    }

    /// Direction on the galaxy map from one system to another.
    pub fn direction(&self, from: SystemHandle, to: SystemHandle) -> Option<Vector2<f64>> {
        Some(self.get(to)?.position - self.get(from)?.position)
    }

    pub fn systems(&self) -> impl Iterator<Item = (SystemHandle, &StarSystem)> {
        self.systems
            .iter()
            .enumerate()
            .map(|(i, s)| (SystemHandle(i), s))
    }
}
