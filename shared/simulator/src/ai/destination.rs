use crate::ship::ShipAccessor;
use crate::system::{Galaxy, PlanetHandle, SystemHandle};
use rand::Rng;

/// Every link has an average weight of this much.
const LINK_BASE_WEIGHT: f64 = 11.0;
/// Extra weight for links straight ahead, removed for links straight behind.
const LINK_HEADING_WEIGHT: f64 = 10.0;
/// Scales how strongly a ship low on jumps prefers landing.
const LOW_FUEL_PLANET_WEIGHT: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    System(SystemHandle),
    Planet(PlanetHandle),
}

/// Buckets walked in insertion order by a uniform draw over their total.
#[derive(Clone, Debug)]
pub struct WeightedChoice<T> {
    buckets: Vec<(u32, T)>,
    total: u32,
}

impl<T: Copy> WeightedChoice<T> {
    pub fn new() -> Self {
        WeightedChoice {
            buckets: vec![],
            total: 0,
        }
    }

    pub fn push(&mut self, weight: u32, item: T) {
        self.buckets.push((weight, item));
        self.total += weight;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Item whose bucket contains `draw`, for `draw` in `[0, total)`.
    pub fn select(&self, draw: u32) -> Option<T> {
        let mut remaining = draw;
        for &(weight, item) in self.buckets.iter() {
            if remaining < weight {
                return Some(item);
            }
            remaining -= weight;
        }
        None
    }

    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<T> {
        if self.total == 0 {
            return None;
        }
        self.select(rng.gen_range(0..self.total))
    }
}

impl<T: Copy> Default for WeightedChoice<T> {
    fn default() -> Self {
        WeightedChoice::new()
    }
}

/// Weight of each landable planet: 1 with a full tank, up to 41 with a
/// single jump left.
pub fn planet_weight(jumps_remaining: u32) -> u32 {
    if jumps_remaining > 0 {
        1 + LOW_FUEL_PLANET_WEIGHT / jumps_remaining
    } else {
        1
    }
}

/// Links first, weighted toward the ship's heading, then every planet with a
/// spaceport. Links are only candidates while the ship can still jump.
pub fn candidates(galaxy: &Galaxy, ship: &ShipAccessor) -> WeightedChoice<Destination> {
    let mut choice = WeightedChoice::new();
    let Some(system) = galaxy.get(ship.system()) else {
        return choice;
    };

    let jumps = ship.jumps_remaining();
    if jumps > 0 {
        let facing = ship.facing().unit();
        for &link in system.links.iter() {
            let heading_bias = galaxy
                .direction(ship.system(), link)
                .and_then(|d| d.try_normalize(0.0))
                .map(|d| facing.dot(&d))
                .unwrap_or(0.0);
            let weight = (LINK_BASE_WEIGHT + LINK_HEADING_WEIGHT * heading_bias) as u32;
            choice.push(weight, Destination::System(link));
        }
    }

    let weight = planet_weight(jumps);
    for (index, object) in system.objects.iter().enumerate() {
        if object.has_spaceport() {
            choice.push(
                weight,
                Destination::Planet(PlanetHandle {
                    system: ship.system(),
                    object: index,
                }),
            );
        }
    }
    choice
}

/// Pick somewhere to go, or `None` if there is nowhere to go.
pub fn plan<R: Rng>(galaxy: &Galaxy, ship: &ShipAccessor, rng: &mut R) -> Option<Destination> {
    candidates(galaxy, ship).choose(rng)
}
