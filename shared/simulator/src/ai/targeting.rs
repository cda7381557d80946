use crate::ship::{ShipAccessor, ShipHandle};
use crate::simulation::World;

/// Nearest targetable ship in the same system whose government is hostile to
/// `ship`'s.
///
/// Ships are visited in roster order and only a strictly closer ship replaces
/// the current best, so on an exact tie the earlier roster entry wins.
pub fn find_target(world: &World, ship: &ShipAccessor) -> Option<ShipHandle> {
    let government = ship.government()?;
    let mut closest = f64::INFINITY;
    let mut target = None;
    for other in world.iter_ships() {
        if other.handle() == ship.handle()
            || other.system() != ship.system()
            || !other.is_targetable()
            || !world.governments.is_enemy(government, other.government())
        {
            continue;
        }
        let range = (other.position() - ship.position()).norm();
        if range < closest {
            closest = range;
            target = Some(other.handle());
        }
    }
    target
}

/// Nearest other ship in the same system, preferring hostile ships over
/// everything else. Used for the player's "target nearest" key.
pub fn find_nearest_preferring_enemies(world: &World, ship: &ShipAccessor) -> Option<ShipHandle> {
    let mut closest = f64::INFINITY;
    let mut saw_enemy = false;
    let mut target = None;
    for other in world.iter_ships() {
        if other.handle() == ship.handle()
            || other.system() != ship.system()
            || !other.is_targetable()
        {
            continue;
        }
        let range = (other.position() - ship.position()).norm();
        let is_enemy = ship
            .government()
            .map(|g| world.governments.is_enemy(g, other.government()))
            .unwrap_or(false);
        if (is_enemy && !saw_enemy) || (is_enemy == saw_enemy && range < closest) {
            target = Some(other.handle());
            closest = range;
        }
        saw_enemy |= is_enemy;
    }
    target
}
