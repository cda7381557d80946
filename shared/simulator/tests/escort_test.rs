use nalgebra::vector;
use starlane_simulator::ai::escort::move_escort;
use starlane_simulator::angle::Angle;
use starlane_simulator::command::{Command, Goals, Turn};
use starlane_simulator::ship::{self, shuttle, Departure, ShipData};
use starlane_simulator::simulation::{Simulation, World};
use starlane_simulator::system::{StellarObject, SystemHandle};
use test_log::test;

#[test]
fn test_escort_never_leaves_before_parent() {
    let mut world = World::new();
    let home = world.galaxy.add_system("Home", vector![0.0, 0.0]);
    let next = world.galaxy.add_system("Next", vector![100.0, 0.0]);
    world.galaxy.link(home, next);
    let planet = world
        .galaxy
        .add_object(
            home,
            StellarObject::planet("Dock", vector![500.0, 0.0], 100.0, true),
        )
        .unwrap();
    let government = world.governments.add("Merchant");

    let parent = ship::create(
        &mut world,
        vector![0.0, 0.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        shuttle(government, home),
    )
    .unwrap();
    let escort = ship::create(
        &mut world,
        vector![-100.0, 50.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        ShipData {
            parent: Some(parent),
            ..shuttle(government, home)
        },
    )
    .unwrap();

    let departures = [
        Departure::None,
        Departure::Landing { ticks: 5 },
        Departure::Jumping { ticks: 5 },
    ];
    let mut saw_land = false;
    let mut saw_jump = false;
    for departure in departures {
        for position in [vector![0.0, 0.0], vector![520.0, 10.0]] {
            for velocity in [vector![0.0, 0.0], vector![3.0, 0.0]] {
                for facing in [0.0, 90.0] {
                    for bits in 0..16 {
                        let data = world.ship_data_mut(parent).unwrap();
                        data.departure = departure;
                        data.position = position;
                        data.velocity = velocity;
                        data.facing = Angle::new(facing);
                        data.goals = Goals {
                            target_ship: None,
                            target_planet: (bits & 1 != 0).then_some(planet),
                            target_system: (bits & 2 != 0).then_some(next),
                        };
                        data.command = Command {
                            land: bits & 4 != 0,
                            jump: bits & 8 != 0,
                            ..Command::neutral(data.goals)
                        };

                        let parent = world.ship(parent).unwrap();
                        let escort = world.ship(escort).unwrap();
                        let mut command = Command::neutral(escort.goals());
                        move_escort(&escort, &parent, &mut command);

                        if command.land {
                            saw_land = true;
                            assert!(parent.is_landing() || parent.can_land());
                        }
                        if command.jump {
                            saw_jump = true;
                            assert!(parent.is_jumping() || parent.can_jump());
                        }
                    }
                }
            }
        }
    }
    assert!(saw_land);
    assert!(saw_jump);
}

#[test]
fn test_escort_mirrors_parent_order() {
    let mut world = World::new();
    let home = world.galaxy.add_system("Home", vector![0.0, 0.0]);
    let planet = world
        .galaxy
        .add_object(
            home,
            StellarObject::planet("Dock", vector![500.0, 0.0], 100.0, true),
        )
        .unwrap();
    let government = world.governments.add("Merchant");
    let parent = ship::create(
        &mut world,
        vector![-1000.0, 0.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        shuttle(government, home),
    )
    .unwrap();
    let escort = ship::create(
        &mut world,
        vector![-1000.0, 100.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        ShipData {
            parent: Some(parent),
            ..shuttle(government, home)
        },
    )
    .unwrap();

    let data = world.ship_data_mut(parent).unwrap();
    data.goals.target_planet = Some(planet);
    data.command = Command {
        land: true,
        ..Command::neutral(data.goals)
    };

    let parent = world.ship(parent).unwrap();
    let escort = world.ship(escort).unwrap();
    let mut command = Command::neutral(escort.goals());
    move_escort(&escort, &parent, &mut command);
    assert_eq!(command.goals.target_planet, Some(planet));
    // Parent is still far from the planet.
    assert!(!command.land);
}

#[test]
fn test_escort_circles_idle_parent() {
    let mut world = World::new();
    let home = world.galaxy.add_system("Home", vector![0.0, 0.0]);
    let government = world.governments.add("Merchant");
    let parent = ship::create(
        &mut world,
        vector![0.0, 0.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        shuttle(government, home),
    )
    .unwrap();
    let escort = ship::create(
        &mut world,
        vector![0.0, -1000.0],
        vector![0.0, 0.0],
        Angle::new(90.0),
        ShipData {
            parent: Some(parent),
            ..shuttle(government, home)
        },
    )
    .unwrap();

    let parent = world.ship(parent).unwrap();
    let escort = world.ship(escort).unwrap();
    let mut command = Command::neutral(escort.goals());
    move_escort(&escort, &parent, &mut command);
    assert_eq!(command.turn, Turn::Straight);
    assert!(command.thrust);
    assert!(!command.land);
    assert!(!command.jump);
}

#[test]
fn test_escort_follows_parent_through_hyperspace() {
    let mut sim = Simulation::new("test", 0).unwrap();
    let next = sim.world.galaxy.add_system("Next", vector![100.0, 0.0]);
    sim.world.galaxy.link(SystemHandle(0), next);
    let government = sim.world.governments.add("Merchant");
    let parent = ship::create(
        &mut sim.world,
        vector![0.0, 0.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        shuttle(government, SystemHandle(0)),
    )
    .unwrap();
    let escort = ship::create(
        &mut sim.world,
        vector![0.0, 100.0],
        vector![0.0, 0.0],
        Angle::new(0.0),
        ShipData {
            parent: Some(parent),
            ..shuttle(government, SystemHandle(0))
        },
    )
    .unwrap();

    let mut parent_arrived = None;
    let mut escort_arrived = None;
    for tick in 0..1000 {
        sim.step();
        for &(handle, system) in sim.events().arrived.iter() {
            if system != next {
                continue;
            }
            if handle == parent && parent_arrived.is_none() {
                parent_arrived = Some(tick);
            }
            if handle == escort && escort_arrived.is_none() {
                escort_arrived = Some(tick);
            }
        }
        if escort_arrived.is_some() {
            break;
        }
    }
    let parent_arrived = parent_arrived.unwrap();
    let escort_arrived = escort_arrived.unwrap();
    assert!(escort_arrived >= parent_arrived);
}
