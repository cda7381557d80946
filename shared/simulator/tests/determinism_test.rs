use approx::assert_abs_diff_eq;
use rayon::prelude::*;
use starlane_simulator::scenario;
use starlane_simulator::simulation::Simulation;
use starlane_simulator::snapshot::{self, Snapshot};
use test_log::test;

fn run(scenario_name: &str, seed: u32, ticks: u32) -> Simulation {
    let mut sim = Simulation::new(scenario_name, seed).unwrap();
    for _ in 0..ticks {
        sim.step();
    }
    sim
}

#[test]
fn test_same_seed_same_hash() {
    (0..8u32).into_par_iter().for_each(|seed| {
        let a = run("frontier", seed, 400);
        let b = run("frontier", seed, 400);
        assert_eq!(a.hash(), b.hash(), "seed {seed}");
        assert_eq!(a.world.ships.len(), b.world.ships.len(), "seed {seed}");
    });
}

#[test]
fn test_scenarios_load() {
    for name in scenario::list() {
        let sim = Simulation::new(&name, 0).unwrap();
        assert_eq!(sim.scenario_name(), Some(name.clone()));
        assert!(sim.world.galaxy.systems().next().is_some(), "{name}");
    }
    assert!(Simulation::new("nonexistent", 0).is_err());
}

#[test]
fn test_stress_runs() {
    let sim = run("stress", 2, 50);
    assert_eq!(sim.tick(), 50);
    assert!(!sim.world.ships.is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let sim = run("frontier", 5, 100);
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.tick, 100);
    assert_eq!(snapshot.ships.len(), sim.world.ships.len());
    assert_eq!(snapshot.ships.iter().filter(|s| s.player).count(), 1);
    assert_eq!(snapshot.debug_lines.len(), 3 * sim.world.ships.len());
    assert!(snapshot.timing.total() >= 0.0);

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.tick, snapshot.tick);
    assert_eq!(decoded.ships.len(), snapshot.ships.len());
    for (a, b) in decoded.ships.iter().zip(snapshot.ships.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.command, b.command);
        assert_eq!(a.system, b.system);
    }
}

#[test]
fn test_interpolate() {
    let sim = run("frontier", 6, 20);
    let mut snapshot = sim.snapshot();
    let before = snapshot.ships.clone();
    snapshot::interpolate(&mut snapshot, 0.5);
    for (a, b) in before.iter().zip(snapshot.ships.iter()) {
        assert_abs_diff_eq!(b.position, a.position + a.velocity * 0.5, epsilon = 1e-9);
    }
}
