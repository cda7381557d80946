use super::prelude::*;

/// Four linked systems with traders, their escorts, pirates and the player.
pub struct Frontier {}

impl Scenario for Frontier {
    fn name(&self) -> String {
        "frontier".into()
    }

    fn human_name(&self) -> String {
        "Frontier Trade Lanes".into()
    }

    fn init(&mut self, world: &mut World, seed: u32) -> Result<(), Error> {
        let mut rng = new_rng(seed as u64);

        let merchant = world.governments.add("Merchant");
        let pirate = world.governments.add("Pirate");
        let militia = world.governments.add("Militia");
        world.governments.set_enemy(pirate, merchant);
        world.governments.set_enemy(pirate, militia);

        let galaxy = &mut world.galaxy;
        let sol = galaxy.add_system("Sol", vector![0.0, 0.0]);
        let alpha = galaxy.add_system("Alpha", vector![100.0, 0.0]);
        let vega = galaxy.add_system("Vega", vector![0.0, 100.0]);
        let rigel = galaxy.add_system("Rigel", vector![-100.0, -50.0]);
        galaxy.link(sol, alpha);
        galaxy.link(sol, vega);
        galaxy.link(alpha, vega);
        galaxy.link(sol, rigel);

        galaxy.add_object(sol, StellarObject::star(vector![0.0, 0.0], 150.0))?;
        galaxy.add_object(
            sol,
            StellarObject::planet("Earth", vector![1200.0, 300.0], 120.0, true),
        )?;
        galaxy.add_object(
            sol,
            StellarObject::planet("Luna", vector![-900.0, 700.0], 60.0, false),
        )?;
        galaxy.add_object(alpha, StellarObject::star(vector![0.0, 0.0], 200.0))?;
        galaxy.add_object(
            alpha,
            StellarObject::planet("Port Alpha", vector![-800.0, -600.0], 100.0, true),
        )?;
        galaxy.add_object(vega, StellarObject::star(vector![0.0, 0.0], 250.0))?;
        galaxy.add_object(rigel, StellarObject::star(vector![0.0, 0.0], 180.0))?;
        galaxy.add_object(
            rigel,
            StellarObject::planet("Rigel Station", vector![600.0, -900.0], 80.0, true),
        )?;

        let random_position = |rng: &mut SeededRng| -> Vector2<f64> {
            let d = 1500.0;
            vector![rng.gen_range(-d..d), rng.gen_range(-d..d)]
        };

        let player = ship::create(
            world,
            vector![0.0, -400.0],
            vector![0.0, 0.0],
            Angle::new(90.0),
            ShipData {
                name: "Player".to_string(),
                ..shuttle(militia, sol)
            },
        )?;
        world.player = Some(player);

        for system in [sol, alpha, vega] {
            for _ in 0..3 {
                let position = random_position(&mut rng);
                let facing = Angle::new(rng.gen_range(-180.0..180.0));
                let leader = ship::create(
                    world,
                    position,
                    vector![0.0, 0.0],
                    facing,
                    freighter(merchant, system),
                )?;
                ship::create(
                    world,
                    position + vector![60.0, 0.0],
                    vector![0.0, 0.0],
                    facing,
                    ShipData {
                        parent: Some(leader),
                        ..interceptor(merchant, system)
                    },
                )?;
            }
        }

        for system in [rigel, alpha] {
            for _ in 0..2 {
                let position = random_position(&mut rng);
                let facing = Angle::new(rng.gen_range(-180.0..180.0));
                ship::create(
                    world,
                    position,
                    vector![0.0, 0.0],
                    facing,
                    ShipData {
                        name: "Corsair".to_string(),
                        ..interceptor(pirate, system)
                    },
                )?;
            }
        }

        log::info!(
            "frontier: {} ships in {} systems",
            world.ships.len(),
            world.galaxy.systems().count()
        );
        Ok(())
    }
}
