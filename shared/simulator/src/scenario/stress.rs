use super::prelude::*;

/// One crowded system of mutually hostile ships around a single spaceport.
pub struct StressScenario {
    pub ships: usize,
}

impl Scenario for StressScenario {
    fn name(&self) -> String {
        "stress".into()
    }

    fn init(&mut self, world: &mut World, seed: u32) -> Result<(), Error> {
        let mut rng = new_rng(seed as u64);
        let red = world.governments.add("Red");
        let blue = world.governments.add("Blue");
        world.governments.set_enemy(red, blue);

        let arena = world.galaxy.add_system("Arena", vector![0.0, 0.0]);
        let exit = world.galaxy.add_system("Exit", vector![0.0, 50.0]);
        world.galaxy.link(arena, exit);
        world.galaxy.add_object(
            arena,
            StellarObject::planet("Depot", vector![0.0, 0.0], 100.0, true),
        )?;

        for i in 0..self.ships {
            let government = if i % 2 == 0 { red } else { blue };
            let d = 5000.0;
            let position = vector![rng.gen_range(-d..d), rng.gen_range(-d..d)];
            let velocity = vector![rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0)];
            ship::create(
                world,
                position,
                velocity,
                Angle::new(rng.gen_range(-180.0..180.0)),
                interceptor(government, arena),
            )?;
        }
        Ok(())
    }
}
