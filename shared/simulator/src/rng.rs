pub use rand_chacha::ChaCha8Rng as SeededRng;

/// Deterministic RNG; the same seed always replays the same draws.
pub fn new_rng(seed: u64) -> SeededRng {
    rand_seeder::Seeder::from(seed).make_rng()
}
