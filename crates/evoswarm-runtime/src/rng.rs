use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Draw a fresh seed from entropy, for runs that did not pin one.
pub fn fresh_seed() -> u64 {
    rand::random()
}
