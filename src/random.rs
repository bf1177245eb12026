// Deterministic random source for the simulation.
//
// Every draw the simulation makes comes from this one generator, in a fixed
// order, so a run is fully reproducible from its seed alone. Mulberry32 is
// small, fast and has a 32-bit state that is trivial to reset.

use rand::Rng;

pub struct Mulberry32 {
    seed: u32,
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    /// Seeds from host entropy. The seed stays small enough to read off a
    /// stats screen and type back in for a replay.
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen_range(0..=0xFF_FFFF);
        Self::new(seed)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rewinds the generator to its original seed.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }

    // Mulberry32 transform; one f64 in [0, 1) per call.
    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Uniform integer draw, both bounds inclusive.
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        (self.next_f64() * (max - min + 1) as f64 + min as f64).floor() as i32
    }
}
