//! Sources of randomness for graph generation and node placement.

/// Uniform numbers in `[0, 1)`.
pub trait RandomSource {
	fn next_f64(&mut self) -> f64;
}

/// Browser `Math.random()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
	fn next_f64(&mut self) -> f64 {
		js_sys::Math::random()
	}
}

/// Deterministic linear congruential generator, for reproducible graphs.
#[derive(Clone, Debug)]
pub struct SeededRandom {
	state: u64,
}

impl SeededRandom {
	pub fn new(seed: u64) -> Self {
		Self {
			state: seed ^ 0x5DEE_CE66D,
		}
	}
}

impl RandomSource for SeededRandom {
	fn next_f64(&mut self) -> f64 {
		self.state = self
			.state
			.wrapping_mul(6_364_136_223_846_793_005)
			.wrapping_add(1_442_695_040_888_963_407);
		// Top 53 bits give a uniform double.
		(self.state >> 11) as f64 / (1u64 << 53) as f64
	}
}

/// A random source for the current target: `Math.random()` in the browser,
/// or a seeded generator when a seed is given (and on the host).
pub fn source(seed: Option<u64>) -> Box<dyn RandomSource> {
	match seed {
		Some(seed) => Box::new(SeededRandom::new(seed)),
		None if cfg!(target_arch = "wasm32") => Box::new(MathRandom),
		None => Box::new(SeededRandom::new(crate::clock::now_ms() as u64)),
	}
}

/// Integer in `from..=to`.
pub fn random_from_to(rng: &mut dyn RandomSource, from: i64, to: i64) -> i64 {
	(rng.next_f64() * (to - from + 1) as f64 + from as f64).floor() as i64
}
