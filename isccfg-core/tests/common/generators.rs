//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Prefix of every generated top-level noise statement. Fixtures never use it.
pub const NOISE_PREFIX: &str = "zz-noise-";

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("ISCCFG_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Random directive-like name: letter, then letters, digits and hyphens
    pub fn name(&mut self) -> String {
        let len = 1 + self.geometric(0.7);
        let mut name = String::with_capacity(len);
        name.push(self.rng.gen_range(b'a'..=b'z') as char);
        let chars = b"abcdefghijklmnopqrstuvwxyz0123456789-_";
        for _ in 1..len {
            name.push(chars[self.rng.gen_range(0..chars.len())] as char);
        }
        name
    }

    /// Random bareword value (full bareword charset)
    pub fn bare_value(&mut self) -> String {
        let len = 1 + self.geometric(0.8);
        let chars = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_.=";
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())] as char)
            .collect()
    }

    /// Random dotted-quad address
    pub fn address(&mut self) -> String {
        let octets: Vec<String> = (0..4).map(|_| self.rng.gen_range(0..=255u8).to_string()).collect();
        octets.join(".")
    }

    /// Random quoted string body (no quotes, backslashes or newlines)
    pub fn quoted_body(&mut self) -> String {
        let len = self.geometric(0.85);
        let chars = b"abc xyz;{},#/.-0123456789";
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())] as char)
            .collect()
    }

    /// Random trailing comment, `#` or `//` style, without the newline
    pub fn comment(&mut self) -> String {
        let marker = if self.chance(0.5) { "#" } else { "//" };
        format!(" {}{} {};", marker, self.bare_value(), self.quoted_body())
    }

    /// A complete top-level statement whose name starts with NOISE_PREFIX
    pub fn noise_statement(&mut self) -> String {
        format!("{}{} {};\n", NOISE_PREFIX, self.name(), self.bare_value())
    }

    /// Random leading whitespace (spaces and tabs)
    pub fn indent(&mut self) -> String {
        let width = self.geometric(0.6);
        (0..width)
            .map(|_| if self.chance(0.8) { ' ' } else { '\t' })
            .collect()
    }

    /// Inject random blank lines
    pub fn blank_lines(&mut self) -> String {
        let count = self.geometric(0.1); // Usually 0
        let eol = if self.chance(0.2) { "\r\n" } else { "\n" };
        eol.repeat(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.name(), g2.name());
            assert_eq!(g1.geometric(0.9), g2.geometric(0.9));
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut gen = Gen::new(12345);
        let samples: Vec<usize> = (0..1000).map(|_| gen.geometric(0.9)).collect();

        // With α=0.9, we expect mean ≈ 9 (geometric mean = α/(1-α))
        let mean: f64 = samples.iter().sum::<usize>() as f64 / samples.len() as f64;
        assert!(mean > 5.0 && mean < 15.0, "Mean {} out of expected range", mean);
    }

    #[test]
    fn test_generated_words_are_lexable() {
        let mut gen = Gen::new(7);
        for _ in 0..50 {
            let stmt = format!("{} {} \"{}\";{}\n", gen.name(), gen.bare_value(), gen.quoted_body(), gen.comment());
            assert!(isccfg_core::parse(stmt.as_bytes()).is_ok(), "failed on {:?}", stmt);
        }
    }
}
