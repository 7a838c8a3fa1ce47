use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Values this close are treated as equal when ordering siblings.
pub const NOISE: i32 = 2;

/// Seeded coin used to shuffle near-equal siblings so play is not fully deterministic.
#[derive(Clone, Debug)]
pub struct TieBreak {
    rng: SmallRng,
}

impl TieBreak {
    pub fn seeded(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }

    /// Seeded from the wall clock, for live play.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0);
        Self::seeded(nanos)
    }

    pub fn new(seed: Option<u64>) -> Self { seed.map_or_else(Self::from_clock, Self::seeded) }

    /// Whether a newcomer tied with an existing sibling goes ahead of it, one time in four.
    pub fn ahead_of_tie(&mut self) -> bool { self.rng.gen_ratio(1, 4) }
}

pub fn is_tie(a: i32, b: i32) -> bool { (a - b).abs() <= NOISE }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = TieBreak::seeded(42);
        let mut b = TieBreak::seeded(42);
        let xs: Vec<bool> = (0..64).map(|_| a.ahead_of_tie()).collect();
        let ys: Vec<bool> = (0..64).map(|_| b.ahead_of_tie()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().any(|&x| x) && xs.iter().any(|&x| !x));
    }

    #[test]
    fn tie_tolerance() {
        assert!(is_tie(10, 12));
        assert!(is_tie(-3, -1));
        assert!(!is_tie(10, 13));
    }
}
