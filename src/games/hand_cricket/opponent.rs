use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::games::hand_cricket::state::{CoinSide, Guess, MAX_GUESS, MIN_GUESS};

/// Source of the computer's decisions.
pub trait Opponent {
    fn flip_coin(&mut self) -> CoinSide;
    fn pick(&mut self) -> Guess;
}

/// Uniformly random opponent.
#[derive(Debug, Clone)]
pub struct RandomOpponent<R = StdRng> {
    rng: R,
}

impl RandomOpponent<StdRng> {
    /// Seeded runs are reproducible; without a seed the OS entropy source is used.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl<R: Rng> Opponent for RandomOpponent<R> {
    fn flip_coin(&mut self) -> CoinSide {
        if self.rng.random_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }

    fn pick(&mut self) -> Guess {
        let value = self.rng.random_range(MIN_GUESS..=MAX_GUESS);
        Guess::new(value).unwrap_or_else(|_| unreachable!("pick out of range: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_plays_the_same_game() {
        let mut a = RandomOpponent::from_seed(Some(7));
        let mut b = RandomOpponent::from_seed(Some(7));
        for _ in 0..50 {
            assert_eq!(a.pick(), b.pick());
            assert_eq!(a.flip_coin(), b.flip_coin());
        }
    }

    #[test]
    fn picks_cover_one_to_six() {
        let mut opponent = RandomOpponent::from_seed(Some(2024));
        let mut seen = [false; 6];
        for _ in 0..600 {
            let pick = opponent.pick().value();
            assert!((1..=6).contains(&pick));
            seen[usize::from(pick - 1)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn coin_lands_on_both_sides() {
        let mut opponent = RandomOpponent::from_seed(Some(99));
        let heads = (0..400).filter(|_| opponent.flip_coin() == CoinSide::Heads).count();
        assert!(heads > 100 && heads < 300, "heads = {heads}");
    }
}
