use rand::{Rng, RngCore};

use crate::config::DIE_FACES;

/// Source of die faces. Any `rand` generator is one; tests script their own.
pub trait Die {
    fn roll(&mut self) -> u8;
}

impl<R: RngCore> Die for R {
    fn roll(&mut self) -> u8 {
        self.gen_range(1..=DIE_FACES)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::Die;

    /// Replays a fixed sequence of faces.
    pub struct LoadedDie {
        faces: VecDeque<u8>,
    }

    impl LoadedDie {
        pub fn new(faces: &[u8]) -> Self {
            Self {
                faces: faces.iter().copied().collect(),
            }
        }
    }

    impl Die for LoadedDie {
        fn roll(&mut self) -> u8 {
            self.faces.pop_front().expect("loaded die ran out of faces")
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn faces_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; DIE_FACES as usize];
        for _ in 0..600 {
            let face = rng.roll();
            assert!((1..=DIE_FACES).contains(&face));
            seen[face as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let xs: Vec<u8> = (0..20).map(|_| a.roll()).collect();
        let ys: Vec<u8> = (0..20).map(|_| b.roll()).collect();
        assert_eq!(xs, ys);
    }
}
