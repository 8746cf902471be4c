use crate::cipher::{Cipher, ALPHABET};
use fastrand::Rng;

/// Pair draws allowed per requested swap before `vary` gives up on it.
/// Only degenerate ciphers (a single 2- or 3-cycle) have no legal pair.
const MAX_PAIR_DRAWS: usize = 1024;

/// Uniformly random permutation of a..z with no letter mapped to itself.
pub fn random_derangement(rng: &mut Rng) -> Cipher {
    let mut values = *ALPHABET;
    loop {
        rng.shuffle(&mut values);
        if values.iter().zip(ALPHABET.iter()).all(|(v, k)| v != k) {
            break;
        }
    }

    Cipher::from_pairs(
        ALPHABET
            .iter()
            .zip(values.iter())
            .map(|(&k, &v)| ((k as char).to_string(), (v as char).to_string())),
    )
}

/// A copy of `base` at swap-distance `k`.
///
/// Each swap exchanges the values of two distinct keys, skipping any pair
/// where the exchange would map a key onto itself. A derangement in gives a
/// derangement out.
pub fn vary(base: &Cipher, k: usize, rng: &mut Rng) -> Cipher {
    let mut out = base.clone();
    let keys: Vec<String> = base.keys().map(str::to_string).collect();
    if keys.len() < 2 {
        return out;
    }

    for _ in 0..k {
        for _ in 0..MAX_PAIR_DRAWS {
            let k1 = &keys[rng.usize(0..keys.len())];
            let k2 = &keys[rng.usize(0..keys.len())];
            if k1 == k2 {
                continue;
            }
            let (Some(v1), Some(v2)) = (out.get(k1), out.get(k2)) else {
                continue;
            };
            if v1 == k2 || v2 == k1 {
                continue;
            }
            out.swap_values(k1, k2);
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_derangement_is_valid() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..200 {
            assert!(random_derangement(&mut rng).is_derangement());
        }
    }

    #[test]
    fn test_vary_changes_two_or_four_values() {
        let mut rng = Rng::with_seed(11);
        let base = random_derangement(&mut rng);

        let one = vary(&base, 1, &mut rng);
        let diff = base.iter().zip(one.iter()).filter(|(a, b)| a.1 != b.1).count();
        assert_eq!(diff, 2);
        assert!(one.is_derangement());

        let two = vary(&base, 2, &mut rng);
        let diff = base.iter().zip(two.iter()).filter(|(a, b)| a.1 != b.1).count();
        assert!(diff <= 4);
        assert!(two.is_derangement());
    }

    #[test]
    fn test_vary_zero_is_identity() {
        let mut rng = Rng::with_seed(3);
        let base = random_derangement(&mut rng);
        assert_eq!(vary(&base, 0, &mut rng), base);
    }

    #[test]
    fn test_vary_gives_up_on_three_cycle() {
        // every pair of a 3-cycle would create a fixed point
        let base = Cipher::from_pairs([("a", "b"), ("b", "c"), ("c", "a")]);
        let mut rng = Rng::with_seed(1);
        assert_eq!(vary(&base, 1, &mut rng), base);
    }
}
