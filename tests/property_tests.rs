use cipherforge::cipher::{decode_word, encode_word};
use cipherforge::optimizer::mutation::{random_derangement, vary};
use proptest::prelude::*;

prop_compose! {
    fn arb_derangement()(seed in any::<u64>()) -> cipherforge::cipher::Cipher {
        random_derangement(&mut fastrand::Rng::with_seed(seed))
    }
}

proptest! {
    #[test]
    fn prop_generated_ciphers_are_derangements(seed in any::<u64>()) {
        let cipher = random_derangement(&mut fastrand::Rng::with_seed(seed));
        prop_assert!(cipher.is_derangement());
        prop_assert_eq!(cipher.len(), 26);
    }

    #[test]
    fn prop_mutation_preserves_derangement(
        base in arb_derangement(),
        swaps in 0usize..6,
        seed in any::<u64>()
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let varied = vary(&base, swaps, &mut rng);
        prop_assert!(varied.is_derangement());

        let changed = base.iter().zip(varied.iter()).filter(|(a, b)| a.1 != b.1).count();
        prop_assert!(changed <= swaps * 2);
    }

    #[test]
    fn prop_round_trip(cipher in arb_derangement(), word in "[a-zA-Z]{0,16}") {
        let encoded = encode_word(&word, &cipher);
        prop_assert_eq!(encoded.chars().count(), word.chars().count());
        prop_assert_eq!(decode_word(&encoded, &cipher), word);
    }

    #[test]
    fn prop_case_follows_input(cipher in arb_derangement(), word in "[a-zA-Z]{1,16}") {
        let encoded = encode_word(&word, &cipher);
        for (src, out) in word.chars().zip(encoded.chars()) {
            prop_assert_eq!(src.is_uppercase(), out.is_uppercase());
        }
        prop_assert_eq!(encode_word(&word.to_lowercase(), &cipher), encoded.to_lowercase());
    }
}
