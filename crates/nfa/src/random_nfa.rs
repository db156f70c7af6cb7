use rand::Rng;

use crate::Fragment;
use crate::NfaBuilder;

/// Generates a random fragment over the given alphabet by applying at most
/// `depth` nested combinators to single symbol fragments.
pub fn random_fragment(builder: &mut NfaBuilder, rng: &mut impl Rng, alphabet: &[char], depth: usize) -> Fragment {
    debug_assert!(!alphabet.is_empty(), "The alphabet must contain at least one symbol");

    if depth == 0 {
        return builder.char(random_symbol(rng, alphabet));
    }

    match rng.random_range(0..7) {
        0 => builder.char(random_symbol(rng, alphabet)),
        1 => {
            let first = random_fragment(builder, rng, alphabet, depth - 1);
            let second = random_fragment(builder, rng, alphabet, depth - 1);
            builder.concat(first, second)
        }
        2 => {
            let first = random_fragment(builder, rng, alphabet, depth - 1);
            let second = random_fragment(builder, rng, alphabet, depth - 1);
            builder.union(first, second)
        }
        3 => {
            let fragment = random_fragment(builder, rng, alphabet, depth - 1);
            builder.optional(fragment)
        }
        4 => {
            let fragment = random_fragment(builder, rng, alphabet, depth - 1);
            builder.plus(fragment)
        }
        5 => {
            let fragment = random_fragment(builder, rng, alphabet, depth - 1);
            builder.star(fragment)
        }
        _ => {
            let fragment = random_fragment(builder, rng, alphabet, depth - 1);
            builder.star_with_fresh_states(fragment)
        }
    }
}

/// Generates a random word over the given alphabet of at most `max_length` symbols.
pub fn random_word(rng: &mut impl Rng, alphabet: &[char], max_length: usize) -> String {
    let length = rng.random_range(0..=max_length);
    (0..length).map(|_| random_symbol(rng, alphabet)).collect()
}

fn random_symbol(rng: &mut impl Rng, alphabet: &[char]) -> char {
    alphabet[rng.random_range(0..alphabet.len())]
}
