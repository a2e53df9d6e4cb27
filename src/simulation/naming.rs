//! Cosmetic feeder names.
//!
//! Names alternate consonant and vowel over seven letters, starting with a
//! capitalized consonant ("Bajoxeq"). They carry no meaning for fitness; a child
//! simply inherits a name that resembles its parents'.

use rand::Rng;
use rand::seq::IndexedRandom;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];
const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w',
    'x', 'z',
];

/// Number of letters in every name.
pub const NAME_LEN: usize = 7;

fn letter_for(position: usize, rng: &mut impl Rng) -> char {
    let pool = if position % 2 == 0 { CONSONANTS } else { VOWELS };
    let letter = *pool.choose(rng).unwrap_or(&'x');
    if position == 0 {
        letter.to_ascii_uppercase()
    } else {
        letter
    }
}

/// Generates a random name.
pub fn pick_name(rng: &mut impl Rng) -> String {
    (0..NAME_LEN).map(|i| letter_for(i, rng)).collect()
}

/// Returns a copy of `name` that re-draws exactly one position.
///
/// Names of unexpected length are replaced with a fresh random name.
pub fn mutate_name(name: &str, rng: &mut impl Rng) -> String {
    let letters: Vec<char> = name.chars().collect();
    if letters.len() != NAME_LEN {
        return pick_name(rng);
    }
    let index = rng.random_range(0..NAME_LEN);
    letters
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == index { letter_for(i, rng) } else { c })
        .collect()
}

/// Combines two parent names letter by letter.
pub fn baby_name(parent_1: &str, parent_2: &str, rng: &mut impl Rng) -> String {
    let a: Vec<char> = parent_1.chars().collect();
    let b: Vec<char> = parent_2.chars().collect();
    if a.len() != NAME_LEN || b.len() != NAME_LEN {
        return pick_name(rng);
    }
    (0..NAME_LEN)
        .map(|i| if rng.random::<bool>() { a[i] } else { b[i] })
        .collect()
}
