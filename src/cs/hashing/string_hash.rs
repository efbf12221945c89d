//! String key hash functions and the `KeyHasher` capability the probing map is built on.

/// Plain function pointer form of a key hash function.
pub type HashFn = fn(&str) -> u64;

/// Maps a string key to a non-negative integer. The map reduces it modulo its capacity.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's code points. Anagrams collide.
pub fn hash_function_1(key: &str) -> u64 {
    key.chars()
        .fold(0u64, |hash, c| hash.wrapping_add(u64::from(c)))
}

/// Sum of the key's code points, each weighted by its 1-based position.
pub fn hash_function_2(key: &str) -> u64 {
    key.chars().zip(1u64..).fold(0u64, |hash, (c, weight)| {
        hash.wrapping_add(weight.wrapping_mul(u64::from(c)))
    })
}
