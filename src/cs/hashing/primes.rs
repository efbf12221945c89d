//! # Prime Capacities
//!
//! Table sizes for quadratic probing are kept prime: with a prime capacity `p` the
//! offsets `j^2 mod p` reach `(p + 1) / 2` distinct slots, so a table less than half
//! full always has an empty slot on every probe sequence.
//!
//! Primality is decided by plain trial division over odd factors up to `sqrt(n)`,
//! which is plenty for table-sized numbers.

use num_integer::{Integer, Roots};

/// Returns true if `n` is prime. `0`, `1` and even numbers other than `2` are not.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n.is_even() {
        return false;
    }
    let limit = n.sqrt();
    (3..=limit).step_by(2).all(|factor| n % factor != 0)
}

/// Returns the smallest prime reachable from `n` by first bumping an even `n` to odd,
/// then stepping through odd candidates.
///
/// Note that `2` maps to `3`: only odd candidates are ever tried.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n.is_even() { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}
