pub mod primes;
pub mod quadratic_probing;
pub mod string_hash;


// Re-export the main types
pub use primes::{is_prime, next_prime};
pub use quadratic_probing::{Entries, ProbingHashMap, ProbingHashMapBuilder};
pub use string_hash::{hash_function_1, hash_function_2, HashFn, KeyHasher};
