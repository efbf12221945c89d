//! Error type shared by the crate's containers.

use thiserror::Error;

/// Failures surfaced by the hash map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bounded probe walk visited `capacity` slots without finding the key or an empty slot.
    #[error("probe for key {key:?} exhausted {capacity} slots without finding the key or an empty slot")]
    ProbeExhausted { key: String, capacity: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
