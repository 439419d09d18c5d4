//! Sparse data-memory backing store.

use std::collections::HashMap;

use super::traits::DataMemory;

/// Word-addressed data memory backed by a hash map.
///
/// Addresses that were never written read as zero, so an image only needs
/// to list the words it actually initializes. Cloning the store is cheap
/// enough that each simulation run can work on its own copy of the initial
/// image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseMemory {
    words: HashMap<u32, i32>,
}

impl SparseMemory {
    /// Creates an empty memory; every address reads as zero.
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Reads the word at `addr` without requiring mutable access.
    pub fn get(&self, addr: u32) -> i32 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    /// Stores `value` at `addr`.
    pub fn set(&mut self, addr: u32, value: i32) {
        let _ = self.words.insert(addr, value);
    }

    /// Number of words that have been explicitly written.
    pub fn populated_words(&self) -> usize {
        self.words.len()
    }

    /// Iterates over `(address, value)` pairs of explicitly written words,
    /// in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.words.iter().map(|(addr, val)| (*addr, *val))
    }
}

impl DataMemory for SparseMemory {
    fn read(&mut self, addr: u32) -> i32 {
        self.get(addr)
    }

    fn write(&mut self, addr: u32, value: i32) {
        self.set(addr, value);
    }
}
