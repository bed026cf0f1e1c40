use crate::domain::model::PairSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum MembershipStrategy {
    LinearScan,
    #[default]
    BinarySearch,
    HashSet,
}

/// Linear scan membership test.
pub fn contains(primes: &[u64], value: u64) -> bool {
    primes.iter().any(|&p| p == value)
}

/// Half of `target` when it is an even number of at least 4.
fn half_of(target: i64) -> Option<u64> {
    if target < 4 || target % 2 != 0 {
        return None;
    }
    Some((target / 2) as u64)
}

fn search(target: i64, primes: &[u64], is_member: impl Fn(u64) -> bool) -> PairSet {
    let Some(half) = half_of(target) else {
        return PairSet::new();
    };
    let target = target as u64;

    primes
        .iter()
        .copied()
        .take_while(|&p| p <= half)
        .filter(|&p| is_member(target - p))
        .collect()
}

/// Smaller member of every pair of primes summing to `target`.
///
/// `primes` must be sorted ascending and hold every prime up to `target`.
/// Odd targets and targets below 4 give an empty set.
pub fn find_pairs(target: i64, primes: &[u64]) -> PairSet {
    search(target, primes, |complement| contains(primes, complement))
}

enum Lookup {
    Linear,
    Binary,
    Hashed(HashSet<u64>),
}

/// Reusable pair search over one prime sequence.
pub struct PairFinder<'a> {
    primes: &'a [u64],
    lookup: Lookup,
}

impl<'a> PairFinder<'a> {
    pub fn new(primes: &'a [u64], strategy: MembershipStrategy) -> Self {
        let lookup = match strategy {
            MembershipStrategy::LinearScan => Lookup::Linear,
            MembershipStrategy::BinarySearch => Lookup::Binary,
            MembershipStrategy::HashSet => Lookup::Hashed(primes.iter().copied().collect()),
        };
        Self { primes, lookup }
    }

    pub fn is_prime(&self, value: u64) -> bool {
        match &self.lookup {
            Lookup::Linear => contains(self.primes, value),
            Lookup::Binary => self.primes.binary_search(&value).is_ok(),
            Lookup::Hashed(set) => set.contains(&value),
        }
    }

    pub fn find_pairs(&self, target: i64) -> PairSet {
        search(target, self.primes, |complement| self.is_prime(complement))
    }
}
