use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// 找不到任何輸入時使用的示範數列
pub const DEMO_NUMBERS: [i64; 5] = [3, 4, 14, 26, 100];

/// All primes in `[2, bound]`, strictly increasing.
///
/// Only the generators in `core::primes` build one, so the ordering invariant
/// holds for every instance. It derefs to `[u64]` for read-only use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimeSequence {
    bound: u64,
    primes: Vec<u64>,
}

impl PrimeSequence {
    pub(crate) fn new(bound: u64, primes: Vec<u64>) -> Self {
        debug_assert!(primes.windows(2).all(|w| w[0] < w[1]));
        Self { bound, primes }
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    pub fn largest(&self) -> Option<u64> {
        self.primes.last().copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.primes
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.primes
    }
}

impl Deref for PrimeSequence {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.primes
    }
}

/// Smaller member of each Goldbach pair, increasing.
pub type PairSet = Vec<u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub target: i64,
    pub pairs: PairSet,
}

impl Decomposition {
    pub fn new(target: i64, pairs: PairSet) -> Self {
        Self { target, pairs }
    }

    pub fn count(&self) -> usize {
        self.pairs.len()
    }

    /// `(p, target - p)` for every pair.
    pub fn pairs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        // pairs 非空時 target 必為 >= 4 的偶數
        let target = self.target as u64;
        self.pairs.iter().map(move |&p| (p, target - p))
    }

    pub fn is_counterexample(&self) -> bool {
        self.target >= 4 && self.target % 2 == 0 && self.pairs.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub bound: u64,
    pub prime_count: usize,
    pub largest_prime: Option<u64>,
    pub decompositions: Vec<Decomposition>,
    pub counterexamples: Vec<i64>,
    pub generated_at: DateTime<Utc>,
}

impl VerificationReport {
    pub fn new(primes: &PrimeSequence, decompositions: Vec<Decomposition>) -> Self {
        let counterexamples = decompositions
            .iter()
            .filter(|d| d.is_counterexample())
            .map(|d| d.target)
            .collect();

        Self {
            bound: primes.bound(),
            prime_count: primes.len(),
            largest_prime: primes.largest(),
            decompositions,
            counterexamples,
            generated_at: Utc::now(),
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.decompositions.iter().map(Decomposition::count).sum()
    }

    pub fn holds(&self) -> bool {
        self.counterexamples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposition_pairs() {
        let decomposition = Decomposition::new(26, vec![3, 7, 13]);
        let pairs: Vec<(u64, u64)> = decomposition.pairs().collect();
        assert_eq!(pairs, vec![(3, 23), (7, 19), (13, 13)]);
        assert_eq!(decomposition.count(), 3);
        assert!(!decomposition.is_counterexample());
    }

    #[test]
    fn test_counterexample_only_for_even_targets() {
        assert!(Decomposition::new(8, vec![]).is_counterexample());
        assert!(!Decomposition::new(3, vec![]).is_counterexample());
        assert!(!Decomposition::new(9, vec![]).is_counterexample());
        assert!(!Decomposition::new(2, vec![]).is_counterexample());
    }

    #[test]
    fn test_report_collects_counterexamples() {
        let primes = PrimeSequence::new(10, vec![2, 3, 5, 7]);
        let report = VerificationReport::new(
            &primes,
            vec![
                Decomposition::new(4, vec![2]),
                Decomposition::new(3, vec![]),
                Decomposition::new(30, vec![]),
            ],
        );

        assert_eq!(report.bound, 10);
        assert_eq!(report.prime_count, 4);
        assert_eq!(report.largest_prime, Some(7));
        assert_eq!(report.counterexamples, vec![30]);
        assert_eq!(report.total_pairs(), 1);
        assert!(!report.holds());
    }
}
