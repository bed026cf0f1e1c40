//! Prime generation up to an inclusive bound.
//!
//! [`generate`] is the reference trial-division generator. [`sieve`] and the
//! channel-backed [`stream`] produce exactly the same sequence.

use crate::domain::model::PrimeSequence;
use crate::utils::error::{GoldbachError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStrategy {
    #[default]
    TrialDivision,
    Sieve,
    Streaming,
}

/// `true` when no prime in `found` up to `sqrt(value)` divides `value`.
///
/// `found` must hold every prime below `value` in increasing order.
fn is_prime_against(value: u64, found: &[u64]) -> bool {
    found
        .iter()
        .take_while(|&&p| p.checked_mul(p).is_some_and(|square| square <= value))
        .all(|&p| value % p != 0)
}

/// Trial division against the primes discovered so far.
pub fn generate(bound: u64) -> PrimeSequence {
    let mut primes = Vec::new();
    for value in 2..=bound {
        if is_prime_against(value, &primes) {
            primes.push(value);
        }
    }
    PrimeSequence::new(bound, primes)
}

/// Sieve of Eratosthenes.
pub fn sieve(bound: u64) -> PrimeSequence {
    let Ok(limit) = usize::try_from(bound) else {
        // 位址空間放不下篩表
        tracing::warn!("Bound {} too large for sieve, using trial division", bound);
        return generate(bound);
    };
    if limit < 2 {
        return PrimeSequence::new(bound, Vec::new());
    }

    let mut composite = vec![false; limit + 1];
    let mut i = 2usize;
    while i.saturating_mul(i) <= limit {
        if !composite[i] {
            for multiple in (i * i..=limit).step_by(i) {
                composite[multiple] = true;
            }
        }
        i += 1;
    }

    let primes = (2..=limit)
        .filter(|&n| !composite[n])
        .map(|n| n as u64)
        .collect();
    PrimeSequence::new(bound, primes)
}

/// Primes delivered one at a time from a background producer.
///
/// The producer closes the channel exactly once, after the last prime.
/// Dropping the stream early stops the producer at its next send.
pub struct PrimeStream {
    bound: u64,
    receiver: mpsc::Receiver<u64>,
    producer: JoinHandle<()>,
}

/// Start producing primes up to `bound` on the blocking pool.
///
/// Must be called from within a tokio runtime.
pub fn stream(bound: u64, capacity: usize) -> PrimeStream {
    let (sender, receiver) = mpsc::channel(capacity.max(1));

    let producer = tokio::task::spawn_blocking(move || {
        let mut found = Vec::new();
        for value in 2..=bound {
            if !is_prime_against(value, &found) {
                continue;
            }
            found.push(value);
            if sender.blocking_send(value).is_err() {
                tracing::debug!("Prime consumer dropped at {}, stopping producer", value);
                return;
            }
        }
        tracing::debug!("Prime producer finished with {} primes", found.len());
    });

    PrimeStream {
        bound,
        receiver,
        producer,
    }
}

impl PrimeStream {
    pub async fn next(&mut self) -> Option<u64> {
        self.receiver.recv().await
    }

    /// Drain the stream into a sequence and join the producer.
    pub async fn collect(mut self) -> Result<PrimeSequence> {
        let mut primes: Vec<u64> = Vec::new();
        while let Some(prime) = self.receiver.recv().await {
            if let Some(&last) = primes.last() {
                if prime <= last {
                    return Err(GoldbachError::ProcessingError {
                        message: format!("prime {} received after {}", prime, last),
                    });
                }
            }
            primes.push(prime);
        }

        self.producer.await?;
        Ok(PrimeSequence::new(self.bound, primes))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrimeGenerator {
    strategy: GenerationStrategy,
    channel_capacity: usize,
}

impl PrimeGenerator {
    pub fn new(strategy: GenerationStrategy) -> Self {
        Self {
            strategy,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    pub async fn generate(&self, bound: u64) -> Result<PrimeSequence> {
        tracing::debug!("Generating primes up to {} with {:?}", bound, self.strategy);
        let primes = match self.strategy {
            GenerationStrategy::TrialDivision => generate(bound),
            GenerationStrategy::Sieve => sieve(bound),
            GenerationStrategy::Streaming => stream(bound, self.channel_capacity).collect().await?,
        };
        tracing::debug!("Generated {} primes", primes.len());
        Ok(primes)
    }
}

impl Default for PrimeGenerator {
    fn default() -> Self {
        Self::new(GenerationStrategy::default())
    }
}
