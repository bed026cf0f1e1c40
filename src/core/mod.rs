pub mod engine;
pub mod pairs;
pub mod pipeline;
pub mod primes;
pub mod report;

pub use crate::domain::model::{Decomposition, PairSet, PrimeSequence, VerificationReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
