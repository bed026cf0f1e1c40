pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    engine::GoldbachEngine,
    pairs::{find_pairs, MembershipStrategy, PairFinder},
    pipeline::VerificationPipeline,
    primes::{generate, GenerationStrategy, PrimeGenerator},
    report::OutputFormat,
};
pub use domain::model::{Decomposition, PairSet, PrimeSequence, VerificationReport, DEMO_NUMBERS};
pub use utils::error::{GoldbachError, Result};
