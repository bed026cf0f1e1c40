pub mod cli;
pub mod toml_config;

use crate::core::pairs::MembershipStrategy;
use crate::core::primes::{GenerationStrategy, DEFAULT_CHANNEL_CAPACITY};
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::domain::model::DEMO_NUMBERS;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "goldbach-verifier")]
#[command(about = "Find Goldbach decompositions for a set of even integers")]
pub struct CliConfig {
    /// Numbers to decompose; overrides the input file
    #[arg(allow_negative_numbers = true)]
    pub numbers: Vec<i64>,

    /// File with one integer per line
    #[arg(short, long, default_value = "data.txt")]
    pub input: String,

    /// Directory to write the report into
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = GenerationStrategy::TrialDivision)]
    pub generator: GenerationStrategy,

    #[arg(long, value_enum, default_value_t = MembershipStrategy::BinarySearch)]
    pub membership: MembershipStrategy,

    /// Queue size between the prime producer and the collector (streaming generator only)
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    fn input_path(&self) -> Option<&str> {
        Some(self.input.as_str())
    }

    fn fallback_numbers(&self) -> &[i64] {
        &DEMO_NUMBERS
    }

    fn generation_strategy(&self) -> GenerationStrategy {
        self.generator
    }

    fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    fn membership_strategy(&self) -> MembershipStrategy {
        self.membership
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        validation::validate_positive_number("channel_capacity", self.channel_capacity, 1)?;
        Ok(())
    }
}
