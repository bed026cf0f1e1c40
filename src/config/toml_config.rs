use crate::core::pairs::MembershipStrategy;
use crate::core::primes::{GenerationStrategy, DEFAULT_CHANNEL_CAPACITY};
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::domain::model::DEMO_NUMBERS;
use crate::utils::error::{GoldbachError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub verification: VerificationInfo,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub primes: PrimesConfig,
    #[serde(default)]
    pub pairs: PairsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub numbers: Vec<i64>,
    #[serde(default = "default_fallback")]
    pub fallback: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimesConfig {
    #[serde(default)]
    pub strategy: GenerationStrategy,
    pub channel_capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairsConfig {
    #[serde(default)]
    pub membership: MembershipStrategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

fn default_fallback() -> Vec<i64> {
    DEMO_NUMBERS.to_vec()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            numbers: Vec::new(),
            fallback: default_fallback(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GoldbachError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INPUT_FILE})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("verification.name", &self.verification.name)?;

        if let Some(path) = &self.input.path {
            validation::validate_path("input.path", path)?;
        }
        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }
        if let Some(capacity) = self.primes.channel_capacity {
            validation::validate_positive_number("primes.channel_capacity", capacity, 1)?;
        }

        // 至少要有一個數字來源
        if self.input.numbers.is_empty() && self.input.fallback.is_empty() {
            validation::validate_required_field("input.path", &self.input.path)?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn numbers(&self) -> &[i64] {
        &self.input.numbers
    }

    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn fallback_numbers(&self) -> &[i64] {
        &self.input.fallback
    }

    fn generation_strategy(&self) -> GenerationStrategy {
        self.primes.strategy
    }

    fn channel_capacity(&self) -> usize {
        self.primes
            .channel_capacity
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY)
    }

    fn membership_strategy(&self) -> MembershipStrategy {
        self.pairs.membership
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
