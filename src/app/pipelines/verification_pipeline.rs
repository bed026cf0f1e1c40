use crate::core::pairs::PairFinder;
use crate::core::primes::PrimeGenerator;
use crate::core::report;
use crate::core::{ConfigProvider, Decomposition, Pipeline, Storage, VerificationReport};
use crate::utils::error::{GoldbachError, Result};
use crate::utils::validation;
use std::path::Path;

/// Parse one integer per line. Blank lines are skipped.
pub fn parse_numbers(content: &str) -> Result<Vec<i64>> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, text)| {
            text.parse::<i64>()
                .map_err(|_| GoldbachError::InputParseError {
                    line,
                    content: text.to_string(),
                })
        })
        .collect()
}

pub struct VerificationPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> VerificationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_input(&self, path: &str) -> Result<Vec<i64>> {
        let data = self.storage.read_file(path).await?;
        parse_numbers(&String::from_utf8_lossy(&data))
    }

    fn generator(&self) -> PrimeGenerator {
        PrimeGenerator::new(self.config.generation_strategy())
            .with_channel_capacity(self.config.channel_capacity())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for VerificationPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<i64>> {
        let numbers = self.config.numbers();
        if !numbers.is_empty() {
            tracing::debug!("Using {} numbers from configuration", numbers.len());
            return Ok(numbers.to_vec());
        }

        if let Some(path) = self.config.input_path() {
            tracing::debug!("Reading input numbers from: {}", path);
            match self.read_input(path).await {
                Ok(values) if !values.is_empty() => return Ok(values),
                Ok(_) => tracing::warn!("Input file {} has no numbers, using fallback set", path),
                Err(e) => tracing::warn!("Cannot use input file {}: {}, using fallback set", path, e),
            }
        }

        let fallback = self.config.fallback_numbers();
        if fallback.is_empty() {
            return Err(GoldbachError::EmptyInputError);
        }
        Ok(fallback.to_vec())
    }

    async fn transform(&self, values: Vec<i64>) -> Result<VerificationReport> {
        // 只產生一次質數，所有 target 共用
        let bound = validation::bound_for(&values);
        let primes = self.generator().generate(bound).await?;

        let finder = PairFinder::new(&primes, self.config.membership_strategy());
        let decompositions = values
            .iter()
            .map(|&target| {
                if let Err(e) = validation::validate_target(target) {
                    tracing::debug!("{}, no pairs", e);
                }
                Decomposition::new(target, finder.find_pairs(target))
            })
            .collect();

        Ok(VerificationReport::new(&primes, decompositions))
    }

    async fn load(&self, result: VerificationReport) -> Result<String> {
        let format = self.config.output_format();
        let rendered = report::render(&result, format)?;

        if let Some(dir) = self.config.output_path() {
            let path = Path::new(dir).join(format.report_filename());
            let path = path.to_string_lossy();
            tracing::debug!("Writing report ({} bytes) to {}", rendered.len(), path);
            self.storage.write_file(&path, rendered.as_bytes()).await?;
            tracing::info!("📁 Report saved to: {}", path);
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pairs::MembershipStrategy;
    use crate::core::primes::GenerationStrategy;
    use crate::core::report::OutputFormat;
    use crate::domain::model::DEMO_NUMBERS;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .await
                .insert(path.to_string(), content.as_bytes().to_vec());
            self
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                GoldbachError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        numbers: Vec<i64>,
        input_path: Option<String>,
        fallback: Vec<i64>,
        generation: GenerationStrategy,
        membership: MembershipStrategy,
        format: OutputFormat,
        output_path: Option<String>,
    }

    impl Default for MockConfig {
        fn default() -> Self {
            Self {
                numbers: vec![],
                input_path: Some("data.txt".to_string()),
                fallback: DEMO_NUMBERS.to_vec(),
                generation: GenerationStrategy::TrialDivision,
                membership: MembershipStrategy::LinearScan,
                format: OutputFormat::Text,
                output_path: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn numbers(&self) -> &[i64] {
            &self.numbers
        }

        fn input_path(&self) -> Option<&str> {
            self.input_path.as_deref()
        }

        fn fallback_numbers(&self) -> &[i64] {
            &self.fallback
        }

        fn generation_strategy(&self) -> GenerationStrategy {
            self.generation
        }

        fn channel_capacity(&self) -> usize {
            8
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

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("4\n 14 \n\n26\n").unwrap(), vec![4, 14, 26]);
        assert_eq!(parse_numbers("-6\n").unwrap(), vec![-6]);
        assert!(parse_numbers("").unwrap().is_empty());

        match parse_numbers("4\nfour\n") {
            Err(GoldbachError::InputParseError { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "four");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_prefers_configured_numbers() {
        let storage = MockStorage::new().with_file("data.txt", "8\n10\n").await;
        let config = MockConfig {
            numbers: vec![6],
            ..Default::default()
        };
        let pipeline = VerificationPipeline::new(storage, config);

        assert_eq!(pipeline.extract().await.unwrap(), vec![6]);
    }

    #[tokio::test]
    async fn test_extract_reads_input_file() {
        let storage = MockStorage::new().with_file("data.txt", "8\n10\n").await;
        let pipeline = VerificationPipeline::new(storage, MockConfig::default());

        assert_eq!(pipeline.extract().await.unwrap(), vec![8, 10]);
    }

    #[tokio::test]
    async fn test_extract_falls_back_on_missing_or_malformed_file() {
        let pipeline = VerificationPipeline::new(MockStorage::new(), MockConfig::default());
        assert_eq!(pipeline.extract().await.unwrap(), DEMO_NUMBERS.to_vec());

        let storage = MockStorage::new().with_file("data.txt", "8\nten\n").await;
        let pipeline = VerificationPipeline::new(storage, MockConfig::default());
        assert_eq!(pipeline.extract().await.unwrap(), DEMO_NUMBERS.to_vec());

        let storage = MockStorage::new().with_file("data.txt", "\n\n").await;
        let pipeline = VerificationPipeline::new(storage, MockConfig::default());
        assert_eq!(pipeline.extract().await.unwrap(), DEMO_NUMBERS.to_vec());
    }

    #[tokio::test]
    async fn test_extract_without_any_source_fails() {
        let config = MockConfig {
            input_path: None,
            fallback: vec![],
            ..Default::default()
        };
        let pipeline = VerificationPipeline::new(MockStorage::new(), config);

        assert!(matches!(
            pipeline.extract().await,
            Err(GoldbachError::EmptyInputError)
        ));
    }

    #[tokio::test]
    async fn test_transform_demo_set() {
        let pipeline = VerificationPipeline::new(MockStorage::new(), MockConfig::default());
        let report = pipeline.transform(DEMO_NUMBERS.to_vec()).await.unwrap();

        assert_eq!(report.bound, 100);
        assert_eq!(report.prime_count, 25);
        let pairs: Vec<Vec<u64>> = report
            .decompositions
            .iter()
            .map(|d| d.pairs.clone())
            .collect();
        assert_eq!(
            pairs,
            vec![
                vec![],
                vec![2],
                vec![3, 7],
                vec![3, 7, 13],
                vec![3, 11, 17, 29, 41, 47],
            ]
        );
        assert!(report.holds());
    }

    #[tokio::test]
    async fn test_transform_negative_values_clamp_bound() {
        let pipeline = VerificationPipeline::new(MockStorage::new(), MockConfig::default());
        let report = pipeline.transform(vec![-10, -4]).await.unwrap();

        assert_eq!(report.bound, 0);
        assert_eq!(report.prime_count, 0);
        assert!(report.decompositions.iter().all(|d| d.pairs.is_empty()));
    }

    #[tokio::test]
    async fn test_transform_streaming_generator() {
        let config = MockConfig {
            generation: GenerationStrategy::Streaming,
            membership: MembershipStrategy::HashSet,
            ..Default::default()
        };
        let pipeline = VerificationPipeline::new(MockStorage::new(), config);
        let report = pipeline.transform(vec![26, 100]).await.unwrap();

        assert_eq!(report.decompositions[0].pairs, vec![3, 7, 13]);
        assert_eq!(report.decompositions[1].pairs, vec![3, 11, 17, 29, 41, 47]);
    }

    #[tokio::test]
    async fn test_load_writes_report_when_output_path_set() {
        let storage = MockStorage::new();
        let config = MockConfig {
            format: OutputFormat::Csv,
            output_path: Some("out".to_string()),
            ..Default::default()
        };
        let pipeline = VerificationPipeline::new(storage.clone(), config);

        let report = pipeline.transform(vec![4]).await.unwrap();
        let rendered = pipeline.load(report).await.unwrap();

        let expected_path = Path::new("out").join("goldbach_report.csv");
        let saved = storage
            .get_file(&expected_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(saved, rendered.as_bytes());
        assert!(rendered.contains("4,1,2,2"));
    }
}
