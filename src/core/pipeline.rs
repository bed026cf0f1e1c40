pub use crate::app::pipelines::verification_pipeline::{parse_numbers, VerificationPipeline};
