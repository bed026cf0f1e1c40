pub mod verification_pipeline;
