use crate::core::pairs::MembershipStrategy;
use crate::core::primes::GenerationStrategy;
use crate::core::report::OutputFormat;
use crate::domain::model::VerificationReport;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// 直接指定的數字，優先於輸入檔
    fn numbers(&self) -> &[i64];
    fn input_path(&self) -> Option<&str>;
    fn fallback_numbers(&self) -> &[i64];
    fn generation_strategy(&self) -> GenerationStrategy;
    fn channel_capacity(&self) -> usize;
    fn membership_strategy(&self) -> MembershipStrategy;
    fn output_format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<i64>>;
    async fn transform(&self, values: Vec<i64>) -> Result<VerificationReport>;
    async fn load(&self, report: VerificationReport) -> Result<String>;
}
