use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct GoldbachEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> GoldbachEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting Goldbach verification...");
        self.monitor.log_stats("Start");

        // Extract
        let values = self.pipeline.extract().await?;
        tracing::info!("Read {} target values", values.len());
        self.monitor.log_stats("Extract");

        // Transform
        let report = self.pipeline.transform(values).await?;
        tracing::info!(
            "Checked {} targets against {} primes up to {}, {} pair(s) found",
            report.decompositions.len(),
            report.prime_count,
            report.bound,
            report.total_pairs()
        );
        if !report.holds() {
            tracing::warn!(
                "⚠️ No Goldbach pair found for: {:?}",
                report.counterexamples
            );
        }
        self.monitor.log_stats("Transform");

        // Load
        let output = self.pipeline.load(report).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output)
    }
}
