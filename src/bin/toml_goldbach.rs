use anyhow::Context;
use clap::Parser;
use goldbach_verifier::core::{ConfigProvider, Pipeline};
use goldbach_verifier::utils::{logger, validation::Validate};
use goldbach_verifier::{
    GoldbachEngine, LocalStorage, OutputFormat, TomlConfig, VerificationPipeline,
};

#[derive(Parser)]
#[command(name = "toml-goldbach")]
#[command(about = "Goldbach verification driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "goldbach.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override output format from config
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Dry run - show the inputs and bound without searching for pairs
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init_logger(args.verbose, config.json_logs());

    tracing::info!("🚀 Starting TOML-based Goldbach verification");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 命令列覆蓋設定
    if let Some(format) = args.format {
        config.output.format = format;
        tracing::info!("🔧 Output format overridden to: {:?}", format);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = VerificationPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no pairs will be searched");
        perform_dry_run(&pipeline).await?;
        return Ok(());
    }

    let engine = GoldbachEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(report) => print!("{}", report),
        Err(e) => {
            tracing::error!(
                "❌ Verification failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration summary:");
    tracing::info!("   Name: {}", config.verification.name);
    if let Some(description) = &config.verification.description {
        tracing::info!("   Description: {}", description);
    }
    if !config.numbers().is_empty() {
        tracing::info!("   Numbers: {:?}", config.numbers());
    } else if let Some(path) = config.input_path() {
        tracing::info!("   Input file: {}", path);
    }
    tracing::info!("   Generator: {:?}", config.generation_strategy());
    tracing::info!("   Membership: {:?}", config.membership_strategy());
    tracing::info!("   Format: {:?}", config.output_format());
    if let Some(path) = config.output_path() {
        tracing::info!("   Output directory: {}", path);
    }
}

async fn perform_dry_run(
    pipeline: &VerificationPipeline<LocalStorage, TomlConfig>,
) -> anyhow::Result<()> {
    let values = pipeline.extract().await?;
    let bound = goldbach_verifier::utils::validation::bound_for(&values);

    println!("Targets: {:?}", values);
    println!("Primes would be generated up to {}", bound);
    Ok(())
}
