use clap::Parser;
use staff_etl::app::{report_failure, report_success, run_batch};
use staff_etl::utils::{logger, validation::Validate};
use staff_etl::CliConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting staff-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let fail_on_rejections = config.fail_on_rejections;

    let exit_code = match run_batch(config).await {
        Ok(summary) => report_success(&summary, fail_on_rejections),
        Err(e) => report_failure(&e),
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
