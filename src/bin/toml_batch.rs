use clap::Parser;
use staff_etl::app::{report_failure, report_success, run_batch};
use staff_etl::config::toml_config::{LogFormat, TomlConfig};
use staff_etl::core::ConfigProvider;
use staff_etl::utils::{logger, validation::Validate};

#[derive(Parser)]
#[command(name = "toml-batch")]
#[command(about = "Employee import driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "batch.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override fail_on_rejections from config
    #[arg(long)]
    fail_on_rejections: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(verbose),
        LogFormat::Json => logger::init_json_logger(verbose),
    }

    tracing::info!("🚀 Starting TOML-based employee import");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Some(fail) = args.fail_on_rejections {
        config.load.fail_on_rejections = Some(fail);
        tracing::info!("🔧 fail_on_rejections overridden to: {}", fail);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        println!("✅ Dry run complete. Nothing was read or written.");
        return Ok(());
    }

    let fail_on_rejections = config.fail_on_rejections();

    let exit_code = match run_batch(config).await {
        Ok(summary) => report_success(&summary, fail_on_rejections),
        Err(e) => report_failure(&e),
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_file());
    println!(
        "  Manager store: {}",
        config.manager_store().unwrap_or("(none, in-file managers only)")
    );
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Fail on rejections: {}", config.fail_on_rejections());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
