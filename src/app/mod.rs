// Application wiring: builds storage, manager store and pipeline from a config.

use crate::adapters::manager_store::CsvManagerStore;
use crate::adapters::storage::LocalStorage;
use crate::core::etl::{EtlEngine, RunSummary};
use crate::core::pipeline::EmployeePipeline;
use crate::core::ConfigProvider;
use crate::utils::error::{ErrorSeverity, EtlError, Result};

/// Exit code used when the batch ran but some lines were rejected.
pub const EXIT_REJECTED_LINES: i32 = 4;

pub async fn run_batch<C: ConfigProvider>(config: C) -> Result<RunSummary> {
    let managers = match config.manager_store() {
        Some(path) => CsvManagerStore::from_path(path)?,
        None => {
            tracing::debug!("No manager store configured, only in-file managers will resolve");
            CsvManagerStore::default()
        }
    };

    // Paths in the config are used as given, relative to the working directory.
    let storage = LocalStorage::new(".");
    let pipeline = EmployeePipeline::new(storage, config, managers);

    EtlEngine::new(pipeline).run().await
}

/// Logs a failed run and returns the process exit code for it.
pub fn report_failure(e: &EtlError) -> i32 {
    tracing::error!(
        "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Prints the run summary and returns the exit code for a completed run.
pub fn report_success(summary: &RunSummary, fail_on_rejections: bool) -> i32 {
    tracing::info!("✅ Import completed");
    println!("✅ Import completed: {} accepted, {} rejected", summary.accepted, summary.rejected);
    println!("📁 Output saved to: {}", summary.output_path);

    if fail_on_rejections && summary.rejected > 0 {
        eprintln!("⚠️  {} lines were rejected, see rejections.csv", summary.rejected);
        return EXIT_REJECTED_LINES;
    }
    0
}
