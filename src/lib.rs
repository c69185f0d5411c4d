pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::manager_store::{CsvManagerStore, InMemoryManagerStore};
pub use adapters::storage::LocalStorage;
pub use app::run_batch;
pub use core::{
    batch::BatchRunner,
    etl::{EtlEngine, RunSummary},
    pipeline::EmployeePipeline,
    processor::LineProcessor,
};
pub use domain::model::{
    BatchOutcome, Employee, EmployeeKind, EmployeeRecord, Manager, Salesperson, Technician,
};
pub use domain::ports::ManagerLookup;
pub use domain::rejection::{LineStage, NumericField, RejectedLine, RejectionReason};
pub use utils::error::{EtlError, Result};
