use super::validate_batch_settings;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "staff-etl")]
#[command(about = "Validate an employee file and convert it into typed records")]
pub struct CliConfig {
    #[arg(long, short, default_value = "employes.csv")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "CSV file of managers already in the store")]
    pub managers: Option<String>,

    #[arg(long, value_delimiter = ',', default_values = ["json", "csv"])]
    pub formats: Vec<String>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Exit with a non-zero status when any line is rejected")]
    pub fail_on_rejections: bool,
}

impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn manager_store(&self) -> Option<&str> {
        self.managers.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_batch_settings(
            &self.input,
            &self.output_path,
            self.managers.as_deref(),
            &self.formats,
        )
    }
}
