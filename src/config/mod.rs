#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::pipeline::SUPPORTED_FORMATS;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_output_formats, validate_path};

const INPUT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Checks shared by every configuration source.
pub(crate) fn validate_batch_settings(
    input_file: &str,
    output_path: &str,
    manager_store: Option<&str>,
    output_formats: &[String],
) -> Result<()> {
    validate_path("input", input_file)?;
    validate_file_extension("input", input_file, &INPUT_EXTENSIONS)?;
    validate_path("output_path", output_path)?;
    if let Some(store) = manager_store {
        validate_path("managers", store)?;
        validate_file_extension("managers", store, &INPUT_EXTENSIONS)?;
    }
    validate_output_formats("formats", output_formats, &SUPPORTED_FORMATS)?;
    Ok(())
}
