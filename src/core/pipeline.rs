use crate::adapters::manager_store::managers_to_csv;
use crate::core::batch::BatchRunner;
use crate::core::{BatchOutcome, ConfigProvider, ManagerLookup, Pipeline, Storage};
use crate::domain::model::EmployeeRecord;
use crate::domain::rejection::RejectedLine;
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

pub const EMPLOYEES_JSON: &str = "employees.json";
pub const EMPLOYEES_CSV: &str = "employees.csv";
pub const MANAGERS_CSV: &str = "managers.csv";
pub const REJECTIONS_CSV: &str = "rejections.csv";

pub const SUPPORTED_FORMATS: [&str; 2] = ["json", "csv"];

/// Reads an employee file, validates it line by line and writes the results.
pub struct EmployeePipeline<S: Storage, C: ConfigProvider, L: ManagerLookup + Send + Sync> {
    storage: S,
    config: C,
    managers: L,
}

impl<S: Storage, C: ConfigProvider, L: ManagerLookup + Send + Sync> EmployeePipeline<S, C, L> {
    pub fn new(storage: S, config: C, managers: L) -> Self {
        Self {
            storage,
            config,
            managers,
        }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

/// Decodes input bytes as UTF-8, dropping a leading byte order mark.
pub fn decode_input(path: &str, bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|source| EtlError::EncodingError {
        path: path.to_string(),
        source,
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

#[derive(Debug, Serialize)]
struct EmployeeRow<'a> {
    kind: &'static str,
    id: &'a str,
    last_name: &'a str,
    first_name: &'a str,
    hire_date: NaiveDate,
    salary: f64,
    sales: Option<f64>,
    performance: Option<i32>,
    grade: Option<u8>,
    manager_id: Option<&'a str>,
}

impl<'a> From<&'a EmployeeRecord> for EmployeeRow<'a> {
    fn from(record: &'a EmployeeRecord) -> Self {
        let e = record.employee();
        let mut row = EmployeeRow {
            kind: record.kind().label(),
            id: &e.id,
            last_name: &e.last_name,
            first_name: &e.first_name,
            hire_date: e.hire_date,
            salary: e.salary,
            sales: None,
            performance: None,
            grade: None,
            manager_id: None,
        };
        match record {
            EmployeeRecord::Manager(_) => {}
            EmployeeRecord::Salesperson(s) => {
                row.sales = Some(s.annual_sales);
                row.performance = Some(s.performance);
            }
            EmployeeRecord::Technician(t) => {
                row.grade = Some(t.grade);
                row.manager_id = Some(&t.manager_id);
            }
        }
        row
    }
}

#[derive(Debug, Serialize)]
struct RejectionRow<'a> {
    line: usize,
    code: &'static str,
    reason: String,
    raw: &'a str,
}

pub fn render_records_json(records: &[EmployeeRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

pub fn render_records_csv(records: &[EmployeeRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(EmployeeRow::from(record))?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

pub fn render_rejections_csv(rejections: &[RejectedLine]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    // Header is written even when nothing was rejected.
    writer.write_record(["line", "code", "reason", "raw"])?;
    for rejected in rejections {
        writer.serialize(RejectionRow {
            line: rejected.line_number,
            code: rejected.reason.code(),
            reason: rejected.reason.to_string(),
            raw: &rejected.raw,
        })?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, L: ManagerLookup + Send + Sync> Pipeline
    for EmployeePipeline<S, C, L>
{
    async fn extract(&self) -> Result<Vec<String>> {
        let path = self.config.input_file();
        tracing::debug!("Reading employee file: {}", path);

        let bytes = self.storage.read_file(path).await?;
        let text = decode_input(path, bytes)?;

        Ok(text.lines().map(str::to_string).collect())
    }

    async fn transform(&self, lines: Vec<String>) -> Result<BatchOutcome> {
        Ok(BatchRunner::new(&self.managers).run(&lines))
    }

    async fn load(&self, outcome: &BatchOutcome) -> Result<String> {
        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => {
                    let data = render_records_json(&outcome.records)?;
                    self.storage
                        .write_file(&self.output_file(EMPLOYEES_JSON), &data)
                        .await?;
                }
                "csv" => {
                    let data = render_records_csv(&outcome.records)?;
                    self.storage
                        .write_file(&self.output_file(EMPLOYEES_CSV), &data)
                        .await?;

                    let managers = outcome.records.iter().filter_map(|r| match r {
                        EmployeeRecord::Manager(m) => Some(m),
                        _ => None,
                    });
                    let data = managers_to_csv(managers)?;
                    self.storage
                        .write_file(&self.output_file(MANAGERS_CSV), &data)
                        .await?;
                }
                other => {
                    tracing::warn!("Skipping unsupported output format: {}", other);
                }
            }
        }

        let data = render_rejections_csv(&outcome.rejections)?;
        self.storage
            .write_file(&self.output_file(REJECTIONS_CSV), &data)
            .await?;

        tracing::debug!("Outputs written to {}", self.config.output_path());
        Ok(self.config.output_path().to_string())
    }
}
