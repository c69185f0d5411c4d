use crate::domain::model::EmployeeKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind-specific numeric fields that can fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    SalesFigure,
    PerformanceRating,
    Grade,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumericField::SalesFigure => "salesperson's sales figure",
            NumericField::PerformanceRating => "salesperson's performance rating",
            NumericField::Grade => "technician's grade",
        })
    }
}

/// How far a line got before it was rejected.
///
/// A line moves strictly forward through these stages; a rejection is
/// reported against the last stage the line completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStage {
    Start,
    Classified,
    SharedValidated,
    KindValidated,
    Built,
}

/// Why a line was not turned into a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectionReason {
    #[error("insufficient fields: expected at least {expected} but found {found}")]
    InsufficientFields { expected: usize, found: usize },

    #[error("unrecognized employee type: {found}")]
    UnrecognizedType { found: String },

    #[error("the string {value} does not match the regular expression {pattern}")]
    MalformedIdentifier { value: String, pattern: &'static str },

    #[error("the string {value} does not match the regular expression {pattern}")]
    MalformedManagerReference { value: String, pattern: &'static str },

    #[error("{value} does not match the date format {format}")]
    MalformedDate { value: String, format: &'static str },

    #[error("{value} is not a valid number for a salary")]
    MalformedSalary { value: String },

    #[error("the {kind} line does not contain {expected} fields but {actual}")]
    FieldCountMismatch {
        kind: EmployeeKind,
        expected: usize,
        actual: usize,
    },

    #[error("the {field} is incorrect: {value}")]
    MalformedNumericField { field: NumericField, value: String },

    #[error("grade must be between {min} and {max}: {value}")]
    GradeOutOfRange { value: i32, min: i32, max: i32 },

    #[error("manager with identifier {manager_id} was not found in file or store")]
    ManagerNotFound { manager_id: String },
}

impl RejectionReason {
    /// Last stage the line completed before this rejection.
    pub fn stage(&self) -> LineStage {
        match self {
            RejectionReason::InsufficientFields { .. } | RejectionReason::UnrecognizedType { .. } => {
                LineStage::Start
            }
            RejectionReason::MalformedIdentifier { .. }
            | RejectionReason::MalformedDate { .. }
            | RejectionReason::MalformedSalary { .. } => LineStage::Classified,
            RejectionReason::FieldCountMismatch { .. }
            | RejectionReason::MalformedManagerReference { .. }
            | RejectionReason::MalformedNumericField { .. }
            | RejectionReason::GradeOutOfRange { .. } => LineStage::SharedValidated,
            RejectionReason::ManagerNotFound { .. } => LineStage::KindValidated,
        }
    }

    /// Short machine-friendly code, used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::InsufficientFields { .. } => "insufficient_fields",
            RejectionReason::UnrecognizedType { .. } => "unrecognized_type",
            RejectionReason::MalformedIdentifier { .. } => "malformed_identifier",
            RejectionReason::MalformedManagerReference { .. } => "malformed_manager_reference",
            RejectionReason::MalformedDate { .. } => "malformed_date",
            RejectionReason::MalformedSalary { .. } => "malformed_salary",
            RejectionReason::FieldCountMismatch { .. } => "field_count_mismatch",
            RejectionReason::MalformedNumericField { .. } => "malformed_numeric_field",
            RejectionReason::GradeOutOfRange { .. } => "grade_out_of_range",
            RejectionReason::ManagerNotFound { .. } => "manager_not_found",
        }
    }
}

/// A line that failed validation. Reported, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based position in the input.
    pub line_number: usize,
    pub raw: String,
    pub reason: RejectionReason,
}

impl fmt::Display for RejectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} : {} => {}", self.line_number, self.reason, self.raw)
    }
}
