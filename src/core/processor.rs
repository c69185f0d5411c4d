use crate::core::builders::{build_manager, build_salesperson, build_technician};
use crate::core::classifier::classify;
use crate::core::fields::{split_fields, validate_shared, MIN_SHARED_FIELDS};
use crate::domain::model::{EmployeeKind, EmployeeRecord};
use crate::domain::ports::ManagerLookup;
use crate::domain::rejection::{LineStage, RejectionReason};

/// Turns one raw line into a record or a rejection.
///
/// Stages run strictly in order (see [`LineStage`]) and the first failing
/// check ends the line. Exactly one builder runs per line, chosen by the
/// identifier's first character.
pub struct LineProcessor<'a, L: ManagerLookup + ?Sized> {
    managers: &'a L,
}

impl<'a, L: ManagerLookup + ?Sized> LineProcessor<'a, L> {
    pub fn new(managers: &'a L) -> Self {
        Self { managers }
    }

    pub fn process(&self, line: &str) -> Result<EmployeeRecord, RejectionReason> {
        let fields = split_fields(line);
        if fields.len() < MIN_SHARED_FIELDS {
            return Err(RejectionReason::InsufficientFields {
                expected: MIN_SHARED_FIELDS,
                found: fields.len(),
            });
        }

        // An empty identifier reports the line's first character, the separator.
        let kind = classify(fields[0]).ok_or_else(|| RejectionReason::UnrecognizedType {
            found: line.chars().next().map(String::from).unwrap_or_default(),
        })?;
        tracing::trace!(stage = ?LineStage::Classified, %kind);

        let employee = validate_shared(&fields)?;
        tracing::trace!(stage = ?LineStage::SharedValidated, id = %employee.id);

        let record = match kind {
            EmployeeKind::Manager => EmployeeRecord::Manager(build_manager(employee, &fields)?),
            EmployeeKind::Salesperson => {
                EmployeeRecord::Salesperson(build_salesperson(employee, &fields)?)
            }
            EmployeeKind::Technician => {
                EmployeeRecord::Technician(build_technician(employee, &fields, self.managers)?)
            }
        };
        tracing::trace!(stage = ?LineStage::KindValidated, %kind);
        tracing::trace!(stage = ?LineStage::Built, id = record.id());

        Ok(record)
    }
}
