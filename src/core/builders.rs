use crate::core::fields::{is_manager_id, parse_decimal, parse_integer, MANAGER_ID_PATTERN};
use crate::domain::model::{Employee, EmployeeKind, Manager, Salesperson, Technician};
use crate::domain::ports::ManagerLookup;
use crate::domain::rejection::{NumericField, RejectionReason};

pub const MIN_GRADE: i32 = 1;
pub const MAX_GRADE: i32 = 5;

fn expect_field_count(kind: EmployeeKind, fields: &[&str]) -> Result<(), RejectionReason> {
    if fields.len() != kind.field_count() {
        return Err(RejectionReason::FieldCountMismatch {
            kind,
            expected: kind.field_count(),
            actual: fields.len(),
        });
    }
    Ok(())
}

pub fn build_manager(employee: Employee, fields: &[&str]) -> Result<Manager, RejectionReason> {
    expect_field_count(EmployeeKind::Manager, fields)?;
    Ok(Manager { employee })
}

pub fn build_salesperson(
    employee: Employee,
    fields: &[&str],
) -> Result<Salesperson, RejectionReason> {
    expect_field_count(EmployeeKind::Salesperson, fields)?;

    let annual_sales =
        parse_decimal(fields[5]).ok_or_else(|| RejectionReason::MalformedNumericField {
            field: NumericField::SalesFigure,
            value: fields[5].to_string(),
        })?;

    let performance =
        parse_integer(fields[6]).ok_or_else(|| RejectionReason::MalformedNumericField {
            field: NumericField::PerformanceRating,
            value: fields[6].to_string(),
        })?;

    Ok(Salesperson {
        employee,
        annual_sales,
        performance,
    })
}

/// Builds a technician once its manager resolves through `managers`.
///
/// A failing lookup counts as "not found"; it is logged and not retried.
pub fn build_technician<L: ManagerLookup + ?Sized>(
    employee: Employee,
    fields: &[&str],
    managers: &L,
) -> Result<Technician, RejectionReason> {
    expect_field_count(EmployeeKind::Technician, fields)?;

    let manager_id = fields[6];
    if !is_manager_id(manager_id) {
        return Err(RejectionReason::MalformedManagerReference {
            value: manager_id.to_string(),
            pattern: MANAGER_ID_PATTERN,
        });
    }

    let grade = parse_integer(fields[5]).ok_or_else(|| RejectionReason::MalformedNumericField {
        field: NumericField::Grade,
        value: fields[5].to_string(),
    })?;
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(RejectionReason::GradeOutOfRange {
            value: grade,
            min: MIN_GRADE,
            max: MAX_GRADE,
        });
    }

    let found = match managers.find_manager(manager_id) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(manager_id, error = %e, "Manager lookup failed, treating as not found");
            None
        }
    };
    if found.is_none() {
        return Err(RejectionReason::ManagerNotFound {
            manager_id: manager_id.to_string(),
        });
    }

    Ok(Technician {
        employee,
        // Range checked above.
        grade: grade as u8,
        manager_id: manager_id.to_string(),
    })
}
