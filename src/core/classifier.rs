use crate::domain::model::EmployeeKind;

/// Kind named by the first character of an identifier field.
///
/// Returns `None` for an empty field or any leading character other than
/// `M`, `C` or `T`; the rest of the field is not inspected here.
pub fn classify(identifier: &str) -> Option<EmployeeKind> {
    identifier.chars().next().and_then(EmployeeKind::from_code)
}
