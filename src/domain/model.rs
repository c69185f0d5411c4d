use crate::domain::rejection::RejectedLine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three employee kinds, encoded by the first character of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeKind {
    Manager,
    Salesperson,
    Technician,
}

impl EmployeeKind {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(EmployeeKind::Manager),
            'C' => Some(EmployeeKind::Salesperson),
            'T' => Some(EmployeeKind::Technician),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            EmployeeKind::Manager => 'M',
            EmployeeKind::Salesperson => 'C',
            EmployeeKind::Technician => 'T',
        }
    }

    /// Exact number of fields a line of this kind must carry.
    pub fn field_count(self) -> usize {
        match self {
            EmployeeKind::Manager => 5,
            EmployeeKind::Salesperson | EmployeeKind::Technician => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmployeeKind::Manager => "manager",
            EmployeeKind::Salesperson => "salesperson",
            EmployeeKind::Technician => "technician",
        }
    }
}

impl fmt::Display for EmployeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields shared by every employee kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(flatten)]
    pub employee: Employee,
}

impl Manager {
    pub fn id(&self) -> &str {
        &self.employee.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salesperson {
    #[serde(flatten)]
    pub employee: Employee,
    pub annual_sales: f64,
    pub performance: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    #[serde(flatten)]
    pub employee: Employee,
    pub grade: u8,
    /// Identifier of the technician's manager; a lookup key, not an owned copy.
    pub manager_id: String,
}

/// One accepted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmployeeRecord {
    Manager(Manager),
    Salesperson(Salesperson),
    Technician(Technician),
}

impl EmployeeRecord {
    pub fn kind(&self) -> EmployeeKind {
        match self {
            EmployeeRecord::Manager(_) => EmployeeKind::Manager,
            EmployeeRecord::Salesperson(_) => EmployeeKind::Salesperson,
            EmployeeRecord::Technician(_) => EmployeeKind::Technician,
        }
    }

    pub fn employee(&self) -> &Employee {
        match self {
            EmployeeRecord::Manager(m) => &m.employee,
            EmployeeRecord::Salesperson(s) => &s.employee,
            EmployeeRecord::Technician(t) => &t.employee,
        }
    }

    pub fn id(&self) -> &str {
        &self.employee().id
    }
}

/// Result of one batch run: accepted records and rejected lines, each in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<EmployeeRecord>,
    pub rejections: Vec<RejectedLine>,
}

impl BatchOutcome {
    pub fn accepted_count(&self) -> usize {
        self.records.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejections.len()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manager() -> Manager {
        Manager {
            employee: Employee {
                id: "M12345".to_string(),
                last_name: "Doe".to_string(),
                first_name: "John".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
                salary: 3000.0,
            },
        }
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(EmployeeKind::from_code('M'), Some(EmployeeKind::Manager));
        assert_eq!(EmployeeKind::from_code('C'), Some(EmployeeKind::Salesperson));
        assert_eq!(EmployeeKind::from_code('T'), Some(EmployeeKind::Technician));
        assert_eq!(EmployeeKind::from_code('X'), None);
        assert_eq!(EmployeeKind::from_code('m'), None);

        for kind in [
            EmployeeKind::Manager,
            EmployeeKind::Salesperson,
            EmployeeKind::Technician,
        ] {
            assert_eq!(EmployeeKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let record = EmployeeRecord::Manager(sample_manager());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["kind"], "manager");
        assert_eq!(json["id"], "M12345");
        assert_eq!(json["hire_date"], "2015-01-01");
        assert_eq!(json["salary"], 3000.0);
    }

    #[test]
    fn test_technician_deserializes() {
        let json = r#"{
            "kind": "technician",
            "id": "T12345",
            "last_name": "Doe",
            "first_name": "Jane",
            "hire_date": "2015-01-01",
            "salary": 2000.0,
            "grade": 3,
            "manager_id": "M12345"
        }"#;

        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind(), EmployeeKind::Technician);
        assert_eq!(record.id(), "T12345");
        match record {
            EmployeeRecord::Technician(t) => {
                assert_eq!(t.grade, 3);
                assert_eq!(t.manager_id, "M12345");
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }
}
