use crate::domain::model::Employee;
use crate::domain::rejection::RejectionReason;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Every line needs at least this many fields before kind dispatch.
pub const MIN_SHARED_FIELDS: usize = 5;

pub const IDENTIFIER_PATTERN: &str = "^[MTC][0-9]{5}$";
pub const MANAGER_ID_PATTERN: &str = "^M[0-9]{5}$";

/// Display form of [`HIRE_DATE_FORMAT`].
pub const HIRE_DATE_DISPLAY: &str = "dd/MM/yyyy";
const HIRE_DATE_FORMAT: &str = "%d/%m/%Y";

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern compiles"));
static MANAGER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MANAGER_ID_PATTERN).expect("manager id pattern compiles"));

/// Splits a raw line on commas.
///
/// Trailing empty fields are dropped, so `a,b,,` yields two fields. Interior
/// empty fields are kept and nothing is trimmed.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER_RE.is_match(value)
}

pub fn is_manager_id(value: &str) -> bool {
    MANAGER_ID_RE.is_match(value)
}

pub fn parse_hire_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, HIRE_DATE_FORMAT).ok()
}

pub fn format_hire_date(date: NaiveDate) -> String {
    date.format(HIRE_DATE_FORMAT).to_string()
}

/// Finite decimal. Sign is not checked.
///
/// Leading and trailing spaces or control characters are ignored, so
/// `" 3000"` parses; callers keep the raw text for rejection messages.
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim_matches(|c: char| c <= ' ')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Integers are strict: no surrounding whitespace.
pub fn parse_integer(value: &str) -> Option<i32> {
    value.parse::<i32>().ok()
}

/// Checks the fields every kind shares and returns them parsed.
///
/// Checks run in order and stop at the first failure: field count,
/// identifier pattern, hire date, salary. The caller has already classified
/// the identifier's first character.
pub fn validate_shared(fields: &[&str]) -> Result<Employee, RejectionReason> {
    if fields.len() < MIN_SHARED_FIELDS {
        return Err(RejectionReason::InsufficientFields {
            expected: MIN_SHARED_FIELDS,
            found: fields.len(),
        });
    }

    let id = fields[0];
    if !is_identifier(id) {
        return Err(RejectionReason::MalformedIdentifier {
            value: id.to_string(),
            pattern: IDENTIFIER_PATTERN,
        });
    }

    let hire_date = parse_hire_date(fields[3]).ok_or_else(|| RejectionReason::MalformedDate {
        value: fields[3].to_string(),
        format: HIRE_DATE_DISPLAY,
    })?;

    let salary = parse_decimal(fields[4]).ok_or_else(|| RejectionReason::MalformedSalary {
        value: fields[4].to_string(),
    })?;

    Ok(Employee {
        id: id.to_string(),
        last_name: fields[1].to_string(),
        first_name: fields[2].to_string(),
        hire_date,
        salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_drops_trailing_empties() {
        assert_eq!(split_fields("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_fields("a,b,,"), vec!["a", "b"]);
        assert_eq!(split_fields("a,,c"), vec!["a", "", "c"]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_identifier_patterns() {
        assert!(is_identifier("M12345"));
        assert!(is_identifier("C00001"));
        assert!(!is_identifier("M1234"));
        assert!(!is_identifier("M123456"));
        assert!(!is_identifier("M1234a"));
        assert!(!is_identifier("X12345"));

        assert!(is_manager_id("M12345"));
        assert!(!is_manager_id("T12345"));
    }

    #[test]
    fn test_hire_date_round_trip() {
        let date = parse_hire_date("01/01/2015").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(format_hire_date(date), "01/01/2015");

        let leap = parse_hire_date("29/02/2016").unwrap();
        assert_eq!(format_hire_date(leap), "29/02/2016");
    }

    #[test]
    fn test_hire_date_rejects_bad_values() {
        assert!(parse_hire_date("2015-01-01").is_none());
        assert!(parse_hire_date("31/02/2015").is_none());
        assert!(parse_hire_date("01/13/2015").is_none());
        assert!(parse_hire_date("").is_none());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("3000"), Some(3000.0));
        assert_eq!(parse_decimal("1480.27"), Some(1480.27));
        assert_eq!(parse_decimal("-12.5"), Some(-12.5));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_parse_decimal_ignores_padding() {
        assert_eq!(parse_decimal(" 3000"), Some(3000.0));
        assert_eq!(parse_decimal("10000.5 "), Some(10000.5));
        assert_eq!(parse_decimal("\t42.5\t"), Some(42.5));
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("30 00"), None);
    }

    #[test]
    fn test_parse_integer_is_strict() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer(" 3"), None);
        assert_eq!(parse_integer("3 "), None);
    }

    #[test]
    fn test_validate_shared_padded_salary() {
        let fields = split_fields("M12345,Doe,John,01/01/2015, 3000");
        assert_eq!(validate_shared(&fields).unwrap().salary, 3000.0);

        let fields = split_fields("M12345,Doe,John,01/01/2015, 3 000");
        assert_eq!(
            validate_shared(&fields),
            Err(RejectionReason::MalformedSalary {
                value: " 3 000".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_shared_success() {
        let fields = split_fields("M12345,Doe,John,01/01/2015,3000");
        let employee = validate_shared(&fields).unwrap();

        assert_eq!(employee.id, "M12345");
        assert_eq!(employee.last_name, "Doe");
        assert_eq!(employee.first_name, "John");
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(employee.salary, 3000.0);
    }

    #[test]
    fn test_validate_shared_order() {
        // Bad identifier wins over bad date and salary.
        let fields = split_fields("M1234,Doe,John,2015,abc");
        assert!(matches!(
            validate_shared(&fields),
            Err(RejectionReason::MalformedIdentifier { .. })
        ));

        let fields = split_fields("M12345,Doe,John,2015,abc");
        assert_eq!(
            validate_shared(&fields),
            Err(RejectionReason::MalformedDate {
                value: "2015".to_string(),
                format: HIRE_DATE_DISPLAY,
            })
        );

        let fields = split_fields("M12345,Doe,John,01/01/2015,abc");
        assert_eq!(
            validate_shared(&fields),
            Err(RejectionReason::MalformedSalary {
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_validate_shared_insufficient_fields() {
        let fields = split_fields("M12345,Doe,John,01/01/2015");
        assert_eq!(
            validate_shared(&fields),
            Err(RejectionReason::InsufficientFields {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_negative_salary_is_accepted() {
        let fields = split_fields("M12345,Doe,John,01/01/2015,-100");
        assert_eq!(validate_shared(&fields).unwrap().salary, -100.0);
    }
}
