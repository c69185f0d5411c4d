use anyhow::Result;
use chrono::NaiveDate;
use staff_etl::{
    run_batch, BatchRunner, EmployeeKind, EmployeeRecord, EtlError, InMemoryManagerStore,
    NumericField, RejectionReason, TomlConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn batch_config(dir: &Path, managers_file: Option<&Path>, formats: &str) -> Result<TomlConfig> {
    let base = dir.to_str().unwrap().replace('\\', "/");
    let store = match managers_file {
        Some(path) => format!(
            "[store]\nmanagers_file = '{}'\n",
            path.to_str().unwrap().replace('\\', "/")
        ),
        None => String::new(),
    };

    let content = format!(
        r#"
[batch]
name = "integration"

[source]
path = '{base}/employes.csv'

{store}
[load]
output_path = '{base}/output'
output_formats = {formats}
"#
    );
    Ok(TomlConfig::from_toml_str(&content)?)
}

fn read_rejection_lines(dir: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(dir.join("output/rejections.csv"))?;
    Ok(data.lines().skip(1).map(str::to_string).collect())
}

#[tokio::test]
async fn test_full_batch_writes_all_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = "M12345,Doe,John,01/01/2015,3000\n\
                 T12345,Doe,Jane,01/01/2015,2000,3,M12345\n\
                 T12346,Doe,Jane,01/01/2015,2000,6,M12345\n\
                 T12347,Doe,Jane,01/01/2015,2000,3,M99999\n\
                 X12345,Doe,Jane,01/01/2015,2000\n\
                 C12345,Doe,Jane,01/01/2015,2000,10000.5,abc\n\
                 C12346,Roe,Ann,15/06/2019,2500,10000.5,4\n";
    fs::write(temp_dir.path().join("employes.csv"), input)?;

    let config = batch_config(temp_dir.path(), None, r#"["json", "csv"]"#)?;
    let summary = run_batch(config).await?;

    assert_eq!(summary.accepted, 3);
    assert_eq!(summary.rejected, 4);
    assert!(summary.output_path.ends_with("output"));

    let json = fs::read(temp_dir.path().join("output/employees.json"))?;
    let records: Vec<EmployeeRecord> = serde_json::from_slice(&json)?;
    let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["M12345", "T12345", "C12346"]);

    match &records[0] {
        EmployeeRecord::Manager(m) => {
            assert_eq!(m.employee.last_name, "Doe");
            assert_eq!(m.employee.first_name, "John");
            assert_eq!(
                m.employee.hire_date,
                NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
            );
            assert_eq!(m.employee.salary, 3000.0);
        }
        other => panic!("expected manager, got {:?}", other),
    }
    match &records[1] {
        EmployeeRecord::Technician(t) => {
            assert_eq!(t.grade, 3);
            assert_eq!(t.manager_id, "M12345");
        }
        other => panic!("expected technician, got {:?}", other),
    }

    let rejections = read_rejection_lines(temp_dir.path())?;
    assert_eq!(rejections.len(), 4);
    assert!(rejections[0].starts_with("3,grade_out_of_range,grade must be between 1 and 5: 6,"));
    assert!(rejections[1].starts_with("4,manager_not_found,"));
    assert!(rejections[1].contains("M99999"));
    assert!(rejections[2].starts_with("5,unrecognized_type,"));
    assert!(rejections[3].starts_with("6,malformed_numeric_field,"));
    assert!(rejections[3].contains("abc"));

    let managers = fs::read_to_string(temp_dir.path().join("output/managers.csv"))?;
    assert_eq!(managers.lines().count(), 2);
    assert!(temp_dir.path().join("output/employees.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_manager_store_resolves_technician() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store_path = temp_dir.path().join("managers.csv");
    fs::write(
        &store_path,
        "id,last_name,first_name,hire_date,salary\nM99999,Martin,Paul,2012-03-15,4200\n",
    )?;
    fs::write(
        temp_dir.path().join("employes.csv"),
        "T12347,Doe,Jane,01/01/2015,2000,3,M99999\n",
    )?;

    let config = batch_config(temp_dir.path(), Some(&store_path), r#"["json"]"#)?;
    let summary = run_batch(config).await?;

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.rejected, 0);
    assert!(read_rejection_lines(temp_dir.path())?.is_empty());
    assert!(!temp_dir.path().join("output/employees.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_managers_output_seeds_next_run() -> Result<()> {
    let first_dir = TempDir::new()?;
    fs::write(
        first_dir.path().join("employes.csv"),
        "M12345,Doe,John,01/01/2015,3000\n",
    )?;
    run_batch(batch_config(first_dir.path(), None, r#"["csv"]"#)?).await?;

    let second_dir = TempDir::new()?;
    fs::write(
        second_dir.path().join("employes.csv"),
        "T12345,Doe,Jane,01/01/2015,2000,3,M12345\n",
    )?;
    let store_path = first_dir.path().join("output/managers.csv");
    let summary =
        run_batch(batch_config(second_dir.path(), Some(&store_path), r#"["csv"]"#)?).await?;

    assert_eq!(summary.accepted, 1);
    Ok(())
}

#[tokio::test]
async fn test_bom_and_crlf_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("employes.csv"),
        "\u{feff}M12345,Doe,John,01/01/2015,3000\r\nC12345,Doe,Jane,01/01/2015,2000,10000.5,4\r\n",
    )?;

    let summary = run_batch(batch_config(temp_dir.path(), None, r#"["json"]"#)?).await?;

    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.rejected, 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let result = run_batch(batch_config(temp_dir.path(), None, r#"["json"]"#)?).await;

    assert!(matches!(result, Err(EtlError::IoError(_))));
    Ok(())
}

#[tokio::test]
async fn test_invalid_utf8_input_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("employes.csv"), [0x4d, 0xff, 0xfe, 0x0a])?;

    let result = run_batch(batch_config(temp_dir.path(), None, r#"["json"]"#)?).await;

    assert!(matches!(result, Err(EtlError::EncodingError { .. })));
    Ok(())
}

#[test]
fn test_batch_order_and_reasons() {
    let store = InMemoryManagerStore::new();
    let outcome = BatchRunner::new(&store).run([
        "C12345,Doe,Jane,01/01/2015,2000,10000.5,abc",
        "M12345,Doe,John,01/01/2015,3000",
        "X12345,Doe,Jane,01/01/2015,2000",
        "C00001,Doe,Jane,01/01/2015,2000,10.5,2",
    ]);

    let kinds: Vec<EmployeeKind> = outcome.records.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec![EmployeeKind::Manager, EmployeeKind::Salesperson]);
    assert_eq!(
        outcome.rejections[0].reason,
        RejectionReason::MalformedNumericField {
            field: NumericField::PerformanceRating,
            value: "abc".to_string(),
        }
    );
    assert_eq!(
        outcome.rejections[1].reason,
        RejectionReason::UnrecognizedType {
            found: "X".to_string()
        }
    );
}
