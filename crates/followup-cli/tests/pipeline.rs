//! Ingest, process and output against a study folder on disk.

use std::fs;

use followup_cli::pipeline::{OutputConfig, ingest, output, process};
use followup_model::{Endpoint, ProcessingOptions};
use followup_report::{OUTCOME_COLUMNS, OutputFormat};
use tempfile::TempDir;

fn study_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("患者基本信息.csv"),
        "subjid,stsex,sys_currentage,groupname,groupdate\n\
         1001,1,64,PCI,2020-01-01\n\
         1002,2,58,CABG,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("第6个月随访.csv"),
        "subjid,随访日期1,如有不良事件，何事件1\n\
         1001,2020-07-05,5\n\
         1002,2020-07-10,\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.csv"), "subjid,comment\n1001,call back\n").unwrap();
    dir
}

#[test]
fn writes_outcomes_and_survival_dataset() {
    let folder = study_folder();
    let out = TempDir::new().unwrap();

    let load = ingest(folder.path()).unwrap();
    assert_eq!(load.tables.len(), 3);
    assert!(load.failures.is_empty());

    let options = ProcessingOptions::new()
        .with_endpoint(Endpoint::Mace)
        .with_parallel(false);
    let outcome = process(&load, &options);
    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.report.is_consistent());
    insta::assert_json_snapshot!(outcome.report, @r#"
    {
      "total_subjects": 2,
      "succeeded": 1,
      "skipped": [
        {
          "subject_id": "1002",
          "reason": "subject 1002 has no enrollment date"
        }
      ],
      "dropped_tables": [
        {
          "label": "notes",
          "reason": "no follow-up month in label"
        }
      ]
    }
    "#);

    let config = OutputConfig {
        output_dir: out.path().join("results"),
        group: "pci".to_string(),
        format: OutputFormat::Both,
        survival_dataset: true,
    };
    let written = output(&outcome.records, Endpoint::Mace, &config).unwrap();
    assert!(written.warnings.is_empty());
    assert_eq!(written.paths().count(), 3);

    let csv_path = written.outcomes_csv.as_ref().unwrap();
    assert!(csv_path.ends_with("followup_outcomes_pci_mace.csv"));
    let content = fs::read_to_string(csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), OUTCOME_COLUMNS.join(","));
    assert!(lines.next().unwrap().starts_with("1001,"));
    assert!(lines.next().is_none());

    let survival = fs::read_to_string(written.survival_csv.as_ref().unwrap()).unwrap();
    assert_eq!(survival.lines().count(), 2);
}

#[test]
fn csv_only_without_survival_dataset() {
    let folder = study_folder();
    let out = TempDir::new().unwrap();

    let load = ingest(folder.path()).unwrap();
    let options = ProcessingOptions::new();
    assert_eq!(options.endpoint, Endpoint::Death);
    let outcome = process(&load, &options);
    let config = OutputConfig {
        output_dir: out.path().to_path_buf(),
        group: "patients".to_string(),
        format: OutputFormat::Csv,
        survival_dataset: false,
    };
    let written = output(&outcome.records, options.endpoint, &config).unwrap();

    assert_eq!(
        written.outcomes_csv.as_deref(),
        Some(out.path().join("followup_outcomes_patients_death.csv").as_path())
    );
    assert!(written.outcomes_json.is_none());
    assert!(written.survival_csv.is_none());
    assert!(!out.path().join("survival_patients_death.csv").exists());
}

#[test]
fn missing_folder_is_an_error() {
    let dir = TempDir::new().unwrap();
    let error = ingest(&dir.path().join("absent")).unwrap_err();
    assert!(format!("{error:#}").contains("load tables from"));
}
