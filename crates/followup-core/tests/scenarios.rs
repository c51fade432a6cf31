//! End-to-end runs over small in-memory table sets.

use chrono::{NaiveDate, NaiveDateTime};

use followup_core::{assemble_cohort, category_breakdown, process_tables, summarize_endpoints};
use followup_model::{
    CellValue, Endpoint, EventCategory, FollowupStatus, OutcomeRecord, ProcedureKind,
    ProcessingOptions, SourceRow, SourceTable, TableSet,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stamp() -> NaiveDateTime {
    date(2024, 3, 1).and_hms_opt(9, 30, 0).unwrap()
}

fn table(label: &str, rows: Vec<SourceRow>) -> SourceTable {
    SourceTable::new(label, Vec::new()).with_rows(rows)
}

fn baseline(rows: &[(i64, &str)]) -> SourceTable {
    table(
        "患者基本信息",
        rows.iter()
            .map(|(id, enrollment)| {
                SourceRow::from_pairs([
                    ("subjid", CellValue::Integer(*id)),
                    ("stsex", CellValue::Integer(1)),
                    ("sys_currentage", CellValue::Float(64.0)),
                    ("groupname", CellValue::text("PCI")),
                    ("groupdate", CellValue::text(*enrollment)),
                ])
            })
            .collect(),
    )
}

fn visit(id: i64, visit_date: &str, extra: &[(&str, CellValue)]) -> SourceRow {
    let mut cells = vec![
        ("subjid".to_string(), CellValue::Integer(id)),
        ("随访日期1".to_string(), CellValue::text(visit_date)),
    ];
    cells.extend(
        extra
            .iter()
            .map(|(column, value)| (column.to_string(), value.clone())),
    );
    SourceRow::new(cells)
}

fn scenario_a() -> TableSet {
    TableSet::new(vec![
        baseline(&[(1001, "2020-01-01")]),
        table(
            "第6个月随访",
            vec![visit(
                1001,
                "2020-07-05",
                &[("如有不良事件，何事件1", CellValue::text("5"))],
            )],
        ),
        table("第12个月随访", vec![visit(1001, "2021-01-02", &[])]),
    ])
}

#[test]
fn scenario_a_angina_at_month_six() {
    let options = ProcessingOptions::new().with_endpoint(Endpoint::Angina);
    let outcome = process_tables(&scenario_a(), &options, stamp());
    assert_eq!(outcome.records.len(), 1);

    let record = &outcome.records[0];
    assert_eq!(record.subject_id, "1001");
    assert!(record.endpoint.event_occurred);
    assert_eq!(record.endpoint.survival_time_days, 186);
    assert_eq!(record.endpoint.endpoint_event(), "angina");
    assert_eq!(record.endpoint.endpoint_date, Some(date(2020, 7, 5)));

    let angina = record.occurrences.get(EventCategory::Angina).unwrap();
    assert_eq!(angina.date, date(2020, 7, 5));
    assert_eq!(angina.time_point, "第6个月随访");
    assert_eq!(record.first_event_category(), Some(EventCategory::Angina));

    let latest = record.latest_followup.unwrap();
    assert_eq!(latest.date, date(2021, 1, 2));
    assert_eq!(latest.month_offset, 12);
    assert_eq!(record.status, FollowupStatus::Adequate);
    assert!(record.has_cardiovascular_event);
    assert!(!record.has_death);
    assert_eq!(record.demographics.gender.as_deref(), Some("male"));
    assert_eq!(record.processed_at, stamp());
}

#[test]
fn scenario_b_death_counts_for_mace() {
    let tables = TableSet::new(vec![
        baseline(&[(2002, "2020-01-01")]),
        table(
            "第12个月随访",
            vec![visit(
                2002,
                "2020-09-10",
                &[
                    ("死亡时间1", CellValue::text("2020-09-01")),
                    ("如有不良事件，何事件1", CellValue::text("2")),
                ],
            )],
        ),
    ]);
    let options = ProcessingOptions::new().with_endpoint(Endpoint::Mace);
    let outcome = process_tables(&tables, &options, stamp());
    let record = &outcome.records[0];

    assert!(record.endpoint.event_occurred);
    assert_eq!(record.endpoint.endpoint_event(), "mace");
    // 2020 is a leap year
    assert_eq!(record.endpoint.survival_time_days, 244);
    assert_eq!(
        record.occurrences.get(EventCategory::Death).map(|occ| occ.date),
        Some(date(2020, 9, 1))
    );
    assert!(record.occurrences.get(EventCategory::MyocardialInfarction).is_none());
    assert!(record.has_death);
}

#[test]
fn censored_subject_runs_to_latest_followup() {
    let options = ProcessingOptions::new().with_endpoint(Endpoint::Death);
    let outcome = process_tables(&scenario_a(), &options, stamp());
    let record = &outcome.records[0];
    assert!(!record.endpoint.event_occurred);
    assert_eq!(record.endpoint.survival_time_days, 367);
    assert_eq!(record.endpoint.endpoint_date, None);
}

#[test]
fn missing_enrollment_is_skipped_not_fatal() {
    let visits = scenario_a();
    let tables: TableSet = std::iter::once(baseline(&[(1001, "2020-01-01"), (1002, "")]))
        .chain(visits.iter().skip(1).cloned())
        .collect();

    let outcome = process_tables(&tables, &ProcessingOptions::default(), stamp());
    assert_eq!(outcome.report.total_subjects, 2);
    assert_eq!(outcome.report.succeeded, 1);
    assert_eq!(outcome.report.skipped.len(), 1);
    assert_eq!(outcome.report.skipped[0].subject_id, "1002");
    assert!(outcome.report.is_consistent());
    assert_eq!(outcome.records[0].subject_id, "1001");
}

#[test]
fn unlabelled_table_is_reported_and_ignored() {
    let mut tables = scenario_a();
    tables.push(table(
        "notes",
        vec![visit(1001, "2020-02-01", &[("如有不良事件，何事件1", CellValue::text("2"))])],
    ));
    let outcome = process_tables(&tables, &ProcessingOptions::default(), stamp());
    assert_eq!(outcome.report.dropped_tables.len(), 1);
    assert_eq!(outcome.report.dropped_tables[0].label, "notes");
    assert!(
        !outcome.records[0]
            .occurrences
            .contains(EventCategory::MyocardialInfarction)
    );
}

#[test]
fn parallel_and_sequential_runs_match() {
    let rows: Vec<(i64, &str)> = (0..40).map(|i| (3000 + i, "2019-06-15")).collect();
    let mut tables = TableSet::new(vec![baseline(&rows)]);
    tables.push(table(
        "6M_Sheet",
        rows.iter()
            .map(|(id, _)| {
                let code = (id % 7).to_string();
                visit(*id, "2019-12-20", &[("event_type", CellValue::text(code))])
            })
            .collect(),
    ));
    tables.push(table(
        "followup_24m",
        rows.iter()
            .map(|(id, _)| visit(*id, "2021-06-01", &[("coronary_bypass", CellValue::Integer(1))]))
            .collect(),
    ));

    let parallel = process_tables(&tables, &ProcessingOptions::new(), stamp());
    let sequential = process_tables(&tables, &ProcessingOptions::new().with_parallel(false), stamp());
    assert_eq!(parallel.records, sequential.records);
    assert_eq!(parallel.report, sequential.report);

    let ids: Vec<_> = parallel.records.iter().map(|r| r.subject_id.clone()).collect();
    let expected: Vec<_> = rows.iter().map(|(id, _)| id.to_string()).collect();
    assert_eq!(ids, expected);

    let later = process_tables(&tables, &ProcessingOptions::new(), NaiveDateTime::default());
    let strip = |records: Vec<OutcomeRecord>| -> Vec<OutcomeRecord> {
        records
            .into_iter()
            .map(OutcomeRecord::without_timestamp)
            .collect()
    };
    assert_eq!(strip(later.records), strip(parallel.records));
}

#[test]
fn procedures_are_tracked_with_dates() {
    let tables = TableSet::new(vec![
        baseline(&[(4004, "2020-01-01")]),
        table(
            "第3个月",
            vec![visit(
                4004,
                "2020-04-02",
                &[
                    ("冠脉造影,冠脉CT或介入治疗1", CellValue::Integer(1)),
                    ("冠脉造影,冠脉CT或介入治疗时间1", CellValue::Integer(20200325)),
                ],
            )],
        ),
    ]);
    let options = ProcessingOptions::new().with_endpoint(Endpoint::AnyEvent);
    let record = &process_tables(&tables, &options, stamp()).records[0];
    assert_eq!(
        record.procedures.get(ProcedureKind::CoronaryIntervention).map(|p| p.date),
        Some(date(2020, 3, 25))
    );
    assert!(record.procedures.has(ProcedureKind::CoronaryAngiography));
    // procedures reach the first event but never the any_event endpoint
    assert!(!record.endpoint.event_occurred);
    assert_eq!(record.endpoint.survival_time_days, 92);
    assert_eq!(
        record.first_event_category(),
        Some(EventCategory::CoronaryIntervention)
    );
    assert_eq!(record.status, FollowupStatus::Incomplete);
}

#[test]
fn endpoint_comparison_over_cohort() {
    let cohort = assemble_cohort(&scenario_a(), &ProcessingOptions::default());
    let summaries = summarize_endpoints(&cohort.timelines, &Endpoint::ALL);
    assert_eq!(summaries.len(), Endpoint::ALL.len());
    let angina = summaries
        .iter()
        .find(|summary| summary.endpoint == Endpoint::Angina)
        .unwrap();
    assert_eq!(angina.events, 1);
    assert_eq!(angina.event_rate, 100.0);
    let mace = summaries
        .iter()
        .find(|summary| summary.endpoint == Endpoint::Mace)
        .unwrap();
    assert_eq!(mace.censored, 1);
    assert_eq!(mace.mean_survival_days, 367.0);
}

#[test]
fn latest_followup_skips_undated_later_months() {
    let tables = TableSet::new(vec![
        baseline(&[(5005, "2020-01-01")]),
        // out-of-order calendar date on an earlier month
        table("第3个月随访", vec![visit(5005, "2020-12-01", &[])]),
        table("第6个月随访", vec![visit(5005, "2020-07-05", &[])]),
        table("第12个月随访", vec![visit(5005, "", &[])]),
    ]);
    let outcome = process_tables(&tables, &ProcessingOptions::default(), stamp());
    let record = &outcome.records[0];

    let latest = record.latest_followup.as_ref().unwrap();
    assert_eq!(latest.month_offset, 6);
    assert_eq!(latest.date, date(2020, 7, 5));
    assert_eq!(latest.days_since_enrollment, 186);
    assert_eq!(record.status, FollowupStatus::Incomplete);
    assert!(!record.endpoint.event_occurred);
    assert_eq!(record.endpoint.survival_time_days, 186);
}

#[test]
fn enrollment_date_falls_back_to_visit_rows() {
    let tables = TableSet::new(vec![
        baseline(&[(6006, "")]),
        table(
            "第6个月随访",
            vec![visit(6006, "2020-07-05", &[("groupdate", CellValue::text("2020-01-01"))])],
        ),
    ]);
    let outcome = process_tables(&tables, &ProcessingOptions::default(), stamp());

    assert!(outcome.report.skipped.is_empty());
    assert_eq!(outcome.report.succeeded, 1);
    let record = &outcome.records[0];
    assert_eq!(record.enrollment_date, date(2020, 1, 1));
    assert_eq!(record.endpoint.survival_time_days, 186);
}

#[test]
fn breakdown_counts_every_category_reached() {
    let tables = TableSet::new(vec![
        baseline(&[(7001, "2020-01-01"), (7002, "2020-01-01"), (7003, "2020-01-01")]),
        table(
            "第6个月随访",
            vec![
                visit(7001, "2020-07-05", &[("如有不良事件，何事件1", CellValue::text("5"))]),
                visit(7002, "2020-07-05", &[("如有不良事件，何事件1", CellValue::text("2,5"))]),
                visit(7003, "2020-07-05", &[]),
            ],
        ),
    ]);
    let records = process_tables(&tables, &ProcessingOptions::default(), stamp()).records;
    let breakdown = category_breakdown(&records);

    let categories: Vec<EventCategory> = breakdown.iter().map(|(category, _)| *category).collect();
    assert_eq!(categories, EventCategory::CLINICAL.to_vec());
    let count = |wanted: EventCategory| {
        breakdown
            .iter()
            .find(|(category, _)| *category == wanted)
            .map(|(_, count)| *count)
    };
    assert_eq!(count(EventCategory::Angina), Some(2));
    assert_eq!(count(EventCategory::MyocardialInfarction), Some(1));
    assert_eq!(count(EventCategory::Death), Some(0));
}
