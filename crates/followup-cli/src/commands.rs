use std::collections::BTreeMap;

use anyhow::Result;
use comfy_table::Table;
use tracing::{info, info_span};

use followup_cli::pipeline::{OutputConfig, ingest, output, process};
use followup_core::{
    assemble_cohort, category_breakdown, first_event_distribution, summarize_endpoints,
};
use followup_model::{Endpoint, FollowupStatus, ProcessingOptions};
use followup_report::detect_patient_group;

use crate::cli::{CompareArgs, ProcessArgs};
use crate::summary::apply_table_style;
use crate::types::{CompareResult, ProcessResult};

pub fn run_endpoints() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Endpoint", "Description"]);
    apply_table_style(&mut table);
    for endpoint in Endpoint::ALL {
        table.add_row(vec![endpoint.as_str(), endpoint.description()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let input_folder = &args.input_folder;
    let endpoint = Endpoint::from(args.endpoint);
    let span = info_span!("process", endpoint = %endpoint);
    let _guard = span.enter();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| input_folder.join("output"));
    let group = args.group.clone().unwrap_or_else(|| {
        let folder_name = input_folder
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        detect_patient_group(&folder_name).to_string()
    });

    // =========================================================================
    // Stage 1: Ingest - one table per CSV file
    // =========================================================================
    let load = ingest(input_folder)?;
    let load_failures = load
        .failures
        .iter()
        .map(|failure| (failure.path.display().to_string(), failure.error.to_string()))
        .collect();

    // =========================================================================
    // Stage 2: Process - assemble timelines and evaluate every subject
    // =========================================================================
    let options = ProcessingOptions::new()
        .with_endpoint(endpoint)
        .with_baseline_markers(args.baseline_markers.clone())
        .with_parallel(!args.sequential);
    let outcome = process(&load, &options);

    let mut status_counts: BTreeMap<FollowupStatus, usize> = BTreeMap::new();
    for record in &outcome.records {
        *status_counts.entry(record.status).or_insert(0) += 1;
    }
    let distribution = first_event_distribution(&outcome.records);
    let breakdown = category_breakdown(&outcome.records);

    // =========================================================================
    // Stage 3: Output - outcome table, optional JSON and survival dataset
    // =========================================================================
    let outputs = if args.dry_run {
        info!("dry run, no files written");
        None
    } else {
        let config = OutputConfig {
            output_dir: output_dir.clone(),
            group: group.clone(),
            format: args.format.into(),
            survival_dataset: !args.no_survival_dataset,
        };
        Some(output(&outcome.records, endpoint, &config)?)
    };

    Ok(ProcessResult {
        input_folder: input_folder.clone(),
        output_dir,
        endpoint,
        group,
        tables_loaded: load.tables.len(),
        load_failures,
        outcome,
        status_counts,
        distribution,
        breakdown,
        outputs,
    })
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareResult> {
    let span = info_span!("compare");
    let _guard = span.enter();

    let load = ingest(&args.input_folder)?;
    let options = ProcessingOptions::new().with_baseline_markers(args.baseline_markers.clone());
    let cohort = assemble_cohort(&load.tables, &options);
    let summaries = summarize_endpoints(&cohort.timelines, &Endpoint::ALL);
    info!(
        subjects = cohort.timelines.len(),
        endpoints = summaries.len(),
        "endpoint comparison complete"
    );

    Ok(CompareResult {
        input_folder: args.input_folder.clone(),
        subjects: cohort.timelines.len(),
        skipped: cohort.skipped.len(),
        summaries,
    })
}
