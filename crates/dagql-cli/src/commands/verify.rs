use std::path::PathBuf;

use dagql_compiler::validate::{FlowReport, validate_compiled_with_flow};
use serde::Serialize;

use super::compile::compile_edges;
use super::input::{EdgeSelection, ProviderSource, load_graph, resolve_capability};
use super::{CliError, fail};

pub struct VerifyArgs {
    pub graph: PathBuf,
    pub edges: EdgeSelection,
    pub provider: ProviderSource,
    pub json: bool,
    pub flow: f64,
}

#[derive(Debug, Serialize)]
struct VerifyEntry {
    split: String,
    target: String,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<FlowReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: VerifyArgs) {
    match execute(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => fail(err),
    }
}

/// Returns whether every plan matched the synthetic flow.
fn execute(args: &VerifyArgs) -> Result<bool, CliError> {
    let graph = load_graph(&args.graph)?;
    let capability = resolve_capability(&args.provider)?;
    let plans = compile_edges(&graph, &args.edges, &capability)?;

    let entries: Vec<VerifyEntry> = plans
        .iter()
        .map(|plan| {
            let result =
                validate_compiled_with_flow(&graph, plan.query(), plan.competing_hops(), args.flow);
            let (report, error) = match result {
                Ok(report) => (Some(report), None),
                Err(err) => (None, Some(err.to_string())),
            };
            VerifyEntry {
                split: plan.split().to_owned(),
                target: plan.target().to_owned(),
                query: plan.query().to_owned(),
                report,
                error,
            }
        })
        .collect();

    let all_ok = entries.iter().all(|e| e.error.is_none());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(all_ok);
    }

    for entry in &entries {
        match (&entry.report, &entry.error) {
            (Some(report), _) => println!(
                "{} -> {}: ok (direct {:.6}, terms {}, paths {})",
                entry.split,
                entry.target,
                report.direct_flow,
                report.term_flows.len(),
                report.path_count
            ),
            (None, Some(error)) => println!(
                "{} -> {}: FAILED {error}\n  {}",
                entry.split, entry.target, entry.query
            ),
            (None, None) => {}
        }
    }
    Ok(all_ok)
}
