use std::path::PathBuf;

use dagql_compiler::compile::{CompiledQuery, compile_query_for_edge};
use dagql_core::{ConversionGraph, ProviderCapability};
use tracing::warn;

use super::input::{EdgeSelection, ProviderSource, load_graph, resolve_capability, select_edges};
use super::{CliError, fail};

pub struct CompileArgs {
    pub graph: PathBuf,
    pub edges: EdgeSelection,
    pub provider: ProviderSource,
    pub json: bool,
}

pub fn run(args: CompileArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &CompileArgs) -> Result<(), CliError> {
    let graph = load_graph(&args.graph)?;
    let capability = resolve_capability(&args.provider)?;
    let plans = compile_edges(&graph, &args.edges, &capability)?;

    if args.json {
        let json = match (&args.edges, plans.as_slice()) {
            (EdgeSelection::One { .. }, [plan]) => serde_json::to_string_pretty(plan)?,
            _ => serde_json::to_string_pretty(&plans)?,
        };
        println!("{json}");
        return Ok(());
    }

    match &args.edges {
        EdgeSelection::One { .. } => {
            for plan in &plans {
                println!("{}", plan.query());
            }
        }
        EdgeSelection::All => {
            for plan in &plans {
                println!("{} -> {}: {}", plan.split(), plan.target(), plan.query());
            }
        }
    }
    Ok(())
}

/// Compile the selected edges, warning about plans the provider cannot run.
pub fn compile_edges(
    graph: &ConversionGraph,
    selection: &EdgeSelection,
    capability: &ProviderCapability,
) -> Result<Vec<CompiledQuery>, CliError> {
    let mut plans = Vec::new();
    for (from, to) in select_edges(graph, selection) {
        let plan = compile_query_for_edge(graph, (&from, &to), capability)?;
        if !plan.fits(capability) {
            warn!(
                split = plan.split(),
                target = plan.target(),
                funnel_length = plan.max_funnel_length(),
                limit = ?capability.max_funnel_length,
                "plan exceeds provider capability"
            );
        }
        plans.push(plan);
    }
    Ok(plans)
}
