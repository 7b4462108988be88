//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `Into<*Args>` impls bridge dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::input::{EdgeSelection, ProviderSource};
use crate::commands::parse::{ParseArgs, ParseOutput};
use crate::commands::verify::VerifyArgs;

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub condition: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            condition: m.get_flag("condition"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            condition: p.condition,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ParseParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub condition: bool,
    pub json: bool,
    pub cst: bool,
    pub color: ColorChoice,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            condition: m.get_flag("condition"),
            json: m.get_flag("json"),
            cst: m.get_flag("cst"),
            color: parse_color(m),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        let output = if p.cst {
            ParseOutput::Cst
        } else if p.json {
            ParseOutput::Json
        } else {
            ParseOutput::Canonical
        };
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            condition: p.condition,
            output,
            color: p.color.should_colorize(),
        }
    }
}

/// Flags shared by `compile` and `verify`.
pub struct PlanParams {
    pub graph: PathBuf,
    pub edges: EdgeSelection,
    pub provider: ProviderSource,
    pub json: bool,
}

impl PlanParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let edges = match (m.get_one::<String>("from"), m.get_one::<String>("to")) {
            (Some(from), Some(to)) if !m.get_flag("all") => EdgeSelection::One {
                from: from.clone(),
                to: to.clone(),
            },
            _ => EdgeSelection::All,
        };

        let provider = if m.get_flag("native_exclude") {
            ProviderSource::NativeExclude
        } else {
            match (
                m.get_one::<String>("provider"),
                m.get_one::<PathBuf>("providers"),
            ) {
                (Some(name), Some(path)) => ProviderSource::Named {
                    name: name.clone(),
                    registry: path.clone(),
                },
                _ => ProviderSource::FunnelOnly,
            }
        };

        Self {
            // Required by clap.
            graph: m.get_one::<PathBuf>("graph").cloned().unwrap_or_default(),
            edges,
            provider,
            json: m.get_flag("json"),
        }
    }
}

pub struct CompileParams {
    pub plan: PlanParams,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            plan: PlanParams::from_matches(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            graph: p.plan.graph,
            edges: p.plan.edges,
            provider: p.plan.provider,
            json: p.plan.json,
        }
    }
}

pub struct VerifyParams {
    pub plan: PlanParams,
    pub flow: f64,
}

impl VerifyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            plan: PlanParams::from_matches(m),
            flow: m.get_one::<f64>("flow").copied().unwrap_or(1.0),
        }
    }
}

impl From<VerifyParams> for VerifyArgs {
    fn from(p: VerifyParams) -> Self {
        Self {
            graph: p.plan.graph,
            edges: p.plan.edges,
            provider: p.plan.provider,
            json: p.plan.json,
            flow: p.flow,
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
