//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so graph and provider flags are
//! defined once and composed into `compile` and `verify`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query file, or `-` for stdin (positional).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("QUERY")
        .value_parser(value_parser!(PathBuf))
        .help("Query file (`-` reads stdin)")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Parse with the edge-condition grammar (--condition).
pub fn condition_arg() -> Arg {
    Arg::new("condition")
        .long("condition")
        .action(ArgAction::SetTrue)
        .help("Treat the input as an edge-activation condition")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Print the syntax tree (--cst).
pub fn cst_arg() -> Arg {
    Arg::new("cst")
        .long("cst")
        .action(ArgAction::SetTrue)
        .conflicts_with("json")
        .help("Print the concrete syntax tree instead of the canonical query")
}

/// Conversion graph document (--graph).
pub fn graph_arg() -> Arg {
    Arg::new("graph")
        .short('g')
        .long("graph")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Conversion graph JSON document")
}

/// Split node of the edge (--from).
pub fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .value_name("NODE")
        .requires("to")
        .help("Edge source (split node)")
}

/// Target node of the edge (--to).
pub fn to_arg() -> Arg {
    Arg::new("to")
        .long("to")
        .value_name("NODE")
        .requires("from")
        .help("Edge target")
}

/// Every edge of the graph (--all).
pub fn all_arg() -> Arg {
    Arg::new("all")
        .long("all")
        .action(ArgAction::SetTrue)
        .conflicts_with_all(["from", "to"])
        .help("Process every edge of the graph")
}

/// Provider name looked up in --providers (--provider).
pub fn provider_arg() -> Arg {
    Arg::new("provider")
        .short('p')
        .long("provider")
        .value_name("NAME")
        .requires("providers")
        .help("Provider whose capabilities decide the plan")
}

/// Provider capability document (--providers).
pub fn providers_arg() -> Arg {
    Arg::new("providers")
        .long("providers")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .requires("provider")
        .help("Provider capability JSON document")
}

/// Assume native exclusion (--native-exclude).
pub fn native_exclude_arg() -> Arg {
    Arg::new("native_exclude")
        .long("native-exclude")
        .action(ArgAction::SetTrue)
        .conflicts_with("provider")
        .help("Assume a provider with native exclude support")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON")
}

/// Synthetic start flow for the oracle (--flow).
pub fn flow_arg() -> Arg {
    Arg::new("flow")
        .long("flow")
        .value_name("N")
        .value_parser(value_parser!(f64))
        .default_value("1.0")
        .help("Synthetic flow injected at the split node")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
