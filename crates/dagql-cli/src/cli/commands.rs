//! Command builders for the CLI.

use clap::{ArgGroup, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dagql")
        .about("Compile path-constrained funnel questions into provider queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(parse_command())
        .subcommand(compile_command())
        .subcommand(verify_command())
}

/// Graph, edge selection and provider flags shared by `compile` and `verify`.
fn with_plan_args(cmd: Command) -> Command {
    cmd.arg(graph_arg())
        .arg(from_arg())
        .arg(to_arg())
        .arg(all_arg())
        .arg(provider_arg())
        .arg(providers_arg())
        .arg(native_exclude_arg())
        .arg(json_arg())
        .group(
            ArgGroup::new("edge")
                .args(["from", "all"])
                .required(true),
        )
}

/// Validate a query or condition.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a query or edge condition")
        .override_usage(
            "\
  dagql check <QUERY>
  dagql check -q <TEXT> [--condition]",
        )
        .after_help(
            r#"EXAMPLES:
  dagql check query.dql                        # validate a query file
  dagql check -q 'from(a).to(b).visited(c)'    # inline query
  dagql check -q 'visited(a)' --condition      # edge condition grammar
  dagql check query.dql --strict               # unknown clauses fail too"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(condition_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show the parsed form of a query.
pub fn parse_command() -> Command {
    Command::new("parse")
        .about("Show the canonical form of a query")
        .override_usage(
            "\
  dagql parse <QUERY> [--json | --cst]
  dagql parse -q <TEXT> [--json | --cst]",
        )
        .after_help(
            r#"EXAMPLES:
  dagql parse -q 'to(b).from(a)'               # canonical clause order
  dagql parse -q 'from(a).to(b)' --json        # structured fields
  dagql parse -q 'from(a).to(b)' --cst         # syntax tree"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(condition_arg())
        .arg(json_arg())
        .arg(cst_arg())
        .arg(color_arg())
}

/// Compile edges of a graph.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile graph edges into provider queries")
        .override_usage(
            "\
  dagql compile -g <FILE> --from <NODE> --to <NODE> [--native-exclude]
  dagql compile -g <FILE> --all [-p <NAME> --providers <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  dagql compile -g graph.json --from s --to t                 # funnel-only provider
  dagql compile -g graph.json --from s --to t --native-exclude
  dagql compile -g graph.json --all -p amplitude --providers providers.json
  dagql compile -g graph.json --all --json"#,
        );

    with_plan_args(cmd)
}

/// Compile edges and check each plan against synthetic flow.
pub fn verify_command() -> Command {
    let cmd = Command::new("verify")
        .about("Check compiled plans against synthetic flow")
        .override_usage(
            "\
  dagql verify -g <FILE> --from <NODE> --to <NODE> [--flow <N>]
  dagql verify -g <FILE> --all [--native-exclude] [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  dagql verify -g graph.json --all                  # every edge, funnel-only plans
  dagql verify -g graph.json --from s --to t --flow 1000"#,
        )
        .arg(flow_arg());

    with_plan_args(cmd)
}
