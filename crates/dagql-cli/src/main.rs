mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{CheckParams, CompileParams, ParseParams, VerifyParams, build_cli};

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("parse", m)) => {
            let params = ParseParams::from_matches(m);
            commands::parse::run(params.into());
        }
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("verify", m)) => {
            let params = VerifyParams::from_matches(m);
            commands::verify::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log to stderr, filtered by `DAGQL_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DAGQL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
