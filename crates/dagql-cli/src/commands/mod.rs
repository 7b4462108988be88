pub mod check;
pub mod compile;
pub mod input;
pub mod parse;
pub mod verify;

use std::fmt::Display;

use dagql_compiler::compile::CompileError;
use dagql_compiler::validate::ValidationError;

use input::InputError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print `error: ...` and exit with status 1.
pub fn fail(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

/// Render a query error against its source: annotated snippets when the
/// parser produced diagnostics, a one-line message otherwise.
pub fn report_query_error(err: &dagql_compiler::Error, source: &str, color: bool) {
    match err.diagnostics() {
        Some(diagnostics) => eprint!("{}", diagnostics.render_colored(source, color)),
        None => eprintln!("error: {err}"),
    }
}
