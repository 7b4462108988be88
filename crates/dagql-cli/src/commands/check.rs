use std::path::PathBuf;

use dagql_compiler::query::{check_query, parse_constraint_condition};

use super::input::load_query;
use super::{fail, report_query_error};

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub condition: bool,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_query(args.query_path.as_deref(), args.query_text.as_deref())
        .unwrap_or_else(|err| fail(err));

    if args.condition {
        if let Err(err) = parse_constraint_condition(&source) {
            report_query_error(&err, &source, args.color);
            std::process::exit(1);
        }
        return;
    }

    match check_query(&source) {
        Ok((_, diagnostics)) => {
            if args.strict && diagnostics.has_warnings() {
                eprint!("{}", diagnostics.render_colored(&source, args.color));
                std::process::exit(1);
            }
        }
        Err(err) => {
            report_query_error(&err, &source, args.color);
            std::process::exit(1);
        }
    }

    // Silent on success
}
