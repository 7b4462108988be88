use std::path::PathBuf;

use dagql_compiler::parser::{self, dump_cst};
use dagql_compiler::query::{check_query, parse_constraint_condition};

use super::input::load_query;
use super::{CliError, fail, report_query_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutput {
    Canonical,
    Json,
    Cst,
}

pub struct ParseArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub condition: bool,
    pub output: ParseOutput,
    pub color: bool,
}

pub fn run(args: ParseArgs) {
    let source = load_query(args.query_path.as_deref(), args.query_text.as_deref())
        .unwrap_or_else(|err| fail(err));

    if args.output == ParseOutput::Cst {
        let result = parser::parse(&source);
        print!("{}", dump_cst(result.root.as_cst()));
        if !result.diagnostics.is_empty() {
            eprint!("{}", result.diagnostics.render_colored(&source, args.color));
        }
        return;
    }

    let rendered = if args.condition {
        parse_constraint_condition(&source).map(|condition| match args.output {
            ParseOutput::Json => serde_json::to_string_pretty(&condition).map_err(CliError::from),
            _ => Ok(condition.to_dsl()),
        })
    } else {
        check_query(&source).map(|(query, diagnostics)| {
            if !diagnostics.is_empty() {
                eprint!("{}", diagnostics.render_colored(&source, args.color));
            }
            match args.output {
                ParseOutput::Json => serde_json::to_string_pretty(&query).map_err(CliError::from),
                _ => Ok(query.to_dsl()),
            }
        })
    };

    match rendered {
        Ok(Ok(text)) => println!("{text}"),
        Ok(Err(err)) => fail(err),
        Err(err) => {
            report_query_error(&err, &source, args.color);
            std::process::exit(1);
        }
    }
}
