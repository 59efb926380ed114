//! optshape entry point.

use optshape::audit::AuditLogger;
use optshape::config::Config;
use optshape::handle::handle;
use optshape::input::Request;
use optshape::output::{Response, format_response};

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Read JSON from stdin
    let mut input_str = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input_str) {
        return fail(&e);
    }

    let request = match Request::parse(&input_str) {
        Ok(v) => v,
        Err(e) => return fail(&e),
    };

    let cwd = request.cwd.as_deref().map(Path::new);
    let config = match Config::load(cwd) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let compiled = match config.compile() {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let outcome = handle(&request, &compiled);

    // Audit logging (if enabled)
    if compiled.raw.audit.enabled {
        if let Some(path) = &compiled.raw.audit.path {
            match AuditLogger::open(Path::new(path)) {
                Ok(mut logger) => {
                    if let Err(e) = logger.log_outcome(&request, &outcome) {
                        eprintln!("optshape: audit log: {}", e);
                    }
                }
                Err(e) => eprintln!("optshape: audit log: {}", e),
            }
        }
    }

    match format_response(&outcome) {
        Response::Stdout(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Response::Stderr(msg) => {
            eprintln!("{}", msg);
            ExitCode::from(2)
        }
    }
}

fn fail(err: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("optshape: {}", err);
    ExitCode::from(1)
}
