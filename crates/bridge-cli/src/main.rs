mod cli;
mod commands;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use cli::{CheckParams, ClosureParams, GenParams, TypesParams, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("check", m)) => commands::check::run(CheckParams::from_matches(m).into()),
        Some(("types", m)) => commands::types::run(TypesParams::from_matches(m).into()),
        Some(("closure", m)) => commands::closure::run(ClosureParams::from_matches(m).into()),
        Some(("gen", m)) => commands::generate::run(GenParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `BRIDGE_LOG` wins over `-v`; without either only warnings are shown.
fn init_tracing(verbosity: u8) {
    let filter = std::env::var("BRIDGE_LOG").unwrap_or_else(|_| {
        match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("warning: tracing subscriber already initialized");
    }
}
