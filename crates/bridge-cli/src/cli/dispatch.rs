//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `From<*Params>` impls bridge dispatch and command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::closure::ClosureArgs;
use crate::commands::generate::GenArgs;
use crate::commands::types::TypesArgs;

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            files: p.files,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TypesParams {
    pub files: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl TypesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            color: parse_color(m),
        }
    }
}

impl From<TypesParams> for TypesArgs {
    fn from(p: TypesParams) -> Self {
        Self {
            files: p.files,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ClosureParams {
    pub files: Vec<PathBuf>,
    pub service: String,
    pub namespace: String,
    pub operation: Option<String>,
    pub references: bool,
}

impl ClosureParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            service: parse_string(m, "service"),
            namespace: parse_string(m, "namespace"),
            operation: m.get_one::<String>("operation").cloned(),
            references: m.get_flag("references"),
        }
    }
}

impl From<ClosureParams> for ClosureArgs {
    fn from(p: ClosureParams) -> Self {
        Self {
            files: p.files,
            service: p.service,
            namespace: p.namespace,
            operation: p.operation,
            references: p.references,
        }
    }
}

pub struct GenParams {
    pub files: Vec<PathBuf>,
    pub service: String,
    pub namespace: String,
    pub operation: Option<String>,
    pub references: bool,
    pub package: String,
    pub client_prefix: String,
    pub client_suffix: String,
    pub known_codecs: Vec<String>,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl GenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            service: parse_string(m, "service"),
            namespace: parse_string(m, "namespace"),
            operation: m.get_one::<String>("operation").cloned(),
            references: m.get_flag("references"),
            package: parse_string(m, "package"),
            client_prefix: parse_string(m, "client_prefix"),
            client_suffix: parse_string(m, "client_suffix"),
            known_codecs: m
                .get_many::<String>("known_codec")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<GenParams> for GenArgs {
    fn from(p: GenParams) -> Self {
        // Files on disk never get escape codes.
        let color = p.output.is_none() && p.color.should_colorize();
        Self {
            files: p.files,
            service: p.service,
            namespace: p.namespace,
            operation: p.operation,
            references: p.references,
            package: p.package,
            client_prefix: p.client_prefix,
            client_suffix: p.client_suffix,
            known_codecs: p.known_codecs,
            output: p.output,
            color,
        }
    }
}

fn parse_files(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}

/// Value of an arg that is required or has a default.
fn parse_string(m: &ArgMatches, id: &str) -> String {
    m.get_one::<String>(id).cloned().unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
