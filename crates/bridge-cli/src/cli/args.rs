//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Declaration files (positional, one or more).
pub fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILES")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("JSON declaration files ('-' reads stdin)")
}

/// Service record to generate for (--service).
pub fn service_arg() -> Arg {
    Arg::new("service")
        .long("service")
        .value_name("NAME")
        .required(true)
        .help("Service record name")
}

/// Namespace of the service (--namespace).
pub fn namespace_arg() -> Arg {
    Arg::new("namespace")
        .long("namespace")
        .value_name("PATH")
        .default_value("")
        .help("Namespace the service is declared in")
}

/// Single operation filter (--operation).
pub fn operation_arg() -> Arg {
    Arg::new("operation")
        .long("operation")
        .value_name("NAME")
        .help("Only this operation")
}

/// Collect reference types as closure entries (--references).
pub fn references_arg() -> Arg {
    Arg::new("references")
        .long("references")
        .action(ArgAction::SetTrue)
        .help("Give reference types their own codecs")
}

/// Package of the generated files (--package).
pub fn package_arg() -> Arg {
    Arg::new("package")
        .long("package")
        .value_name("NAME")
        .default_value("restclient")
        .help("Package the generated files declare")
}

/// Client type name prefix (--client-prefix).
pub fn client_prefix_arg() -> Arg {
    Arg::new("client_prefix")
        .long("client-prefix")
        .value_name("TEXT")
        .default_value("")
        .help("Prefix of the client type name")
}

/// Client type name suffix (--client-suffix).
pub fn client_suffix_arg() -> Arg {
    Arg::new("client_suffix")
        .long("client-suffix")
        .value_name("TEXT")
        .default_value("Client")
        .help("Suffix of the client type name")
}

/// Extra hand-written codecs (--known-codec, repeatable).
pub fn known_codec_arg() -> Arg {
    Arg::new("known_codec")
        .long("known-codec")
        .value_name("PATH.NAME")
        .action(ArgAction::Append)
        .help("Type whose codec is supplied by hand-written code, as PATH.Name")
}

/// Write output into a directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Write client.txt, ops.txt, writers.txt and readers.txt into DIR")
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

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log to stderr (-v for debug, -vv for trace)")
}
