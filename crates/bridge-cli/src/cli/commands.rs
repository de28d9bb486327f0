//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("bridge")
        .about("Client binding generator driven by a resolved type model")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(types_command())
        .subcommand(closure_command())
        .subcommand(gen_command())
}

/// Resolve declaration files and report problems.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Resolve declaration files and report problems")
        .after_help(
            r#"EXAMPLES:
  bridge check service.json models.json           # errors only fail
  bridge check service.json models.json --strict  # warnings fail too"#,
        )
        .arg(files_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// List every registered type.
pub fn types_command() -> Command {
    Command::new("types")
        .about("List every registered type with its kind and signature")
        .arg(files_arg())
        .arg(color_arg())
}

/// Print the type closure of a service.
pub fn closure_command() -> Command {
    Command::new("closure")
        .about("Print the types a service's operations need codecs for")
        .after_help(
            r#"EXAMPLES:
  bridge closure api.json --service UserService
  bridge closure api.json --service UserService --operation SaveUser
  bridge closure api.json --service Api --namespace github.com/acme/api --references"#,
        )
        .arg(files_arg())
        .arg(service_arg())
        .arg(namespace_arg())
        .arg(operation_arg())
        .arg(references_arg())
}

/// Generate bindings for a service.
pub fn gen_command() -> Command {
    Command::new("gen")
        .about("Generate client, operation stubs and codecs for a service")
        .after_help(
            r#"EXAMPLES:
  bridge gen api.json --service UserService               # outline to stdout
  bridge gen api.json --service UserService -o out/       # one file per output
  bridge gen api.json --service UserService --known-codec uuid.UUID"#,
        )
        .arg(files_arg())
        .arg(service_arg())
        .arg(namespace_arg())
        .arg(operation_arg())
        .arg(references_arg())
        .arg(package_arg())
        .arg(client_prefix_arg())
        .arg(client_suffix_arg())
        .arg(known_codec_arg())
        .arg(output_dir_arg())
        .arg(color_arg())
}
