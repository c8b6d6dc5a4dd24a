mod cmd;
mod config;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("kb")
        .about("Navigation, sidebar and breadcrumb tooling for static knowledge bases")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::check::make_subcommand())
        .subcommand(cmd::resolve::make_subcommand())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to INFO
    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("check", args)) => cmd::check::execute(args),
        Some(("resolve", args)) => cmd::resolve::execute(args),
        _ => unreachable!("subcommand is required"),
    }
}
