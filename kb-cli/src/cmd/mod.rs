pub mod build;
pub mod check;
pub mod resolve;

use clap::{Arg, Command};

pub fn add_config_arg(command: Command) -> Command {
    command.arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .help("Configuration file")
            .default_value("./kb.toml"),
    )
}

pub fn add_content_arg(command: Command) -> Command {
    command.arg(
        Arg::new("content")
            .short('s')
            .long("content")
            .value_name("DIR")
            .help("Content directory containing the site's documents")
            .default_value("./docs"),
    )
}
