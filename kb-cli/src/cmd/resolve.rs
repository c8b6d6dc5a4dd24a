use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use kb_core::{PageDecorator, TemplateRenderer};

use super::add_config_arg;
use crate::config::load_config;

pub fn make_subcommand() -> Command {
    add_config_arg(Command::new("resolve"))
        .about("Print the nav highlight, breadcrumbs and sidebar resolved for a path")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Absolute document path, e.g. /it/base/01-intro")
                .required(true),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let kb_config = load_config(args)?;
    let site_config = kb_config.site_config();

    let decorator = PageDecorator::new(site_config.registry()?, TemplateRenderer::with_default_theme()?)
        .home_label(site_config.breadcrumb.home_label.clone());

    let path = args
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("/");
    let page = decorator.resolve(path)?;

    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
