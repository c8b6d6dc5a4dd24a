use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use kb_core::SiteBuilder;

use super::{add_config_arg, add_content_arg};
use crate::config::load_config;

pub fn add_build_args(command: Command) -> Command {
    add_config_arg(add_content_arg(command))
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated site")
                .default_value("./out"),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("DIR")
                .help("Theme directory overriding the built-in layout")
                .default_value("./theme"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Render every document with navigation, sidebar and breadcrumbs")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let kb_config = load_config(args)?;
    let build_config = kb_config.build_config();

    let site = SiteBuilder::new()
        .content_dir(&build_config.content)
        .output_dir(&build_config.output)
        .theme_dir(&build_config.theme)
        .config(kb_config.site_config().clone())
        .build()?;

    let report = site.check_links();
    if !report.is_ok() {
        tracing::warn!(
            unresolved = report.unresolved.len(),
            "Building with unresolved links, run `kb check` for details"
        );
    }

    let pages = site.render_all()?;
    println!("Built {} pages in {}", pages, build_config.output);

    Ok(())
}
