use anyhow::{Result, bail};
use clap::{ArgMatches, Command};
use kb_core::SiteBuilder;

use super::{add_config_arg, add_content_arg};
use crate::config::load_config;

pub fn make_subcommand() -> Command {
    add_config_arg(add_content_arg(Command::new("check")))
        .about("Validate navigation and sidebar links against the content tree")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let kb_config = load_config(args)?;

    let site = SiteBuilder::new()
        .content_dir(&kb_config.build_config().content)
        .config(kb_config.site_config().clone())
        .build()?;

    let report = site.check_links();
    if !report.is_ok() {
        for err in &report.unresolved {
            eprintln!("  {err}");
        }
        bail!("{} unresolved link(s)", report.unresolved.len());
    }

    println!(
        "All {} internal links resolve across {} documents ({} external skipped)",
        report.checked,
        site.documents().len(),
        report.external
    );

    Ok(())
}
