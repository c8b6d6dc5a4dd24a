use anyhow::Result;
use clap::ArgMatches;
use clap::parser::ValueSource;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct KbConfig {
    /// Build configuration
    pub build: BuildConfig,
    /// Site configuration (from kb-core)
    #[serde(flatten)]
    pub site: kb_core::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Content directory containing documents
    pub content: String,
    /// Output directory for generated site
    pub output: String,
    /// Theme directory
    pub theme: String,
    /// Configuration file path
    pub config: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "./docs".to_string(),
            output: "./out".to_string(),
            theme: "./theme".to_string(),
            config: "./kb.toml".to_string(),
        }
    }
}

impl KbConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (KB_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .try_get_one::<String>("config")
            .ok()
            .flatten()
            .cloned()
            .unwrap_or_else(|| BuildConfig::default().config);

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            tracing::debug!(file = %config_file, "Reading configuration file");
            builder = builder.add_source(File::from(Path::new(&config_file)));
        } else {
            tracing::debug!(file = %config_file, "Configuration file not found, using defaults");
        }

        // 3. Add environment variables with KB_ prefix
        builder = builder.add_source(
            Environment::with_prefix("KB")
                .prefix_separator("_")
                .separator("__") // Use double underscore for nested keys
                .try_parsing(true), // Flattened site settings need typed values, not strings
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();
        for key in ["content", "output", "theme", "config"] {
            // Only override with CLI args that are actually defined for this command
            // and were given explicitly
            let Some(value) = args.try_get_one::<String>(key).unwrap_or(None) else {
                continue;
            };
            if args.value_source(key) == Some(ValueSource::CommandLine) {
                cli_overrides.insert(format!("build.{key}"), value.clone());
            }
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let config = builder.build()?;
        let kb_config: KbConfig = config.try_deserialize()?;

        Ok(kb_config)
    }

    /// Get just the site configuration for passing to kb-core
    pub fn site_config(&self) -> &kb_core::Config {
        &self.site
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

/// Load configuration for any subcommand
pub fn load_config(args: &ArgMatches) -> Result<KbConfig> {
    KbConfig::load(args)
}
