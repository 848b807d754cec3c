//! pseudoparam cli interface

use clap::{Parser, Subcommand, ValueEnum};
use pseudoparam::config::Options;
use pseudoparam::policy::OFFLINE_ACCOUNT_ID;
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite placeholders in a compiled template into Fn::Sub expressions
    ///
    /// Reads the template from stdin unless --input-file is given
    #[command(alias = "tpl")]
    Template(TemplateCommand),

    /// Resolve placeholders in a service description to literal values
    ///
    /// Reads the service description from stdin unless --input-file is given
    Service(ServiceCommand),
}

#[derive(Parser, Debug)]
pub struct TemplateCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    #[clap(flatten)]
    pub options: OptionArgs,

    /// Read options from custom.pseudoParameters of this service description
    #[clap(short = 's', long = "service")]
    pub service: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ServiceCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    #[clap(flatten)]
    pub options: OptionArgs,

    /// Region to resolve AWS::Region with (default: provider.region)
    #[clap(short = 'r', long = "region")]
    pub region: Option<String>,

    /// Account id to resolve AWS::AccountId with
    #[clap(long = "account-id", default_value = OFFLINE_ACCOUNT_ID)]
    pub account_id: String,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load a json or yaml file
    #[clap(short = 'f', long = "input-file")]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

/// Overrides for options found in the service description
#[derive(Parser, Debug)]
pub struct OptionArgs {
    /// Promote literal region names to #{AWS::Region}
    #[clap(long = "region-replace")]
    pub region_replace: bool,

    /// Only match #{AWS::...} tokens
    #[clap(long = "no-references")]
    pub no_references: bool,

    /// Report every replaced token (also enabled by SLS_DEBUG)
    #[clap(long = "debug")]
    pub debug: bool,

    /// Disable colored diagnostics
    #[clap(long = "no-color")]
    pub no_color: bool,
}

impl OptionArgs {
    pub fn apply(&self, options: &mut Options) {
        self.apply_with_env(options, std::env::var_os("SLS_DEBUG").is_some())
    }

    fn apply_with_env(&self, options: &mut Options, sls_debug: bool) {
        if self.region_replace {
            options.skip_region_replace = false;
        }
        if self.no_references {
            options.allow_references = false;
        }
        if self.debug || sls_debug {
            options.debug = true;
        }
        if self.no_color {
            options.color = false;
        }
    }
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
