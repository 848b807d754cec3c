mod cli;

use pseudoparam::config::Options;
use pseudoparam::diagnostics::ConsoleSink;
use pseudoparam::document::{self, Format};
use pseudoparam::policy::ResolutionMap;
use pseudoparam::value::Value;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("PSEUDOPARAM_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Template(template_cli) => template(template_cli),
        cli::Command::Service(service_cli) => service(service_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn template(cli: cli::TemplateCommand) -> anyhow::Result<()> {
    let mut template = load(&cli.input)?;

    let mut options = match &cli.service {
        Some(service_path) => {
            Options::from_service_description(&document::load_file(service_path)?)?
        }
        None => Options::default(),
    };
    cli.options.apply(&mut options);

    pseudoparam::pass::wrap_compiled_template(&mut template, &options, &mut console(&options));

    output(&cli.output, &template)
}

pub fn service(cli: cli::ServiceCommand) -> anyhow::Result<()> {
    let mut service = load(&cli.input)?;

    let mut options = Options::from_service_description(&service)?;
    cli.options.apply(&mut options);

    let mut resolution = ResolutionMap::for_service_description(&service, &cli.account_id);
    if let Some(region) = &cli.region {
        resolution.insert(pseudoparam::policy::REGION, region.as_str());
    }

    pseudoparam::pass::resolve_service_description(
        &mut service,
        &options,
        &resolution,
        &mut console(&options),
    );

    output(&cli.output, &service)
}

/// Diagnostics go to stderr, so `colored` must not decide by looking at stdout
fn console(options: &Options) -> ConsoleSink {
    colored::control::set_override(options.color);
    ConsoleSink
}

fn load(input: &cli::InputArgs) -> anyhow::Result<Value> {
    let Some(file_path) = &input.file else {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        // json is valid yaml
        return Ok(document::parse(&stdin, Format::Yaml)?);
    };

    Ok(document::load_file(file_path)?)
}

fn output(output: &cli::OutputArgs, value: &Value) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), value)?,
    };

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use colored::Colorize;
    use pretty_assertions::assert_eq;

    #[test]
    fn console_follows_color_option() {
        console(&Options::default());
        assert_eq!("name".yellow().to_string(), "\u{1b}[33mname\u{1b}[0m");

        console(&Options {
            color: false,
            ..Options::default()
        });
        assert_eq!("name".yellow().to_string(), "name");
    }
}
