use std::env;
use std::io;

use anyhow::{anyhow, Context, Result};
use log::info;

use lighting_demo::{run_interactive, write_summary, DemoConfig, WindowInitError};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;
    let config = match &options.config {
        Some(path) => {
            info!("loading settings from {path}");
            DemoConfig::load(path)?
        }
        None => DemoConfig::default(),
    };

    if options.summary_only {
        return print_summary(&config);
    }

    match run_interactive(config.clone()) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or WAYLAND_DISPLAY to enable rendering)."
                );
                print_summary(&config)
            } else {
                Err(err)
            }
        }
    }
}

fn print_summary(config: &DemoConfig) -> Result<()> {
    let stdout = io::stdout();
    write_summary(config, &mut stdout.lock()).context("failed to write summary")
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<String>,
    summary_only: bool,
}

impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--summary-only" => options.summary_only = true,
                "--config" => {
                    let Some(path) = args.next() else {
                        return Err(anyhow!(
                            "Usage: lighting-demo [--config <settings.xml>] [--summary-only]"
                        ));
                    };
                    options.config = Some(path);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --config <settings.xml> or --summary-only"
                    ));
                }
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_flags_in_any_order() {
        let options = parse(&["--summary-only", "--config", "demo.xml"]).unwrap();
        assert_eq!(
            options,
            CliOptions {
                config: Some("demo.xml".into()),
                summary_only: true,
            }
        );
        assert_eq!(parse(&[]).unwrap(), CliOptions::default());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--fullscreen"]).is_err());
    }
}
