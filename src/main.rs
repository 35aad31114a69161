use std::{process::ExitCode, time::Duration};

use anyhow::Context;
use clap::Parser;
use iacr_dl::{Archive, Config, Record};
use indicatif::ProgressBar;
use owo_colors::{OwoColorize, Stream};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Format};

mod cli;

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!(
                "{} {err:#}",
                "error:".if_supports_color(Stream::Stderr, |t| t.red())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<String> {
    let archive = Archive::new(Config::with_base_url(args.base_url.clone()));

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("fetching {}", archive.config().page_url(&args.id)));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let resolved = archive.resolve(&args.id);
    spinner.finish_and_clear();

    let record = resolved.with_context(|| format!("failed to retrieve article {}", args.id))?;
    render(&record, args.format, args.pretty)
}

fn render(record: &Record, format: Format, pretty: bool) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json if pretty => serde_json::to_string_pretty(record)?,
        Format::Json => serde_json::to_string(record)?,
        Format::Bibtex => record.citation().trim_end().to_string(),
    })
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("iacr_dl={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
