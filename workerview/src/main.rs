//! # workerview
//!
//! Prints worker, service and job-queue status tables from a state snapshot.
//!
//! ## Usage
//!
//! ```bash
//! # Worker pools from a snapshot file
//! workerview workers status.json
//!
//! # Only the http pool, sizes in KiB/MiB
//! workerview --binary-units workers status.json --plugin http
//!
//! # Job pipelines, snapshot on stdin
//! collect-status | workerview jobs
//!
//! # Everything, as JSON
//! workerview --output json all status.json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

mod render;

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use console::{style, Term};
use tracing_subscriber::EnvFilter;
use workerviewlib::{load_snapshot, ByteUnits, ColorMode, OutputFormat, RenderOptions};

use render::{all_sections, emit, job_sections, service_sections, worker_sections};

fn snapshot_arg() -> Arg {
    Arg::new("snapshot")
        .help("Snapshot JSON file ('-' reads stdin)")
        .default_value("-")
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("workerview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print worker, service and job-queue status tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("color")
                .long("color")
                .global(true)
                .value_parser(["auto", "always", "never"])
                .default_value("auto")
                .help("When to use terminal colors"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("binary-units")
                .long("binary-units")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Show memory in KiB/MiB/GiB instead of kB/MB/GB"),
        )
        .arg(
            Arg::new("max-width")
                .long("max-width")
                .global(true)
                .value_parser(clap::value_parser!(u16).range(20..))
                .default_value("150")
                .help("Maximum table width in columns"),
        )
        .subcommand(
            Command::new("workers")
                .about("Show worker pools")
                .arg(snapshot_arg())
                .arg(
                    Arg::new("plugin")
                        .short('p')
                        .long("plugin")
                        .action(ArgAction::Append)
                        .help("Only show this plugin's pool (can be specified multiple times)"),
                ),
        )
        .subcommand(
            Command::new("services")
                .about("Show service processes")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("jobs")
                .about("Show job pipelines")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("all")
                .about("Show workers, services and jobs")
                .arg(snapshot_arg()),
        )
}

/// Global flags shared by every subcommand
struct Settings {
    opts: RenderOptions,
    color: ColorMode,
    format: OutputFormat,
}

fn extract_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let color: ColorMode = matches
        .get_one::<String>("color")
        .map(|s| s.parse::<ColorMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    let format: OutputFormat = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputFormat>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let units = if matches.get_flag("binary-units") {
        ByteUnits::Binary
    } else {
        ByteUnits::Decimal
    };
    let mut opts = RenderOptions::new().byte_units(units);
    if let Some(width) = matches.get_one::<u16>("max-width") {
        opts = opts.max_width(*width);
    }

    Ok(Settings {
        opts,
        color,
        format,
    })
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("no command given"))?;
    let settings = extract_settings(sub)?;

    match settings.color {
        ColorMode::Always => console::set_colors_enabled(true),
        ColorMode::Never => console::set_colors_enabled(false),
        ColorMode::Auto => {}
    }

    let path = sub
        .get_one::<String>("snapshot")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let snapshot = load_snapshot(path)?;

    let sections = match name {
        "workers" => {
            let plugins: Vec<String> = sub
                .get_many::<String>("plugin")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            worker_sections(&snapshot, &plugins, &settings.opts)?
        }
        "services" => service_sections(&snapshot, &settings.opts)?,
        "jobs" => job_sections(&snapshot, &settings.opts),
        "all" => all_sections(&snapshot, &settings.opts)?,
        other => anyhow::bail!("unknown command '{}'", other),
    };

    let mut out = Term::stdout();
    emit(&mut out, &sections, settings.format, settings.color)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().for_stderr(), e);
            ExitCode::FAILURE
        }
    }
}
