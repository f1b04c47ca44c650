use anyhow::{Context, Result};
use clap::Parser;
use fps_report::cli::{Cli, Command, CompareArgs, OutputFormat, SummaryArgs};
use fps_report::fps_summary::FpsSummary;
use fps_report::json_output::JsonReport;
use fps_report::regression;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
///
/// `--debug` enables everything down to TRACE; otherwise `RUST_LOG` is honored
/// when set.
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_compare(args: &CompareArgs) -> Result<()> {
    let config = args
        .resolve_config()
        .context("Invalid comparison configuration")?;
    tracing::debug!(?config, "Resolved configuration");

    let report = regression::compare_files(&args.before, &args.after, &config).with_context(
        || {
            format!(
                "Failed to compare {} with {}",
                args.before.display(),
                args.after.display()
            )
        },
    )?;

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string(&config)),
        OutputFormat::Json => println!("{}", JsonReport::new(&report, &config).to_json()?),
    }
    Ok(())
}

fn run_summary(args: &SummaryArgs) -> Result<()> {
    let summary = FpsSummary::from_path(&args.fps_file, args.max_samples)
        .with_context(|| format!("Failed to summarize {}", args.fps_file.display()))?;
    print!("{}", summary.to_report_string());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    match &cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Summary(args) => run_summary(args),
    }
}
