use aviary::{bench, datafile, demo, drills::NumericDrill, AviaryError, PerformanceTracker, Scenario};
use colored::Colorize;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: aviary [SCENARIO.toml|SCENARIO.json] [NUMBERS.txt]";

fn run(scenario_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<(), AviaryError> {
    let scenario = match scenario_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading scenario");
            Scenario::from_path(&path)?
        }
        None => Scenario::default(),
    };

    let tracker = PerformanceTracker::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for &layout in &scenario.layouts {
        let mut store = tracker.measure("build store", || demo::build_store(&scenario, layout));
        demo::run_store_operations(&mut store, &scenario, &tracker, &mut out)?;
        writeln!(out)?;
    }

    if scenario.benchmark_size > 0 {
        writeln!(
            out,
            "{}",
            format!("=== Layout comparison (size={}) ===", scenario.benchmark_size).bold()
        )?;
        for timing in bench::compare_layouts(scenario.benchmark_size, scenario.policy) {
            writeln!(out, "{}", timing)?;
        }
        writeln!(out)?;
    }

    if let Some(path) = data_path {
        writeln!(out, "{}", format!("=== Numeric drill: {} ===", path.display()).bold())?;
        let values = datafile::load_values(&path)?;
        let drill = NumericDrill::new(scenario.numeric_target, &values);
        let sorted = drill.run(&tracker, &mut out)?;
        let sorted_path = datafile::sorted_path(&path);
        datafile::write_values(&sorted_path, &sorted)?;
        writeln!(out, "Sorted values written to {}", sorted_path.display())?;
    }

    let samples = tracker.samples();
    writeln!(out, "{}", "=== Operation timings ===".bold())?;
    for sample in &samples {
        writeln!(out, "  {:<28} {:>8} µs", sample.operation, sample.micros())?;
    }
    writeln!(out, "  {:<28} {:>8} µs", "total", tracker.total().as_micros())?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aviary=info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let scenario_path = args.next().map(PathBuf::from);
    let data_path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    match run(scenario_path, data_path) {
        Ok(()) => {
            println!("{}", "✓ Done".green());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
