mod common;
mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::scenario::{ALL_SCENARIOS, get_scenario, list_scenarios};
use common::{load_json, merge_overrides, split_csv};
use logic::{
    DEFAULT_MAX_OVERS, LogicTester, MatchAggregate, MatchRecord, MatchTester, aggregate_matches,
    collect_match_records, resolve_seed_inputs,
};
use t20_engine::{MatchEngine, TuningPreset};

#[derive(Debug, Parser)]
#[command(name = "t20-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the T20 match engine using seeded preview matches")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and presets, then exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated; decimal, 0x hex, or a..b ranges)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of consecutive seeds played per base seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Tuning preset id to start from
    #[arg(long)]
    preset: Option<String>,

    /// JSON file of tuning overrides, applied on top of the preset
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Overs per innings
    #[arg(long, default_value_t = DEFAULT_MAX_OVERS)]
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    max_overs: u16,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seed_tokens = split_csv(&args.seeds);
    let seeds = resolve_seed_inputs(&seed_tokens)?;
    let engine = build_engine(&args)?;
    let match_tester = MatchTester::new(engine, args.max_overs, args.verbose);

    let all_results = run_logic_scenarios(&args, &scenarios, &seeds, &match_tester);
    let records = gather_match_records(&args, &match_tester, &seeds)?;
    let aggregate = records.as_deref().and_then(aggregate_matches);

    write_reports(
        &args,
        &all_results,
        records.as_deref(),
        aggregate.as_ref(),
        start_time,
    )?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    writeln!(output_target.writer(), "Available presets:")?;
    for preset in TuningPreset::all() {
        writeln!(output_target.writer(), "  {:25} - {}", preset.id, preset.label)?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🏏 T20 Engine Automated Tester".bright_cyan().bold());
    println!("{}", "==============================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in ALL_SCENARIOS {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push((*key).to_string());
            }
        }
    }
    scenarios
}

/// Resolve `--preset` and `--tuning` into one override object.
fn tuning_overrides(args: &Args) -> Result<Value> {
    let mut overrides = Value::Object(serde_json::Map::new());
    if let Some(id) = args.preset.as_deref() {
        let Some(preset) = TuningPreset::find(id) else {
            bail!("Unknown preset: {id}");
        };
        merge_overrides(&mut overrides, &preset.overrides);
    }
    if let Some(path) = args.tuning.as_deref() {
        let file = load_json(path)?;
        if !file.is_object() {
            bail!("Tuning file {} must hold a JSON object", path.display());
        }
        merge_overrides(&mut overrides, &file);
    }
    Ok(overrides)
}

fn build_engine(args: &Args) -> Result<MatchEngine> {
    let overrides = tuning_overrides(args).context("resolving tuning")?;
    let (engine, report) = MatchEngine::from_overrides(&overrides);
    for fallback in report.rejected() {
        eprintln!(
            "⚠️  Tuning field {} fell back to its default ({:?})",
            fallback.field.yellow(),
            fallback.reason
        );
    }
    log::debug!(
        "tuning resolved with {} default fields",
        report.fallbacks.len()
    );
    Ok(engine)
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    match_tester: &MatchTester,
) -> Vec<logic::ScenarioResult> {
    let mut results: Vec<logic::ScenarioResult> = Vec::new();

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(match_tester.clone());

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(logic_tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

fn gather_match_records(
    args: &Args,
    match_tester: &MatchTester,
    seeds: &[u64],
) -> Result<Option<Vec<MatchRecord>>> {
    if !matches!(args.report.as_str(), "console" | "csv") {
        return Ok(None);
    }
    collect_match_records(match_tester, seeds, args.iterations).map(Some)
}

fn write_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    records: Option<&[MatchRecord]>,
    aggregate: Option<&MatchAggregate>,
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# T20 Engine Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        "csv" => {
            logic::reports::generate_csv_report(&mut output_target, records.unwrap_or(&[]))?;
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    aggregate,
                    duration,
                )?;
            }
        }
    }

    if args.report == "console" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
