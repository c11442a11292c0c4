//! Interactive front end for the tandem-queue simulator
//!
//! Prompts for the three network probabilities (an empty first answer keeps
//! the defaults 0.75 / 0.70 / 0.65), runs the simulation for the requested
//! number of ticks, and prints the state probabilities and derived
//! parameters.
//!
//! Flags:
//! - `--ticks N`  number of ticks to simulate (default 1,000,000)
//! - `--seed N`   RNG seed (default 12345)
//! - `--json`     emit the report as JSON instead of text

use std::io::{self, BufRead, Write};
use std::process;

use queuing_simulator_core_rs::{Simulation, SimulationConfig, SimulationReport, XorShiftRng};

const DEFAULT_TICKS: u64 = 1_000_000;
const DEFAULT_SEED: u64 = 12345;

struct Options {
    ticks: u64,
    seed: u64,
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let config = prompt_config(&mut lines)?;

    println!("Calculating...");
    let mut sim = Simulation::new(config, XorShiftRng::new(options.seed))?;
    sim.run(options.ticks)?;

    let report = sim.report();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn parse_args() -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options {
        ticks: DEFAULT_TICKS,
        seed: DEFAULT_SEED,
        json: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = args.next().ok_or("--ticks requires a value")?;
                options.ticks = value.parse()?;
            }
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                options.seed = value.parse()?;
            }
            "--json" => options.json = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("unknown argument '{}'", other).into()),
        }
    }
    Ok(options)
}

fn print_usage() {
    println!("queuing-simulator [--ticks N] [--seed N] [--json]");
    println!();
    println!("  --ticks N  number of ticks to simulate (default {})", DEFAULT_TICKS);
    println!("  --seed N   RNG seed (default {})", DEFAULT_SEED);
    println!("  --json     emit the report as JSON");
}

/// Prompt for the three probabilities. An empty first answer keeps all
/// defaults, matching the classic interactive flow.
fn prompt_config(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let defaults = SimulationConfig::default();
    println!(
        "Enter values: (print nothing to set source idle = {}, stage1 fail = {}, stage2 fail = {})",
        defaults.source_idle_prob, defaults.stage1_fail_prob, defaults.stage2_fail_prob
    );

    let first = prompt(lines, "source idle prob = ")?;
    if first.is_empty() {
        return Ok(defaults);
    }

    let source_idle_prob: f64 = first.parse()?;
    let stage1_fail_prob: f64 = prompt(lines, "stage1 fail prob = ")?.parse()?;
    let stage2_fail_prob: f64 = prompt(lines, "stage2 fail prob = ")?.parse()?;

    let config = SimulationConfig {
        source_idle_prob,
        stage1_fail_prob,
        stage2_fail_prob,
    };
    config.validate()?;
    Ok(config)
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", label);
    io::stdout().flush()?;
    let line = lines.next().unwrap_or(Ok(String::new()))?;
    Ok(line.trim().to_string())
}

fn print_report(report: &SimulationReport) {
    println!();
    println!("========= Probabilities: ===========");
    for entry in &report.state_probabilities {
        println!("P{} = {}", entry.state, entry.probability);
    }

    println!();
    println!("=========== Parameters: ============");
    println!("L queue = {}", report.queue_average_length);
    println!("Q = {}", report.relative_throughput);
    println!("Wc = {}", report.average_sojourn_time);
}
