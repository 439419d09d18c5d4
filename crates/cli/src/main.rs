//! Multithreaded-core simulator CLI.
//!
//! This binary runs one program image under both multithreading disciplines
//! and reports the results. It performs:
//! 1. **Image run:** Load a text image, drive a blocked and a fine-grained
//!    run over it, and print each thread's register file and each policy's
//!    CPI.
//! 2. **Overrides:** Layer a JSON configuration file and individual flags
//!    over the image's directives.
//! 3. **Reports:** Human-readable text by default, one JSON document with
//!    `--json`.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use serde::Serialize;

use mtsim_core::common::RegisterFile;
use mtsim_core::config::SimConfig;
use mtsim_core::sim::loader;
use mtsim_core::stats::RunStats;
use mtsim_core::{Policy, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "mtsim",
    author,
    version,
    about = "Cycle-accurate blocked vs. fine-grained multithreading simulator",
    long_about = "Run a program image under both hardware multithreading disciplines and \
compare their CPI.\n\nExamples:\n  mtsim run -f demos/duel.img\n  mtsim run -f demos/duel.img --switch-penalty 8 --json\n  mtsim demos/duel.img"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an image under both policies and print the results.
    Run {
        /// Program image to simulate.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration layered under the image's directives.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the thread count (threads without a stream halt at once).
        #[arg(long)]
        threads: Option<usize>,

        /// Override the LOAD latency in cycles.
        #[arg(long)]
        load_latency: Option<u64>,

        /// Override the STORE latency in cycles.
        #[arg(long)]
        store_latency: Option<u64>,

        /// Override the blocked-mode context-switch penalty in cycles.
        #[arg(long)]
        switch_penalty: Option<u64>,

        /// Emit one JSON report instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Per-policy slice of the JSON report.
#[derive(Serialize)]
struct PolicyReport {
    stats: RunStats,
    cpi: Option<f64>,
    threads: Vec<RegisterFile>,
}

/// Complete JSON report for one image.
#[derive(Serialize)]
struct Report {
    config: SimConfig,
    blocked: PolicyReport,
    fine_grained: PolicyReport,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Bare image path: `mtsim demos/duel.img` is a run with defaults.
    // Checked before clap, which would otherwise reject it as an unknown
    // subcommand.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [path] = args.as_slice() {
        if !path.starts_with('-') && path != "run" {
            cmd_run(std::path::Path::new(path), None, None, None, None, None, false);
            return;
        }
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            file,
            config,
            threads,
            load_latency,
            store_latency,
            switch_penalty,
            json,
        }) => cmd_run(
            &file,
            config.as_deref(),
            threads,
            load_latency,
            store_latency,
            switch_penalty,
            json,
        ),
        None => {
            eprintln!("mtsim — pass a subcommand or an image path");
            eprintln!();
            eprintln!("  mtsim run -f <image>       Run under both policies");
            eprintln!("  mtsim <image>              Same, with defaults");
            eprintln!();
            eprintln!("  mtsim --help  for full options");
            process::exit(1);
        }
    }
}

/// Runs the image under both policies and prints the report.
fn cmd_run(
    file: &std::path::Path,
    config_path: Option<&std::path::Path>,
    threads: Option<usize>,
    load_latency: Option<u64>,
    store_latency: Option<u64>,
    switch_penalty: Option<u64>,
    json: bool,
) {
    let base = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {e}", path.display());
                process::exit(1);
            });
            SimConfig::from_json(&text).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: {e}");
                process::exit(1);
            })
        }
        None => SimConfig::default(),
    };

    let mut image = loader::load_image(file, base).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    if let Some(n) = threads {
        image.config.threads = n;
    }
    if let Some(cycles) = load_latency {
        image.config.load_latency = cycles;
    }
    if let Some(cycles) = store_latency {
        image.config.store_latency = cycles;
    }
    if let Some(cycles) = switch_penalty {
        image.config.switch_penalty = cycles;
    }

    let mut sim = Simulator::new(image.config, image.program, image.data).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    let blocked_stats = sim.run_blocked();
    let finegrained_stats = sim.run_finegrained();

    if json {
        print_json(&sim, blocked_stats, finegrained_stats);
    } else {
        print_text(&sim, file, blocked_stats, finegrained_stats);
    }
}

fn print_text(
    sim: &Simulator,
    file: &std::path::Path,
    blocked: RunStats,
    finegrained: RunStats,
) {
    let config = sim.config();
    println!("[*] image: {}", file.display());
    println!(
        "    threads: {}  load latency: {}  store latency: {}  switch penalty: {}",
        config.threads, config.load_latency, config.store_latency, config.switch_penalty
    );

    print_policy(sim, Policy::Blocked, "Blocked MT", blocked);
    print_policy(sim, Policy::FineGrained, "Fine-grained MT", finegrained);
}

fn print_policy(sim: &Simulator, policy: Policy, label: &str, stats: RunStats) {
    println!();
    println!("---- {label} simulation ----");
    for tid in 0..sim.config().threads {
        println!();
        println!("Register file thread id {tid}:");
        match sim.thread_context(policy, tid) {
            Ok(context) => {
                let regs = context.as_array();
                let rendered: Vec<String> = regs
                    .iter()
                    .enumerate()
                    .map(|(i, val)| format!("R{i} = {:#x}", *val as u32))
                    .collect();
                println!("    {}", rendered.join("  "));
            }
            Err(e) => println!("    <unavailable: {e}>"),
        }
    }
    println!();
    match stats.cpi() {
        Ok(cpi) => println!("{label} CPI for this program: {cpi:.6}"),
        Err(_) => println!("{label} CPI for this program: undefined (nothing retired)"),
    }
    stats.print(label);
}

fn print_json(sim: &Simulator, blocked: RunStats, finegrained: RunStats) {
    let report = Report {
        config: sim.config().clone(),
        blocked: policy_report(sim, Policy::Blocked, blocked),
        fine_grained: policy_report(sim, Policy::FineGrained, finegrained),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("[!] FATAL: could not serialize report: {e}");
            process::exit(1);
        }
    }
}

fn policy_report(sim: &Simulator, policy: Policy, stats: RunStats) -> PolicyReport {
    let threads = (0..sim.config().threads)
        .filter_map(|tid| sim.thread_context(policy, tid).ok())
        .collect();
    PolicyReport {
        stats,
        cpi: stats.cpi().ok(),
        threads,
    }
}
