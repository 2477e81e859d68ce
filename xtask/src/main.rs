use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "abool workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the flag benchmarks and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Model-check the flag under loom
    Loom {
        /// Bound on preemptions loom explores per execution
        #[arg(long, default_value_t = 3)]
        max_preemptions: usize,
    },
}

const BENCH: &str = "flag_benchmark";
const BASELINE: &str = "latest";
const REPORT_PATH: &str = "benchmark_results/report.md";

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// group -> implementation -> mean time per iteration in nanoseconds
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Loom { max_preemptions } => run_loom(max_preemptions)?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!(">>> Running {BENCH}...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("bench").arg("--bench").arg(BENCH);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    cmd.arg("--save-baseline").arg(BASELINE);

    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to run bench {BENCH}"))?;
    if !status.success() {
        anyhow::bail!("Benchmark {BENCH} failed");
    }

    println!("Finished {BENCH} in {:.2?}", start.elapsed());
    Ok(())
}

fn run_loom(max_preemptions: usize) -> Result<()> {
    println!(">>> Model-checking with loom (max preemptions: {max_preemptions})...");

    let status = Command::new("cargo")
        .env("RUSTFLAGS", "--cfg loom")
        .env("LOOM_MAX_PREEMPTIONS", max_preemptions.to_string())
        .args(["test", "--test", "loom_flag", "--release"])
        .status()
        .context("Failed to run loom tests")?;
    if !status.success() {
        anyhow::bail!("Loom model check failed");
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new(REPORT_PATH);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;
    write_report(&mut file, &results)?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn write_report(out: &mut impl Write, results: &Results) -> Result<()> {
    writeln!(out, "# AtomicFlag Benchmark Report")?;
    writeln!(out)?;

    let implementations: BTreeSet<&str> = results
        .values()
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();

    // Header
    write!(out, "| Operation |")?;
    for name in &implementations {
        write!(out, " {name} (ns/op) | vs atomic_flag |")?;
    }
    writeln!(out)?;

    // Separator
    write!(out, "|---|")?;
    for _ in &implementations {
        write!(out, "---|---|")?;
    }
    writeln!(out)?;

    // Rows
    for (group, timings) in results {
        write!(out, "| {group} |")?;

        let flag_ns = timings.get("atomic_flag").copied().unwrap_or(0.0);

        for name in &implementations {
            if let Some(ns) = timings.get(*name) {
                let rel = if flag_ns > 0.0 { ns / flag_ns } else { 0.0 };
                write!(out, " {ns:.2} | **{rel:.2}x** |")?;
            } else {
                write!(out, " N/A | - |")?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Walks `target/criterion/<group>/<implementation>/<baseline>/estimates.json`.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some((group, implementation)) = classify(&path) else {
            continue;
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let estimates: Estimates = serde_json::from_str(&content)
            .with_context(|| format!("Malformed estimates in {}", path.display()))?;

        if estimates.mean.point_estimate > 0.0 {
            results
                .entry(group)
                .or_default()
                .insert(implementation, estimates.mean.point_estimate);
        }
    }

    Ok(())
}

fn classify(estimates: &Path) -> Option<(String, String)> {
    let baseline_dir = estimates.parent()?;
    if baseline_dir.file_name()?.to_str()? != BASELINE {
        return None;
    }
    let implementation_dir = baseline_dir.parent()?;
    let group_dir = implementation_dir.parent()?;

    let implementation = implementation_dir.file_name()?.to_str()?.to_string();
    let group = group_dir.file_name()?.to_str()?.to_string();

    // Filter out criterion's own 'report' directories
    if implementation == "report" || group == "report" {
        return None;
    }
    Some((group, implementation))
}
