//! Rank an inventory batch from the command line
//!
//! Loads a CSV (or generates a deterministic sample batch), runs the crisp and
//! fuzzy TOPSIS pipeline, prints a summary and optionally writes the ranked
//! items as CSV or the full result as JSON.
//!
//! Usage: cargo run --bin rank_inventory -- --input items.csv --a 20 --b 50 --output ranked.csv

use anyhow::{Context, Result};
use clap::Parser;
use inventory_ranker::data::{load_inventory_csv, write_scored_csv};
use inventory_ranker::sample_data::DEFAULT_SAMPLE_SIZE;
use inventory_ranker::summary::summarize;
use inventory_ranker::telemetry;
use inventory_ranker::{
    generate_sample_data, AnalysisStore, Execution, InventoryScorer, JsonFileStore, Thresholds,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "rank_inventory",
    about = "ABC-classify inventory items with entropy-weighted crisp and fuzzy TOPSIS",
    version
)]
struct Cli {
    /// CSV file with one inventory item per row
    #[arg(long, required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<PathBuf>,
    /// Generate this many sample items instead of reading a file
    #[arg(long)]
    sample: Option<usize>,
    /// Percentage of items in class A
    #[arg(long, default_value_t = 20.0)]
    a: f64,
    /// Cumulative percentage of items in classes A and B
    #[arg(long, default_value_t = 50.0)]
    b: f64,
    /// Write ranked items as CSV
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write the full result (items and weights) as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Also save the analysis to a JSON store directory
    #[arg(long)]
    store_dir: Option<PathBuf>,
    /// Force parallel execution regardless of batch size
    #[arg(long)]
    parallel: bool,
    /// Number of top-ranked items to print
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    telemetry::init(telemetry::DEFAULT_FILTER)?;
    let cli = Cli::parse();

    let thresholds = Thresholds::new(cli.a, cli.b);
    thresholds.validate().context("Invalid thresholds")?;

    let items = match &cli.input {
        Some(path) => load_inventory_csv(path)?,
        None => generate_sample_data(cli.sample.unwrap_or(DEFAULT_SAMPLE_SIZE)),
    };

    let execution = if cli.parallel {
        Execution::Parallel
    } else {
        Execution::for_batch(items.len())
    };

    println!("{}", "=".repeat(70));
    println!("INVENTORY ABC ANALYSIS");
    println!("{}", "=".repeat(70));
    println!("Items: {}   Thresholds: A={}%, B={}%   Execution: {:?}\n", items.len(), cli.a, cli.b, execution);

    let start = Instant::now();
    let result = InventoryScorer::new(thresholds).process_with(&items, execution);
    let elapsed = start.elapsed();
    tracing::info!("Scored {} items in {:.3} ms", result.len(), elapsed.as_secs_f64() * 1000.0);

    let summary = summarize(&result);

    println!("Crisp weights:");
    for (key, w) in result.crisp_weights.entries() {
        println!("  {:<16} {:.4}", key, w);
    }
    println!("Fuzzy weights:");
    for (key, w) in result.fuzzy_weights.entries() {
        println!("  {:<16} {:.4}", key, w);
    }

    println!();
    println!("Class distribution (crisp): A={} B={} C={}",
        summary.crisp_distribution.a, summary.crisp_distribution.b, summary.crisp_distribution.c);
    println!("Class distribution (fuzzy): A={} B={} C={}",
        summary.fuzzy_distribution.a, summary.fuzzy_distribution.b, summary.fuzzy_distribution.c);
    println!("Crisp/fuzzy agreement: {:.1}%", summary.agreement_pct);
    println!("Dominant criterion: {} ({:.4})", summary.dominant_criterion.label, summary.dominant_criterion.weight);
    println!("Mean scores: crisp {:.4}, fuzzy {:.4}", summary.mean_crisp_score, summary.mean_fuzzy_score);

    if !result.is_empty() {
        println!();
        println!("{:>6}  {:<8} {:<12} {:>8} {:>8}  {:>5} {:>5}", "id", "Risk", "Demand", "TOPSIS", "Fuzzy", "Class", "Fuzzy");
        for s in result.scored.iter().take(cli.top) {
            println!(
                "{:>6}  {:<8} {:<12} {:>8.4} {:>8.4}  {:>5} {:>5}",
                s.id, s.record.risk, s.record.demand_fluctuation,
                s.topsis_score, s.fuzzy_topsis_score, s.class, s.fuzzy_class
            );
        }
    }

    if let Some(path) = &cli.output {
        write_scored_csv(path, &result.scored)?;
        println!("\nRanked CSV written to {}", path.display());
    }

    if let Some(path) = &cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("JSON result written to {}", path.display());
    }

    if let Some(dir) = &cli.store_dir {
        let store = JsonFileStore::open(dir)?;
        let stored = store.save(thresholds, &result)?;
        println!("Analysis saved as {} in {}", stored.id(), dir.display());
    }

    println!("{}", "=".repeat(70));
    println!("Total time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    println!("{}", "=".repeat(70));

    Ok(())
}
