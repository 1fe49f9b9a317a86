//! Summary of a single pool
//!
//! Prints descriptive statistics, empirical percentiles, the normal fit and a
//! text histogram for one event and category.

use clap::Args;
use cubestat_results::{estimate::get_estimate, pool::Pool};
use cubestat_stats::{histogram::Histogram, percentiles::Percentiles};

use crate::util::{TableArg, fmt_value};

const BAR_WIDTH: u64 = 40;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    pub table: TableArg,

    /// Event code (e.g. 333, 444bf, clock)
    #[arg(long)]
    pub event: String,

    /// Result category: single, average or best
    #[arg(long, default_value = "single")]
    pub category: String,

    /// Number of histogram bins
    #[arg(long, default_value_t = 10)]
    pub bins: usize,

    /// Percentile points to show (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [5.0, 25.0, 50.0, 75.0, 95.0])]
    pub percentiles: Vec<f64>,

    /// Include DNF, DNS and empty attempts in the pool
    #[arg(long)]
    pub keep_invalid: bool,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let raw_pool = table.gen_pool(&arg.event, &arg.category)?;
    let pool = if arg.keep_invalid {
        raw_pool.clone()
    } else {
        raw_pool.valid_only()
    };

    print_header(&pool, raw_pool.len());
    let Some(stats) = pool.summary() else {
        println!("  (no values)");
        return Ok(());
    };

    println!();
    println!(
        "  {:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Count", "Min", "Max", "Mean", "Median", "Std"
    );
    println!(
        "  {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
        stats.count, stats.min, stats.max, stats.mean, stats.median, stats.std_dev
    );

    let percentiles = Percentiles::from_sorted(&pool.sorted_values(), &arg.percentiles);
    println!();
    println!("  Percentiles:");
    for (p, value) in percentiles.iter() {
        println!("    P{p:<5} {value:>10.2}");
    }

    let estimate = get_estimate(pool);
    println!();
    println!(
        "  Normal fit: mean={} std={}",
        fmt_value(estimate.params.mean),
        fmt_value(estimate.params.std_dev)
    );

    println!();
    println!("  Histogram:");
    print_histogram(&estimate.pool.histogram(arg.bins));

    Ok(())
}

fn print_header(pool: &Pool, raw_len: usize) {
    println!(
        "{} {} ({})",
        pool.event,
        pool.category,
        pool.event.name()
    );
    println!("==========================================");
    println!("  {} values pooled, {raw_len} before filtering", pool.len());
}

fn print_histogram(histogram: &Histogram) {
    let max_count = histogram.max_count().max(1);
    for bin in &histogram.bins {
        let bar_len = bin.count * BAR_WIDTH / max_count;
        #[expect(clippy::cast_possible_truncation)]
        let bar = "#".repeat(bar_len as usize);
        println!(
            "    [{:>10.2}, {:>10.2}) {:>8} {bar}",
            bin.range.start, bin.range.end, bin.count
        );
    }
}
