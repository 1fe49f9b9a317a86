//! Competitor evaluation
//!
//! Fits every requested event, derives its rank table and places each
//! competitor's personal best within the fitted distribution.

use clap::Args;
use cubestat_results::{
    evaluation::{self, EventAnalysis},
    rank, save,
};

use crate::util::{Output, OutputArg, OutputFormat, PoolArg, Report, TableArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct EvaluateArg {
    #[clap(flatten)]
    pub table: TableArg,

    #[clap(flatten)]
    pub pool: PoolArg,

    /// Rank levels in percent (comma-separated, each in the open interval 0..100)
    #[arg(long, value_delimiter = ',', default_values_t = rank::DEFAULT_LEVELS)]
    pub levels: Vec<f64>,

    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let category = arg.pool.category;
    let options = arg.pool.analysis_options(&arg.levels);

    let analyses = if arg.pool.events.is_empty() {
        evaluation::get_evaluation_all(&table, category, &options)?
    } else {
        let mut analyses = Vec::<EventAnalysis>::new();
        for &event in &arg.pool.events {
            if let Some(analysis) = evaluation::analyze_event(&table, event, category, &options)? {
                analyses.push(analysis);
            }
        }
        analyses
    };

    let evaluations = analyses
        .into_iter()
        .flat_map(|analysis| analysis.evaluations)
        .collect::<Vec<_>>();
    log::info!("evaluated {} competitor results", evaluations.len());

    match (arg.output.format, &arg.output.output) {
        (OutputFormat::Json, path) => {
            let report = Report::new(&arg.table.table, category, &evaluations);
            Output::save_json(&report, path.as_deref())?;
        }
        (OutputFormat::Tsv, Some(path)) => save::save_evaluation_result(path, &evaluations)?,
        (OutputFormat::Tsv, None) => save::write_evaluation_result(Output::stdout(), &evaluations)?,
    }
    Ok(())
}
