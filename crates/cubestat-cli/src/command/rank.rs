//! Rank thresholds per event

use clap::Args;
use cubestat_results::{
    estimate::get_estimate,
    rank::{self, RankTable},
    save,
};

use crate::util::{Output, OutputArg, OutputFormat, PoolArg, Report, TableArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct RankArg {
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

pub(crate) fn run(arg: &RankArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let category = arg.pool.category;
    let levels = rank::normalize_levels(&arg.levels)?;

    let mut ranks = Vec::<RankTable>::new();
    for event in arg.pool.events(&table) {
        let mut pool = table.pool(event, category);
        if !arg.pool.keep_invalid {
            pool = pool.valid_only();
        }
        if pool.is_empty() {
            log::warn!("no {category} results for event {event}, skipping");
            continue;
        }
        ranks.push(rank::gen_rank(&get_estimate(pool), &levels)?);
    }
    log::info!("generated rank tables for {} events", ranks.len());

    match (arg.output.format, &arg.output.output) {
        (OutputFormat::Json, path) => {
            let report = Report::new(&arg.table.table, category, &ranks);
            Output::save_json(&report, path.as_deref())?;
        }
        (OutputFormat::Tsv, Some(path)) => save::save_rank(path, &ranks)?,
        (OutputFormat::Tsv, None) => save::write_rank(Output::stdout(), &ranks)?,
    }
    Ok(())
}
