//! Normal fit per event

use clap::Args;
use cubestat_results::{
    estimate::{EstimateRecord, get_estimate},
    save,
};

use crate::util::{Output, OutputArg, OutputFormat, PoolArg, Report, TableArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct EstimateArg {
    #[clap(flatten)]
    pub table: TableArg,

    #[clap(flatten)]
    pub pool: PoolArg,

    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &EstimateArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let category = arg.pool.category;

    let mut records = Vec::<EstimateRecord>::new();
    for event in arg.pool.events(&table) {
        let mut pool = table.pool(event, category);
        if !arg.pool.keep_invalid {
            pool = pool.valid_only();
        }
        if pool.is_empty() {
            log::warn!("no {category} results for event {event}, skipping");
            continue;
        }
        let record = get_estimate(pool).to_record();
        log::info!(
            "{event} {category}: {} values, mean={:.2} std={:.2}",
            record.samples,
            record.mean,
            record.std_dev
        );
        records.push(record);
    }

    match (arg.output.format, &arg.output.output) {
        (OutputFormat::Json, path) => {
            let report = Report::new(&arg.table.table, category, &records);
            Output::save_json(&report, path.as_deref())?;
        }
        (OutputFormat::Tsv, Some(path)) => save::save_estimates(path, &records)?,
        (OutputFormat::Tsv, None) => save::write_estimates(Output::stdout(), &records)?,
    }
    Ok(())
}
