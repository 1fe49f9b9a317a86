use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use self::{
    estimate::EstimateArg, evaluate::EvaluateArg, rank::RankArg, summary::SummaryArg,
};

mod estimate;
mod evaluate;
mod rank;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Show descriptive statistics, percentiles and a histogram of one pool
    Summary(#[clap(flatten)] SummaryArg),
    /// Fit a normal distribution to the pool of each event
    Estimate(#[clap(flatten)] EstimateArg),
    /// Compute result thresholds of rank levels for each event
    Rank(#[clap(flatten)] RankArg),
    /// Place every competitor's personal best within the fitted distribution
    Evaluate(#[clap(flatten)] EvaluateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(&args);
    match &args.mode {
        Mode::Summary(arg) => summary::run(arg)?,
        Mode::Estimate(arg) => estimate::run(arg)?,
        Mode::Rank(arg) => rank::run(arg)?,
        Mode::Evaluate(arg) => evaluate::run(arg)?,
    }
    Ok(())
}

fn init_logger(args: &CommandArgs) {
    let level = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    // RUST_LOG, when set, takes precedence over the flags
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate() {
        let args = CommandArgs::try_parse_from([
            "cubestat",
            "-v",
            "evaluate",
            "results.tsv",
            "--event",
            "333,444bf",
            "--category",
            "average",
            "--levels",
            "5,50",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        let Mode::Evaluate(arg) = args.mode else {
            panic!("expected evaluate");
        };
        assert_eq!(arg.pool.events.len(), 2);
        assert_eq!(arg.levels, vec![5.0, 50.0]);
    }

    #[test]
    fn test_rejects_unknown_event() {
        let result = CommandArgs::try_parse_from([
            "cubestat",
            "estimate",
            "results.tsv",
            "--event",
            "333mts",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result =
            CommandArgs::try_parse_from(["cubestat", "-q", "-v", "summary", "r.tsv", "--event", "333"]);
        assert!(result.is_err());
    }
}
