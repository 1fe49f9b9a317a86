//! Tab-separated output of rank tables and evaluations.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    estimate::EstimateRecord,
    evaluation::Evaluation,
    event::{Category, EventId},
    rank::RankTable,
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SaveError {
    #[display("failed to create output file {}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[display("failed to write record")]
    Write { source: csv::Error },
    #[display("failed to flush output")]
    Flush { source: io::Error },
}

const RANK_HEADER: [&str; 6] = ["eventId", "category", "mean", "std", "level", "threshold"];

const EVALUATION_HEADER: [&str; 9] = [
    "personId",
    "personName",
    "personCountryId",
    "eventId",
    "category",
    "result",
    "zScore",
    "topPercent",
    "level",
];

const ESTIMATE_HEADER: [&str; 5] = ["eventId", "category", "samples", "mean", "std"];

#[derive(Debug, Serialize)]
struct RankRecord {
    event_id: EventId,
    category: Category,
    mean: f64,
    std: f64,
    level: f64,
    threshold: f64,
}

// The empirical top percent is only part of JSON reports.
#[derive(Debug, Serialize)]
struct EvaluationRecord<'a> {
    person_id: &'a str,
    person_name: &'a str,
    person_country_id: &'a str,
    event_id: EventId,
    category: Category,
    result: i64,
    z_score: f64,
    top_percent: f64,
    level: Option<f64>,
}

#[derive(Debug, Serialize)]
struct EstimateRow {
    event_id: EventId,
    category: Category,
    samples: usize,
    mean: f64,
    std: f64,
}

/// Writes fitted parameters as TSV, one line per event.
pub fn write_estimates<W>(writer: W, estimates: &[EstimateRecord]) -> Result<(), SaveError>
where
    W: io::Write,
{
    let records = estimates.iter().map(|estimate| EstimateRow {
        event_id: estimate.event,
        category: estimate.category,
        samples: estimate.samples,
        mean: estimate.mean,
        std: estimate.std_dev,
    });
    write_records(writer, &ESTIMATE_HEADER, records)
}

/// Writes rank tables as TSV, one line per rank level.
pub fn write_rank<W>(writer: W, ranks: &[RankTable]) -> Result<(), SaveError>
where
    W: io::Write,
{
    let records = ranks.iter().flat_map(|rank| {
        rank.levels.iter().map(move |level| RankRecord {
            event_id: rank.event,
            category: rank.category,
            mean: rank.params.mean,
            std: rank.params.std_dev,
            level: level.top_percent,
            threshold: level.threshold,
        })
    });
    write_records(writer, &RANK_HEADER, records)
}

/// Writes evaluations as TSV, one line per competitor and event.
pub fn write_evaluation_result<W>(writer: W, evaluations: &[Evaluation]) -> Result<(), SaveError>
where
    W: io::Write,
{
    let records = evaluations.iter().map(|evaluation| EvaluationRecord {
        person_id: &evaluation.person_id,
        person_name: &evaluation.person_name,
        person_country_id: &evaluation.person_country_id,
        event_id: evaluation.event_id,
        category: evaluation.category,
        result: evaluation.result,
        z_score: evaluation.z_score,
        top_percent: evaluation.top_percent,
        level: evaluation.level,
    });
    write_records(writer, &EVALUATION_HEADER, records)
}

/// Saves fitted parameters to `path`.
pub fn save_estimates<P>(path: P, estimates: &[EstimateRecord]) -> Result<(), SaveError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    write_estimates(create(path)?, estimates)?;
    log::info!("saved {} estimates to {}", estimates.len(), path.display());
    Ok(())
}

/// Saves rank tables to `path`.
pub fn save_rank<P>(path: P, ranks: &[RankTable]) -> Result<(), SaveError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    write_rank(create(path)?, ranks)?;
    log::info!("saved {} rank tables to {}", ranks.len(), path.display());
    Ok(())
}

/// Saves evaluations to `path`.
pub fn save_evaluation_result<P>(path: P, evaluations: &[Evaluation]) -> Result<(), SaveError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    write_evaluation_result(create(path)?, evaluations)?;
    log::info!(
        "saved {} evaluations to {}",
        evaluations.len(),
        path.display()
    );
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, SaveError> {
    let file = File::create(path).map_err(|source| SaveError::Create {
        path: path.to_owned(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

// The header is written up front so that empty outputs still carry it.
fn write_records<W, I>(writer: W, header: &[&str], records: I) -> Result<(), SaveError>
where
    W: io::Write,
    I: IntoIterator,
    I::Item: Serialize,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    writer
        .write_record(header)
        .map_err(|source| SaveError::Write { source })?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|source| SaveError::Write { source })?;
    }
    writer.flush().map_err(|source| SaveError::Flush { source })
}
