//! Evaluation of competitors against a fitted distribution.
//!
//! Each competitor is represented by their personal best in the evaluated
//! category: the smallest valid single attempt, round average or round best.
//! That result is located within the fitted distribution of the event.

use std::collections::BTreeMap;

use cubestat_stats::percentiles;
use serde::Serialize;

use crate::{
    estimate::{Estimate, get_estimate},
    event::{Category, EventId},
    rank::{RankError, RankTable, gen_rank},
    table::{ResultRow, ResultTable, is_valid_result},
};

/// Where one competitor's personal best lies in the fitted distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub person_id: String,
    pub person_name: String,
    pub person_country_id: String,
    pub event_id: EventId,
    pub category: Category,
    /// Personal best in the category.
    pub result: i64,
    pub z_score: f64,
    /// Share of the fitted distribution, in percent, at or below `result`.
    pub top_percent: f64,
    /// Share of the pooled values, in percent, at or below `result`.
    pub empirical_top_percent: f64,
    /// Tightest rank level the result meets.
    pub level: Option<f64>,
}

/// Everything computed for one event: the fit, its rank table and the
/// evaluation of every competitor.
#[derive(Debug, Clone)]
pub struct EventAnalysis {
    pub estimate: Estimate,
    pub rank: RankTable,
    pub evaluations: Vec<Evaluation>,
}

/// Options shared by whole-table analyses.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Rank levels in percent.
    pub levels: Vec<f64>,
    /// Fit on the raw pool, including DNF, DNS and empty attempts.
    pub keep_invalid: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            levels: crate::rank::DEFAULT_LEVELS.to_vec(),
            keep_invalid: false,
        }
    }
}

/// Evaluates every competitor of the estimate's event and category.
///
/// Competitors without a valid result are left out. The output is sorted by
/// result, ties broken by person id.
#[must_use]
pub fn get_evaluation(table: &ResultTable, estimate: &Estimate, rank: &RankTable) -> Vec<Evaluation> {
    let event = estimate.event();
    let category = estimate.category();
    let sorted_pool = estimate.pool.sorted_values();

    let mut evaluations = personal_bests(table, event, category)
        .into_values()
        .map(|(result, row)| {
            #[expect(clippy::cast_precision_loss)]
            let value = result as f64;
            Evaluation {
                person_id: row.person_id.clone(),
                person_name: row.person_name.clone(),
                person_country_id: row.person_country_id.clone(),
                event_id: event,
                category,
                result,
                z_score: estimate.rv.z_score(value),
                top_percent: estimate.rv.cdf(value) * 100.0,
                empirical_top_percent: percentiles::percentile_rank(&sorted_pool, value),
                level: rank.level_for(value),
            }
        })
        .collect::<Vec<_>>();
    evaluations.sort_by(|a, b| {
        a.result
            .cmp(&b.result)
            .then_with(|| a.person_id.cmp(&b.person_id))
    });

    log::debug!(
        "evaluated {} competitors for {event} {category}",
        evaluations.len()
    );
    evaluations
}

/// Fits, ranks and evaluates one event.
///
/// Returns `None` when the event has no values to fit.
pub fn analyze_event(
    table: &ResultTable,
    event: EventId,
    category: Category,
    options: &AnalysisOptions,
) -> Result<Option<EventAnalysis>, RankError> {
    let mut pool = table.pool(event, category);
    if !options.keep_invalid {
        pool = pool.valid_only();
    }
    if pool.is_empty() {
        log::warn!("no {category} results to fit for event {event}, skipping");
        return Ok(None);
    }
    let estimate = get_estimate(pool);
    let rank = gen_rank(&estimate, &options.levels)?;
    let evaluations = get_evaluation(table, &estimate, &rank);
    Ok(Some(EventAnalysis {
        estimate,
        rank,
        evaluations,
    }))
}

/// Fits, ranks and evaluates every recognised event present in the table.
///
/// Events are processed in order of first appearance; events without values
/// to fit are skipped.
pub fn get_evaluation_all(
    table: &ResultTable,
    category: Category,
    options: &AnalysisOptions,
) -> Result<Vec<EventAnalysis>, RankError> {
    let mut analyses = Vec::new();
    for event in table.events() {
        if let Some(analysis) = analyze_event(table, event, category, options)? {
            log::info!(
                "{event} {category}: {} values, mean={:.2} std={:.2}, {} competitors",
                analysis.estimate.pool.len(),
                analysis.estimate.params.mean,
                analysis.estimate.params.std_dev,
                analysis.evaluations.len()
            );
            analyses.push(analysis);
        }
    }
    Ok(analyses)
}

/// Smallest valid result per person, keyed by person id.
fn personal_bests<'a>(
    table: &'a ResultTable,
    event: EventId,
    category: Category,
) -> BTreeMap<&'a str, (i64, &'a ResultRow)> {
    let mut bests = BTreeMap::<&str, (i64, &ResultRow)>::new();
    for row in table.rows_for_event(event) {
        let Some(best) = row
            .category_values(category)
            .filter(|value| is_valid_result(*value))
            .min()
        else {
            continue;
        };
        bests
            .entry(row.person_id.as_str())
            .and_modify(|entry| {
                if best < entry.0 {
                    *entry = (best, row);
                }
            })
            .or_insert((best, row));
    }
    bests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::sample_table;

    #[test]
    fn test_personal_best_single() {
        let table = sample_table();
        let bests = personal_bests(&table, EventId::Cube3, Category::Single);
        assert_eq!(bests.len(), 2);
        assert_eq!(bests["2019SMIT01"].0, 790);
        assert_eq!(bests["2020JONE02"].0, 1003);
    }

    #[test]
    fn test_invalid_results_never_count() {
        let table = sample_table();
        let bests = personal_bests(&table, EventId::Cube3Blindfolded, Category::Average);
        assert!(bests.is_empty());
        let bests = personal_bests(&table, EventId::Cube3Blindfolded, Category::Single);
        assert_eq!(bests["2020JONE02"].0, 4512);
    }

    #[test]
    fn test_evaluation_order_and_ranges() {
        let table = sample_table();
        let analysis = analyze_event(
            &table,
            EventId::Cube3,
            Category::Single,
            &AnalysisOptions::default(),
        )
        .unwrap()
        .unwrap();

        // The DNF attempt is dropped before fitting
        assert_eq!(analysis.estimate.pool.len(), 14);

        let evaluations = &analysis.evaluations;
        assert_eq!(evaluations.len(), 2);
        assert_eq!(evaluations[0].person_name, "Alice Smith");
        assert_eq!(evaluations[0].result, 790);
        assert!(evaluations[0].top_percent < evaluations[1].top_percent);
        assert!(evaluations[0].z_score < 0.0);
        for evaluation in evaluations {
            assert!((0.0..=100.0).contains(&evaluation.top_percent));
            assert!((0.0..=100.0).contains(&evaluation.empirical_top_percent));
        }
        assert!((evaluations[0].empirical_top_percent - 100.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_keep_invalid_changes_fit() {
        let table = sample_table();
        let options = AnalysisOptions {
            keep_invalid: true,
            ..AnalysisOptions::default()
        };
        let analysis = analyze_event(&table, EventId::Cube3, Category::Single, &options)
            .unwrap()
            .unwrap();
        assert_eq!(analysis.estimate.pool.len(), 15);
    }

    #[test]
    fn test_evaluation_all_skips_empty_events() {
        let table = sample_table();
        let analyses =
            get_evaluation_all(&table, Category::Average, &AnalysisOptions::default()).unwrap();
        let events = analyses
            .iter()
            .map(|a| a.estimate.event())
            .collect::<Vec<_>>();
        assert_eq!(events, vec![EventId::Cube3, EventId::Cube2]);
        assert_eq!(analyses[1].evaluations.len(), 1);
    }

    #[test]
    fn test_evaluation_all_rejects_bad_levels() {
        let table = sample_table();
        let options = AnalysisOptions {
            levels: vec![150.0],
            keep_invalid: false,
        };
        assert!(get_evaluation_all(&table, Category::Best, &options).is_err());
    }

    #[test]
    fn test_single_competitor_point_mass() {
        let table = sample_table();
        let analysis = analyze_event(
            &table,
            EventId::Cube2,
            Category::Best,
            &AnalysisOptions::default(),
        )
        .unwrap()
        .unwrap();
        let evaluation = &analysis.evaluations[0];
        assert_eq!(evaluation.result, 210);
        assert_eq!(evaluation.top_percent, 100.0);
        assert_eq!(evaluation.level, Some(1.0));
    }
}
