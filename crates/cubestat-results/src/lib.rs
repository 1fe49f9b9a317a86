//! Normal-model statistics of speedcubing competition results.
//!
//! This crate turns a WCA/ACA result table into per-event distributions and
//! locates competitors within them.
//!
//! # Overview
//!
//! 1. **Load** ([`table::ResultTable`]): read a tab- or comma-separated result export
//! 2. **Pool** ([`pool::Pool`]): gather the values of one event and one
//!    [`event::Category`] (single attempts, averages or round bests)
//! 3. **Estimate** ([`estimate::get_estimate`]): fit a normal distribution to the pool
//! 4. **Rank** ([`rank::gen_rank`]): derive result thresholds for percentile levels
//! 5. **Evaluate** ([`evaluation::get_evaluation`]): place each competitor's personal
//!    best within the fitted distribution
//! 6. **Save** ([`save`]): write rank tables and evaluations as TSV
//!
//! # Example
//!
//! ```
//! use cubestat_results::{estimate::get_estimate, rank::gen_rank, table::ResultTable};
//!
//! let tsv = "\
//! competitionId\teventId\troundTypeId\tpos\tbest\taverage\tpersonName\tpersonId\tpersonCountryId\tformatId\tvalue1\tvalue2\tvalue3\tvalue4\tvalue5
//! Open2024\tpyram\tf\t1\t301\t402\tAlice\t2020ALIC01\tUSA\ta\t390\t301\t455\t410\t406
//! Open2024\tpyram\tf\t2\t350\t480\tBob\t2021BOBB01\tPeru\ta\t512\t350\t470\t466\t505
//! ";
//! let table = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap();
//!
//! let pool = table.gen_pool("pyram", "single").unwrap();
//! assert_eq!(pool.len(), 10);
//!
//! let estimate = get_estimate(pool.valid_only());
//! let rank = gen_rank(&estimate, &[10.0, 50.0, 90.0]).unwrap();
//! assert!(rank.levels[0].threshold < rank.levels[2].threshold);
//! ```

pub mod estimate;
pub mod evaluation;
pub mod event;
pub mod pool;
pub mod rank;
pub mod save;
pub mod table;
