//! Loading of competition result tables.
//!
//! A result table is a delimited text file (tab-separated by default) with a
//! header row. The columns used here are those of the WCA results export:
//!
//! ```text
//! competitionId  eventId  roundTypeId  pos  best  average  personName  personId
//! personCountryId  formatId  value1  value2  value3  value4  value5
//! ```
//!
//! Additional columns are accepted and ignored. Result values are integers
//! (centiseconds for timed events); `0` means no attempt, `-1` a DNF and `-2`
//! a DNS. Empty cells are read as missing.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::event::{Category, EventId};

/// Columns that must be present in the header.
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "competitionId",
    "eventId",
    "roundTypeId",
    "pos",
    "best",
    "average",
    "personName",
    "personId",
    "personCountryId",
    "formatId",
    "value1",
    "value2",
    "value3",
    "value4",
    "value5",
];

/// A single competition result, one row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    #[serde(alias = "CompetitionId")]
    pub competition_id: String,
    /// Event code; kept as text so rows of unrecognised events still load.
    pub event_id: String,
    pub round_type_id: String,
    pub pos: u32,
    pub best: Option<i64>,
    pub average: Option<i64>,
    pub person_name: String,
    pub person_id: String,
    pub person_country_id: String,
    pub format_id: String,
    pub value1: Option<i64>,
    pub value2: Option<i64>,
    pub value3: Option<i64>,
    pub value4: Option<i64>,
    pub value5: Option<i64>,
}

impl ResultRow {
    /// The five per-attempt values in column order.
    #[must_use]
    pub fn values(&self) -> [Option<i64>; 5] {
        [
            self.value1,
            self.value2,
            self.value3,
            self.value4,
            self.value5,
        ]
    }

    /// Whether this row belongs to `event`.
    #[must_use]
    pub fn is_event(&self, event: EventId) -> bool {
        self.event_id == event.code()
    }

    /// Present values of the columns backing `category`, in column order.
    pub fn category_values(&self, category: Category) -> impl Iterator<Item = i64> + use<> {
        let values = match category {
            Category::Single => self.values(),
            Category::Average => [self.average, None, None, None, None],
            Category::Best => [self.best, None, None, None, None],
        };
        values.into_iter().flatten()
    }
}

/// Returns `true` for values that represent an actual result.
///
/// Zero and negative values encode "no attempt", DNF and DNS.
#[must_use]
pub fn is_valid_result(value: i64) -> bool {
    value > 0
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open result table {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read result table header")]
    Header { source: csv::Error },
    #[display("result table is missing column '{column}'")]
    MissingColumn { column: &'static str },
    #[display("malformed result table row {row}")]
    Row { row: usize, source: csv::Error },
}

/// An in-memory competition result table.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub const DEFAULT_DELIMITER: u8 = b'\t';

    /// Loads a table, choosing the delimiter from the file extension.
    ///
    /// `.csv` files are read comma-separated, everything else tab-separated.
    pub fn load<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let delimiter = if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            b','
        } else {
            Self::DEFAULT_DELIMITER
        };
        Self::load_with_delimiter(path, delimiter)
    }

    pub fn load_with_delimiter<P>(path: P, delimiter: u8) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file), delimiter)?;
        log::info!(
            "loaded {} results from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Loads a table, reporting any failure through the log instead of
    /// returning it.
    ///
    /// Callers must check for `None` before proceeding.
    pub fn load_or_report<P>(path: P) -> Option<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(table) => Some(table),
            Err(err) => {
                log::error!("the result table {} cannot be loaded: {err}", path.display());
                None
            }
        }
    }

    /// Reads a table from any reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubestat_results::table::ResultTable;
    ///
    /// let tsv = "\
    /// competitionId\teventId\troundTypeId\tpos\tbest\taverage\tpersonName\tpersonId\tpersonCountryId\tformatId\tvalue1\tvalue2\tvalue3\tvalue4\tvalue5
    /// Open2024\t333\tf\t1\t812\t905\tAlice\t2020ALIC01\tUSA\ta\t950\t812\t901\t864\t1020
    /// ";
    /// let table = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap();
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.rows()[0].person_name, "Alice");
    /// ```
    pub fn from_reader<R>(reader: R, delimiter: u8) -> Result<Self, LoadError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = reader
            .headers()
            .map_err(|source| LoadError::Header { source })?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        for column in REQUIRED_COLUMNS {
            let present = columns.iter().any(|c| {
                c == column || (column == "competitionId" && c == "CompetitionId")
            });
            if !present {
                return Err(LoadError::MissingColumn { column });
            }
        }

        let rows = reader
            .deserialize()
            .enumerate()
            .map(|(idx, row)| row.map_err(|source| LoadError::Row { row: idx + 1, source }))
            .collect::<Result<Vec<ResultRow>, _>>()?;

        Ok(Self { columns, rows })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header column names, in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Rows of `event`, in table order.
    pub fn rows_for_event(&self, event: EventId) -> impl Iterator<Item = &ResultRow> + '_ {
        self.rows.iter().filter(move |row| row.is_event(event))
    }

    /// Recognised events present in the table, in order of first appearance.
    ///
    /// Rows with unrecognised event codes are skipped.
    #[must_use]
    pub fn events(&self) -> Vec<EventId> {
        let mut events = Vec::new();
        for row in &self.rows {
            let Ok(event) = row.event_id.parse::<EventId>() else {
                continue;
            };
            if !events.contains(&event) {
                events.push(event);
            }
        }
        events
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write as _;

    use super::*;

    pub(crate) const HEADER: &str = "competitionId\teventId\troundTypeId\tpos\tbest\taverage\tpersonName\tpersonId\tpersonCountryId\tformatId\tvalue1\tvalue2\tvalue3\tvalue4\tvalue5";

    pub(crate) const SAMPLE: &str = "\
competitionId\teventId\troundTypeId\tpos\tbest\taverage\tpersonName\tpersonId\tpersonCountryId\tformatId\tvalue1\tvalue2\tvalue3\tvalue4\tvalue5
Spring2024\t333\t1\t1\t812\t905\tAlice Smith\t2019SMIT01\tUSA\ta\t950\t812\t901\t864\t1020
Spring2024\t333\t1\t2\t1003\t1100\tBob Jones\t2020JONE02\tCanada\ta\t1003\t1150\t1098\t-1\t1052
Spring2024\t333\tf\t1\t790\t880\tAlice Smith\t2019SMIT01\tUSA\ta\t880\t790\t870\t905\t866
Spring2024\t222\tf\t1\t210\t298\tCarol Wu\t2021WUCA01\tChina\ta\t310\t210\t285\t299\t301
Spring2024\t333bf\tf\t1\t4512\t-1\tBob Jones\t2020JONE02\tCanada\t3\t-1\t4512\t-1\t0\t0
Spring2024\t333mts\tf\t1\t2500\t2700\tCarol Wu\t2021WUCA01\tChina\ta\t2500\t2700\t2800\t2650\t2900
";

    pub(crate) fn sample_table() -> ResultTable {
        ResultTable::from_reader(SAMPLE.as_bytes(), b'\t').unwrap()
    }

    #[test]
    fn test_load_two_rows() {
        let tsv = format!(
            "{HEADER}\nComp\t333\tf\t1\t700\t800\tA\t1\tX\ta\t1\t2\t3\t4\t5\nComp\t444\tf\t1\t700\t800\tB\t2\tY\ta\t1\t2\t3\t4\t5\n"
        );
        let table = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), REQUIRED_COLUMNS);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let table = ResultTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.rows()[1].value4, Some(-1));
    }

    #[test]
    fn test_load_csv_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.replace('\t', ",").as_bytes()).unwrap();
        let table = ResultTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.tsv");
        assert!(matches!(
            ResultTable::load(&path),
            Err(LoadError::Open { .. })
        ));
        assert!(ResultTable::load_or_report(&path).is_none());
    }

    #[test]
    fn test_missing_column() {
        let tsv = "competitionId\teventId\nComp\t333\n";
        let err = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "roundTypeId" }));
    }

    #[test]
    fn test_malformed_row() {
        let tsv = format!("{HEADER}\nComp\t333\tf\tfirst\t700\t800\tA\t1\tX\ta\t1\t2\t3\t4\t5\n");
        let err = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap_err();
        assert!(matches!(err, LoadError::Row { row: 1, .. }));
    }

    #[test]
    fn test_capitalised_competition_column_and_extra_columns() {
        let tsv = format!(
            "Competition{}\tnote\nComp\t333\tf\t1\t700\t800\tA\t1\tX\ta\t1\t2\t3\t4\t5\thello\n",
            &HEADER["competition".len()..]
        );
        let table = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].competition_id, "Comp");
        assert_eq!(table.columns().last().map(String::as_str), Some("note"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let tsv = format!("{HEADER}\nComp\t333\tf\t1\t700\t\tA\t1\tX\t1\t700\t\t\t\t\n");
        let table = ResultTable::from_reader(tsv.as_bytes(), b'\t').unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.average, None);
        assert_eq!(row.values(), [Some(700), None, None, None, None]);
        assert_eq!(row.category_values(Category::Single).collect::<Vec<_>>(), vec![700]);
    }

    #[test]
    fn test_events_in_order_of_appearance() {
        let table = sample_table();
        assert_eq!(
            table.events(),
            vec![EventId::Cube3, EventId::Cube2, EventId::Cube3Blindfolded]
        );
        assert_eq!(table.rows_for_event(EventId::Cube3).count(), 3);
    }
}
