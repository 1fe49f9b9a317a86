use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use cubestat_results::{
    evaluation::AnalysisOptions,
    event::{Category, EventId},
    table::ResultTable,
};
use serde::Serialize;

/// Input table options shared by every command.
#[derive(Debug, Clone, Args)]
pub(crate) struct TableArg {
    /// Path to the result table (tab-separated, or comma-separated for `.csv`)
    pub table: PathBuf,

    /// Field delimiter, overriding the one implied by the file extension
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl TableArg {
    pub fn load(&self) -> anyhow::Result<ResultTable> {
        let table = match self.delimiter {
            Some(delimiter) => {
                let delimiter = u8::try_from(delimiter)
                    .ok()
                    .filter(u8::is_ascii)
                    .with_context(|| format!("Delimiter must be a single ASCII character: {delimiter:?}"))?;
                ResultTable::load_with_delimiter(&self.table, delimiter)
            }
            None => ResultTable::load(&self.table),
        };
        let table = table.with_context(|| {
            format!("The result table cannot be loaded: {}", self.table.display())
        })?;
        if table.is_empty() {
            log::warn!("result table {} has no rows", self.table.display());
        }
        Ok(table)
    }
}

/// Pool selection options shared by the fitting commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct PoolArg {
    /// Event codes to process (comma-separated, defaults to every event in the table)
    #[arg(long = "event", value_delimiter = ',')]
    pub events: Vec<EventId>,

    /// Result category: single, average or best
    #[arg(long, default_value = "single")]
    pub category: Category,

    /// Fit on the raw pool, including DNF, DNS and empty attempts
    #[arg(long)]
    pub keep_invalid: bool,
}

impl PoolArg {
    /// Requested events, or every recognised event present in `table`.
    ///
    /// Repeated events are kept once, at their first position.
    pub fn events(&self, table: &ResultTable) -> Vec<EventId> {
        if self.events.is_empty() {
            return table.events();
        }
        let mut events = Vec::with_capacity(self.events.len());
        for event in &self.events {
            if !events.contains(event) {
                events.push(*event);
            }
        }
        events
    }

    pub fn analysis_options(&self, levels: &[f64]) -> AnalysisOptions {
        AnalysisOptions {
            levels: levels.to_vec(),
            keep_invalid: self.keep_invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Tab-separated values
    #[default]
    Tsv,
    /// Pretty-printed JSON with run metadata
    Json,
}

/// Output destination options shared by the exporting commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct OutputArg {
    /// Output file path (defaults to stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// JSON envelope recording where a report came from.
#[derive(Debug, Serialize)]
pub(crate) struct Report<'a, T> {
    pub generated_at: DateTime<Utc>,
    pub source: &'a Path,
    pub category: Category,
    pub data: T,
}

impl<'a, T> Report<'a, T> {
    pub fn new(source: &'a Path, category: Category, data: T) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
            category,
            data,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Output {
    Stdout { writer: StdoutLock<'static> },
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::open(path)?,
            None => Output::stdout(),
        };
        output.write_json(value)
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        if let Output::File { path, .. } = self {
            log::info!("saved JSON report to {}", path.display());
        }
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Formats a fitted value for terminal tables, keeping `NaN` readable.
pub(crate) fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "N/A".to_owned()
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(f64::NAN), "N/A");
        assert_eq!(fmt_value(961.666), "961.67");
    }

    #[test]
    fn test_table_arg_custom_delimiter() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(
            file,
            "competitionId;eventId;roundTypeId;pos;best;average;personName;personId;personCountryId;formatId;value1;value2;value3;value4;value5"
        )
        .unwrap();
        writeln!(file, "Comp;skewb;f;1;250;400;A;1;X;a;250;390;410;405;-1").unwrap();

        let arg = TableArg {
            table: file.path().to_owned(),
            delimiter: Some(';'),
        };
        assert_eq!(arg.load().unwrap().len(), 1);

        let arg = TableArg {
            table: file.path().to_owned(),
            delimiter: Some('→'),
        };
        assert!(arg.load().is_err());
    }

    #[test]
    fn test_requested_events_are_deduplicated() {
        let arg = PoolArg {
            events: vec![EventId::Cube3, EventId::Cube2, EventId::Cube3],
            category: Category::Single,
            keep_invalid: false,
        };
        assert_eq!(
            arg.events(&ResultTable::default()),
            vec![EventId::Cube3, EventId::Cube2]
        );
    }

    #[test]
    fn test_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = Report::new(Path::new("results.tsv"), Category::Best, vec![1, 2]);
        Output::save_json(&report, Some(&path)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["category"], "best");
        assert_eq!(json["source"], "results.tsv");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
