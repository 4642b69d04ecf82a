// ============================================================
// Layer 4 — Schema-Driven Text Loader
// ============================================================
// Loads the census file using the `csv` crate.
//
// File format:
//   - comma separated
//   - one header row (skipped)
//   - exactly 15 cells per row, typed by Column::kind()
//
// Cell parsing:
//   numeric  → f32, empty cell → NaN
//   text     → trimmed String
//   boolean  → true/false, 1/0, yes/no, t/f, y/n (any case),
//              empty cell → missing label
//
// A row that cannot be parsed is logged and skipped. The
// number of skipped rows is reported back in LoadOutcome.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::Read,
    path::PathBuf,
};
use thiserror::Error;

use crate::domain::record::{CensusRecord, Column, ColumnKind};
use crate::domain::traits::RecordSource;

/// Why a single row was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column '{column}': cannot parse '{value}' as a number")]
    Numeric { column: &'static str, value: String },

    #[error("column '{column}': cannot parse '{value}' as a boolean")]
    Boolean { column: &'static str, value: String },
}

/// Records that parsed, plus how many rows were dropped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<CensusRecord>,
    pub skipped: usize,
}

/// Reads a census file from disk.
pub struct TextLoader {
    path: PathBuf,
}

impl TextLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the file at `self.path`. A missing file is an error.
    pub fn load(&self) -> Result<LoadOutcome> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open data file '{}'", self.path.display()))?;
        let outcome = Self::load_reader(file)
            .with_context(|| format!("Cannot read data file '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} rows from '{}' ({} skipped)",
            outcome.records.len(),
            self.path.display(),
            outcome.skipped
        );
        Ok(outcome)
    }

    /// Parse census rows from any reader. The first line is treated as a header.
    pub fn load_reader<R: Read>(reader: R) -> Result<LoadOutcome> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut outcome = LoadOutcome::default();

        for (row, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping row {}: {}", row + 2, e);
                    outcome.skipped += 1;
                    continue;
                }
            };

            let cells: Vec<&str> = record.iter().collect();
            match parse_row(&cells) {
                Ok(parsed) => outcome.records.push(parsed),
                // Data rows start on line 2, after the header
                Err(e) => {
                    tracing::warn!("Skipping row {}: {}", row + 2, e);
                    outcome.skipped += 1;
                }
            }
        }

        Ok(outcome)
    }
}

impl RecordSource for TextLoader {
    fn load_all(&self) -> Result<Vec<CensusRecord>> {
        Ok(self.load()?.records)
    }
}

/// Turn the cells of one row into a CensusRecord according to the schema.
pub fn parse_row(cells: &[&str]) -> Result<CensusRecord, RowError> {
    if cells.len() != Column::ALL.len() {
        return Err(RowError::ColumnCount {
            expected: Column::ALL.len(),
            found:    cells.len(),
        });
    }

    let mut record = CensusRecord::default();
    for column in Column::ALL {
        let cell = cells[column.index()].trim();
        match column.kind() {
            ColumnKind::Numeric => record.set_numeric(column, parse_float(column, cell)?),
            ColumnKind::Text    => record.set_text(column, cell),
            ColumnKind::Boolean => record.is_over_50k = parse_bool(column, cell)?,
        }
    }
    Ok(record)
}

fn parse_float(column: Column, cell: &str) -> Result<f32, RowError> {
    if cell.is_empty() {
        return Ok(f32::NAN);
    }
    cell.parse::<f32>().map_err(|_| RowError::Numeric {
        column: column.name(),
        value:  cell.to_string(),
    })
}

fn parse_bool(column: Column, cell: &str) -> Result<Option<bool>, RowError> {
    match cell.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "+1" | "yes" | "t" | "y" => Ok(Some(true)),
        "false" | "0" | "-1" | "no" | "f" | "n" => Ok(Some(false)),
        _ => Err(RowError::Boolean {
            column: column.name(),
            value:  cell.to_string(),
        }),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "age,workclass,fnlwgt,education,education-num,marital-status,occupation,relationship,ethnicity,sex,capital-gain,capital-loss,hours-per-week,native-country-region,IsOver50K\n";

    fn csv_with(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    #[test]
    fn test_parses_typed_row() {
        let data = csv_with(&[
            "39, State-gov, 77516, Bachelors, 13, Never-married, Adm-clerical, Not-in-family, White, Male, 2174, 0, 40, United-States, 0",
        ]);
        let out = TextLoader::load_reader(data.as_bytes()).unwrap();
        assert_eq!(out.skipped, 0);
        assert_eq!(out.records.len(), 1);

        let r = &out.records[0];
        assert_eq!(r.age, 39.0);
        assert_eq!(r.workclass, "State-gov");
        assert_eq!(r.education_num, 13.0);
        assert_eq!(r.capital_gain, 2174.0);
        assert_eq!(r.native_country, "United-States");
        assert_eq!(r.is_over_50k, Some(false));
    }

    #[test]
    fn test_skips_malformed_rows() {
        let data = csv_with(&[
            "50,Self-emp,83311,Bachelors,13,Married-civ-spouse,Exec-managerial,Husband,White,Male,0,0,13,United-States,1",
            "not-a-number,Private,1,HS-grad,9,Divorced,Sales,Unmarried,White,Female,0,0,40,Cuba,0",
            "38,Private,215646,HS-grad",
            "53,Private,234721,11th,7,Married-civ-spouse,Handlers-cleaners,Husband,Black,Male,0,0,40,United-States,maybe",
        ]);
        let out = TextLoader::load_reader(data.as_bytes()).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped, 3);
        assert_eq!(out.records[0].is_over_50k, Some(true));
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let data = csv_with(&[
            ",Private,1,HS-grad,9,Divorced,Sales,Unmarried,White,Female,0,0,40,,",
        ]);
        let out = TextLoader::load_reader(data.as_bytes()).unwrap();
        let r = &out.records[0];
        assert!(r.age.is_nan());
        assert_eq!(r.native_country, "");
        assert_eq!(r.is_over_50k, None);
    }

    #[test]
    fn test_boolean_spellings() {
        for (cell, expected) in [("TRUE", true), ("yes", true), ("y", true), ("False", false), ("N", false)] {
            assert_eq!(parse_bool(Column::IsOver50K, cell), Ok(Some(expected)));
        }
    }

    #[test]
    fn test_signed_unit_labels() {
        assert_eq!(parse_bool(Column::IsOver50K, "+1"), Ok(Some(true)));
        assert_eq!(parse_bool(Column::IsOver50K, "-1"), Ok(Some(false)));

        let data = csv_with(&[
            "31,Private,45781,Masters,14,Never-married,Prof-specialty,Not-in-family,White,Female,14084,0,50,United-States,+1",
            "42,Private,159449,Bachelors,13,Married-civ-spouse,Exec-managerial,Husband,White,Male,5178,0,40,United-States,-1",
        ]);
        let out = TextLoader::load_reader(data.as_bytes()).unwrap();
        assert_eq!(out.skipped, 0);
        assert_eq!(out.records[0].is_over_50k, Some(true));
        assert_eq!(out.records[1].is_over_50k, Some(false));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = TextLoader::new("definitely/not/here.csv");
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_record_source_reads_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("adult.txt");
        std::fs::write(
            &path,
            csv_with(&["25,Private,226802,11th,7,Never-married,Machine-op-inspct,Own-child,Black,Male,0,0,40,United-States,0"]),
        )
        .unwrap();

        let records = TextLoader::new(&path).load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sex, "Male");
    }
}
