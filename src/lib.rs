//! Read-only queries over spreadsheet grids
//!
//! **sheetquery** answers queries against an in-memory workbook: a mapping
//! from sheet name to a grid of heterogeneous cell values. It supports cell
//! access, value search, adjacency lookup, header-based table extraction and
//! rectangular range extraction addressed either by zero-based coordinates
//! or by spreadsheet-style references ("A1", "B2:D10").
//!
//! Workbooks are built once, either directly from a mapping or by decoding a
//! workbook file through [`calamine`](https://docs.rs/calamine) (the default
//! `calamine` feature), and are immutable for the engine's lifetime.
//!
//! # Examples
//! ```
//! use sheetquery::{CellValue, QueryEngine, Workbook};
//!
//! let mut workbook = Workbook::new();
//! workbook.insert(
//!     "Sheet1",
//!     vec![
//!         vec!["Name".into(), "Age".into()],
//!         vec!["Alice".into(), CellValue::Int(30)],
//!         vec!["Bob".into(), CellValue::Int(25)],
//!     ],
//! );
//!
//! let engine = QueryEngine::from_mapping(workbook);
//!
//! assert_eq!(engine.get_cell("Sheet1", 1, 0).unwrap(), "Alice");
//! assert_eq!(engine.find_by_value("Sheet1", &"Bob".into()), vec![(2, 0)]);
//!
//! let table = engine.extract_table_from_header("Sheet1", 0).unwrap();
//! assert_eq!(table[0]["Age"], CellValue::Int(30));
//! ```
#![deny(missing_docs)]

mod datatype;
mod decode;
pub mod errors;
pub mod utils;

use std::path::Path;

use indexmap::IndexMap;

pub use crate::datatype::CellValue;
#[cfg(feature = "calamine")]
pub use crate::decode::CalamineDecoder;
pub use crate::decode::WorkbookDecoder;
pub use crate::errors::Error;
pub use crate::utils::{add_offset, column_letter_to_index, excel_ref_to_index, parse_excel_range};

use crate::errors::Result;

/// One extracted table row: a mapping from header text to cell value, in
/// header order
pub type Record = IndexMap<String, CellValue>;

/// The full collection of sheets queried by the engine
///
/// Sheet names are unique; insertion order is preserved. Rows may be ragged:
/// nothing forces every row of a sheet to the same length, and the query
/// operations check bounds per row.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: IndexMap<String, Vec<Vec<CellValue>>>,
}

impl Workbook {
    /// Creates a new empty workbook
    pub fn new() -> Workbook {
        Workbook {
            sheets: IndexMap::new(),
        }
    }

    /// Adds a sheet, replacing any sheet already stored under `name`
    pub fn insert<S: Into<String>>(&mut self, name: S, rows: Vec<Vec<CellValue>>) {
        self.sheets.insert(name.into(), rows);
    }

    /// Gets a sheet's rows by name
    pub fn sheet(&self, name: &str) -> Option<&[Vec<CellValue>]> {
        self.sheets.get(name).map(Vec::as_slice)
    }

    /// Gets all sheet names, in insertion order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Number of sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Assess if the workbook holds no sheet
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<(String, Vec<Vec<CellValue>>)> for Workbook {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Vec<CellValue>>)>>(iter: I) -> Workbook {
        Workbook {
            sheets: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Workbook {
    type Item = (String, Vec<Vec<CellValue>>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Vec<CellValue>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.into_iter()
    }
}

/// The grid query engine
///
/// Holds an immutable [`Workbook`] and answers read-only queries against it.
/// Absent sheets are treated as empty sheets throughout: lookups on them
/// fail with the same out-of-range error as any other out-of-bounds access,
/// and scans over them match nothing.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    data: Workbook,
}

impl QueryEngine {
    /// Creates an engine over an already-constructed workbook mapping,
    /// used verbatim
    pub fn from_mapping(workbook: Workbook) -> QueryEngine {
        QueryEngine { data: workbook }
    }

    /// Creates an engine by decoding a workbook file with the default
    /// decoder.
    ///
    /// Sheets hold the computed values of formulas, not formula text.
    /// Without the `calamine` feature there is no default decoder and this
    /// fails with [`Error::MissingDependency`]; use
    /// [`from_file_with`](QueryEngine::from_file_with) to supply one.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<QueryEngine> {
        #[cfg(feature = "calamine")]
        {
            Self::from_file_with(path, &CalamineDecoder)
        }
        #[cfg(not(feature = "calamine"))]
        {
            let _ = path;
            Err(Error::MissingDependency(
                "workbook decoding requires the `calamine` feature or an \
                 explicit decoder passed to `from_file_with`",
            ))
        }
    }

    /// Creates an engine by decoding a workbook file with the given decoder
    pub fn from_file_with<P: AsRef<Path>>(
        path: P,
        decoder: &dyn WorkbookDecoder,
    ) -> Result<QueryEngine> {
        Ok(QueryEngine {
            data: decoder.decode(path.as_ref())?,
        })
    }

    /// Gets the underlying workbook
    pub fn workbook(&self) -> &Workbook {
        &self.data
    }

    /// An absent sheet reads as an empty sheet.
    fn sheet(&self, name: &str) -> &[Vec<CellValue>] {
        self.data.sheet(name).unwrap_or(&[])
    }

    fn out_of_range(&self, sheet: &str, pos: (i64, i64)) -> Error {
        Error::IndexOutOfRange {
            sheet: sheet.to_string(),
            pos,
        }
    }

    /// Gets the value at a zero-based (row, column) coordinate.
    ///
    /// Bounds are per row: on a ragged sheet a column index valid for one
    /// row can be out of range for the next.
    pub fn get_cell(&self, sheet: &str, row: usize, col: usize) -> Result<&CellValue> {
        self.sheet(sheet)
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or_else(|| self.out_of_range(sheet, (row as i64, col as i64)))
    }

    /// Finds every coordinate whose value equals `target` exactly, in
    /// row-major ascending order.
    ///
    /// Returns an empty vector when the sheet is absent or nothing matches.
    /// Full scan over the sheet.
    pub fn find_by_value(&self, sheet: &str, target: &CellValue) -> Vec<(usize, usize)> {
        let mut matches = Vec::new();
        for (row_idx, row) in self.sheet(sheet).iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if value == target {
                    matches.push((row_idx, col_idx));
                }
            }
        }
        matches
    }

    /// Gets the value at the first match of `search_value` shifted by a
    /// signed (row, column) offset; `(0, 1)` is the cell to the right.
    ///
    /// Ties among matches are broken by row-major order. Returns `Ok(None)`
    /// when nothing matches, and [`Error::IndexOutOfRange`] when the shifted
    /// coordinate falls outside the sheet (including targets that would be
    /// negative).
    pub fn get_adjacent_value(
        &self,
        sheet: &str,
        search_value: &CellValue,
        offset: (isize, isize),
    ) -> Result<Option<&CellValue>> {
        let matches = self.find_by_value(sheet, search_value);
        let base = match matches.first() {
            Some(base) => *base,
            None => return Ok(None),
        };
        let (row, col) = add_offset(base, offset).ok_or_else(|| {
            self.out_of_range(
                sheet,
                (
                    base.0 as i64 + offset.0 as i64,
                    base.1 as i64 + offset.1 as i64,
                ),
            )
        })?;
        self.get_cell(sheet, row, col).map(Some)
    }

    /// Extracts the rows below `header_row_idx` as records keyed by the
    /// header row's cell text.
    ///
    /// Headers and row values pair up positionally and pairing stops at the
    /// shorter of the two. Rows with no content at all (every cell empty,
    /// zero, blank or false) are skipped. Duplicate header text: the later
    /// column wins.
    pub fn extract_table_from_header(
        &self,
        sheet: &str,
        header_row_idx: usize,
    ) -> Result<Vec<Record>> {
        let rows = self.sheet(sheet);
        let headers = rows
            .get(header_row_idx)
            .ok_or_else(|| self.out_of_range(sheet, (header_row_idx as i64, 0)))?;

        let table = rows[header_row_idx + 1..]
            .iter()
            .filter(|row| row_has_content(row.as_slice()))
            .map(|row| {
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(header, value)| (header.to_string(), value.clone()))
                    .collect()
            })
            .collect();
        Ok(table)
    }

    /// Gets an inclusive rectangular block of values as rows of cells.
    ///
    /// Exactly one of `end` (inclusive coordinate) or `size`
    /// ((row_count, col_count)) determines the extent; `end` wins when both
    /// are given, and neither is [`Error::Configuration`]. Every coordinate
    /// goes through [`get_cell`](QueryEngine::get_cell), so any out-of-bounds
    /// cell fails the whole call.
    pub fn get_range(
        &self,
        sheet: &str,
        start: (usize, usize),
        end: Option<(usize, usize)>,
        size: Option<(usize, usize)>,
    ) -> Result<Vec<Vec<CellValue>>> {
        let (start_row, start_col) = (start.0 as i64, start.1 as i64);
        let (end_row, end_col) = if let Some((row, col)) = end {
            (row as i64, col as i64)
        } else if let Some((rows, cols)) = size {
            (start_row + rows as i64 - 1, start_col + cols as i64 - 1)
        } else {
            return Err(Error::Configuration(
                "get_range needs either `end` or `size`",
            ));
        };

        let mut result = Vec::new();
        for row in start_row..=end_row {
            let mut values = Vec::new();
            for col in start_col..=end_col {
                values.push(self.get_cell(sheet, row as usize, col as usize)?.clone());
            }
            result.push(values);
        }
        Ok(result)
    }

    /// Gets the rectangular block addressed by a textual range reference
    /// such as `"A2:B3"`
    pub fn get_range_by_ref(&self, sheet: &str, range_ref: &str) -> Result<Vec<Vec<CellValue>>> {
        let (start, end) = parse_excel_range(range_ref)?;
        self.get_range(sheet, start, Some(end), None)
    }

    /// Projects the given column letters, in the order supplied, over every
    /// row from 1-based `start_row` through the end of the sheet.
    ///
    /// A column index beyond a row's length yields [`CellValue::Empty`] for
    /// that slot rather than failing.
    pub fn get_columns_from_row<S: AsRef<str>>(
        &self,
        sheet: &str,
        columns: &[S],
        start_row: usize,
    ) -> Result<Vec<Vec<CellValue>>> {
        let rows = self.sheet(sheet);
        let start_idx = start_row.saturating_sub(1);
        select_columns(rows.get(start_idx..).unwrap_or(&[]), columns)
    }

    /// Same projection as [`get_columns_from_row`](QueryEngine::get_columns_from_row),
    /// restricted to the half-open 1-based row span `[start_row, end_row)`.
    ///
    /// The exclusive end is deliberate and differs from `get_range`'s
    /// inclusive end: an equal start and end spans zero rows.
    pub fn get_columns_from_row_to_row<S: AsRef<str>>(
        &self,
        sheet: &str,
        columns: &[S],
        start_row: usize,
        end_row: usize,
    ) -> Result<Vec<Vec<CellValue>>> {
        let rows = self.sheet(sheet);
        let start_idx = start_row.saturating_sub(1).min(rows.len());
        let end_idx = end_row.saturating_sub(1).clamp(start_idx, rows.len());
        select_columns(&rows[start_idx..end_idx], columns)
    }
}

// Zeros, empty strings and `false` do not count as content.
fn row_has_content(row: &[CellValue]) -> bool {
    row.iter().any(|value| match value {
        CellValue::Int(v) => *v != 0,
        CellValue::Float(v) => *v != 0.0,
        CellValue::String(v) => !v.is_empty(),
        CellValue::Bool(v) => *v,
        CellValue::Empty => false,
    })
}

fn select_columns<S: AsRef<str>>(
    rows: &[Vec<CellValue>],
    columns: &[S],
) -> Result<Vec<Vec<CellValue>>> {
    let col_indices = columns
        .iter()
        .map(|col| column_letter_to_index(col.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(rows
        .iter()
        .map(|row| {
            col_indices
                .iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect())
}
