//! Workbook file decoding.
//!
//! Decoding a workbook file into the in-memory grid shape is delegated to an
//! external reader behind the [`WorkbookDecoder`] capability. The crate ships
//! one implementation backed by `calamine` (the default `calamine` feature);
//! builds without it can still construct engines from in-memory mappings or
//! inject their own decoder.

use std::path::Path;

use crate::errors::Result;
use crate::Workbook;

#[cfg(feature = "calamine")]
use calamine::{open_workbook_auto, Data, Range, Reader};
#[cfg(feature = "calamine")]
use log::debug;

#[cfg(feature = "calamine")]
use crate::datatype::CellValue;

/// A capability interface turning a workbook file into sheets of computed
/// cell values.
///
/// Implementations must yield the cached results of formulas, never formula
/// text, and must place values at their absolute sheet positions.
pub trait WorkbookDecoder {
    /// Decodes the workbook at `path`.
    fn decode(&self, path: &Path) -> Result<Workbook>;
}

/// The default decoder, reading any format `calamine` auto-detects
/// (xlsx, xlsm, xlsb, xls, ods).
#[cfg(feature = "calamine")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineDecoder;

#[cfg(feature = "calamine")]
impl WorkbookDecoder for CalamineDecoder {
    fn decode(&self, path: &Path) -> Result<Workbook> {
        let mut source = open_workbook_auto(path)?;
        let mut workbook = Workbook::new();
        for (name, range) in source.worksheets() {
            let rows = grid_from_range(&range);
            debug!("decoded sheet '{}': {} rows", name, rows.len());
            workbook.insert(name, rows);
        }
        Ok(workbook)
    }
}

/// Expands a used range into a dense grid anchored at A1.
///
/// A used range starting at C3 gets two leading all-empty rows and two
/// leading empty columns, so coordinates always match what the sheet shows.
#[cfg(feature = "calamine")]
fn grid_from_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (row0, col0) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Vec::new(),
    };
    let (height, width) = range.get_size();

    let mut rows = vec![vec![CellValue::Empty; col0 + width]; row0 + height];
    for (r, row) in range.rows().enumerate() {
        for (c, value) in row.iter().enumerate() {
            rows[row0 + r][col0 + c] = convert(value);
        }
    }
    rows
}

/// Maps a decoded value onto the engine's value model.
///
/// Date and duration cells carry no dedicated variant here: serial datetimes
/// fall back to their float serial, ISO ones to their text. Cell errors
/// become their display text, as a value-level read of an errored formula.
#[cfg(feature = "calamine")]
fn convert(value: &Data) -> CellValue {
    match value {
        Data::Int(v) => CellValue::Int(*v),
        Data::Float(v) => CellValue::Float(*v),
        Data::String(v) => CellValue::String(v.clone()),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::Float(v.as_f64()),
        Data::DateTimeIso(v) => CellValue::String(v.clone()),
        Data::DurationIso(v) => CellValue::String(v.clone()),
        Data::Error(v) => CellValue::String(v.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

#[cfg(all(test, feature = "calamine"))]
mod tests {
    use super::*;
    use calamine::Cell;

    #[test]
    fn grid_is_anchored_at_a1() {
        // used range starts at C3 (2, 2)
        let range = Range::from_sparse(vec![
            Cell::new((2, 2), Data::Int(1)),
            Cell::new((3, 3), Data::String("x".to_string())),
        ]);
        let grid = grid_from_range(&range);

        assert_eq!(grid.len(), 4);
        assert!(grid[0].iter().all(CellValue::is_empty));
        assert!(grid[1].iter().all(CellValue::is_empty));
        assert_eq!(grid[2][2], CellValue::Int(1));
        assert_eq!(grid[3][3], CellValue::String("x".to_string()));
        assert_eq!(grid[2][3], CellValue::Empty);
    }

    #[test]
    fn empty_range_is_an_empty_grid() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }

    #[test]
    fn value_mapping() {
        assert_eq!(convert(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(convert(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(convert(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(convert(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::String("#DIV/0!".to_string())
        );
        assert_eq!(
            convert(&Data::DateTimeIso("2024-01-01".to_string())),
            CellValue::String("2024-01-01".to_string())
        );
    }
}
