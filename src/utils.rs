//! Pure helpers translating spreadsheet-style references into zero-based
//! coordinates.
//!
//! Column letters follow base-26 alphabetic numbering (A=1..Z=26, AA=27, ...)
//! before the zero-based conversion and are case-insensitive. Absolute
//! markers (`$B$7`) are accepted and ignored.

use crate::errors::{Error, Result};

/// Converts a cell reference like `"B7"` into a zero-based (row, column)
/// coordinate.
///
/// # Examples
/// ```
/// use sheetquery::excel_ref_to_index;
///
/// assert_eq!(excel_ref_to_index("A1").unwrap(), (0, 0));
/// assert_eq!(excel_ref_to_index("b7").unwrap(), (6, 1));
/// ```
pub fn excel_ref_to_index(cell_ref: &str) -> Result<(usize, usize)> {
    let bytes = cell_ref.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'$') {
        i += 1;
    }

    let letters_start = i;
    let mut col: usize = 0;
    while i < bytes.len() {
        match bytes[i] {
            c @ b'A'..=b'Z' => col = col * 26 + (c - b'A') as usize + 1,
            c @ b'a'..=b'z' => col = col * 26 + (c - b'a') as usize + 1,
            _ => break,
        }
        i += 1;
    }
    if i == letters_start {
        return Err(Error::InvalidReference(cell_ref.to_string()));
    }

    if bytes.get(i) == Some(&b'$') {
        i += 1;
    }

    let digits_start = i;
    let mut row: usize = 0;
    while i < bytes.len() {
        match bytes[i] {
            c @ b'0'..=b'9' => row = row * 10 + (c - b'0') as usize,
            _ => return Err(Error::InvalidReference(cell_ref.to_string())),
        }
        i += 1;
    }
    if i == digits_start || row == 0 {
        return Err(Error::InvalidReference(cell_ref.to_string()));
    }

    Ok((row - 1, col - 1))
}

/// Parses a range reference and returns its (start, end) coordinates.
///
/// A reference without a `:` separator is a single-cell range with
/// start == end. Reversed ranges are returned as written, not normalized.
///
/// # Examples
/// ```
/// use sheetquery::parse_excel_range;
///
/// assert_eq!(parse_excel_range("A2:B3").unwrap(), ((1, 0), (2, 1)));
/// assert_eq!(parse_excel_range("C4").unwrap(), ((3, 2), (3, 2)));
/// ```
pub fn parse_excel_range(range_ref: &str) -> Result<((usize, usize), (usize, usize))> {
    let parts = range_ref
        .split(':')
        .map(excel_ref_to_index)
        .collect::<Result<Vec<_>>>()?;

    match parts.len() {
        1 => Ok((parts[0], parts[0])),
        2 => Ok((parts[0], parts[1])),
        _ => Err(Error::InvalidReference(range_ref.to_string())),
    }
}

/// Converts a bare column-letter string into a zero-based column index.
///
/// # Examples
/// ```
/// use sheetquery::column_letter_to_index;
///
/// assert_eq!(column_letter_to_index("A").unwrap(), 0);
/// assert_eq!(column_letter_to_index("AA").unwrap(), 26);
/// ```
pub fn column_letter_to_index(col_letters: &str) -> Result<usize> {
    if col_letters.is_empty() {
        return Err(Error::InvalidReference(col_letters.to_string()));
    }
    let mut col: usize = 0;
    for c in col_letters.bytes() {
        match c {
            b'A'..=b'Z' => col = col * 26 + (c - b'A') as usize + 1,
            b'a'..=b'z' => col = col * 26 + (c - b'a') as usize + 1,
            _ => return Err(Error::InvalidReference(col_letters.to_string())),
        }
    }
    Ok(col - 1)
}

/// Coordinate-wise addition of a signed offset to a (row, column) pair.
///
/// Sheet bounds are not consulted. Returns `None` when a component would
/// go negative.
pub fn add_offset(base: (usize, usize), offset: (isize, isize)) -> Option<(usize, usize)> {
    let row = base.0.checked_add_signed(offset.0)?;
    let col = base.1.checked_add_signed(offset.1)?;
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A1", (0, 0))]
    #[case("B2", (1, 1))]
    #[case("Z1", (0, 25))]
    #[case("AA1", (0, 26))]
    #[case("AZ3", (2, 51))]
    #[case("BA1", (0, 52))]
    #[case("ZZ10", (9, 701))]
    #[case("C107", (106, 2))]
    #[case("b7", (6, 1))]
    #[case("aA1", (0, 26))]
    #[case("$B$2", (1, 1))]
    #[case("$B2", (1, 1))]
    fn ref_to_index(#[case] reference: &str, #[case] expected: (usize, usize)) {
        assert_eq!(excel_ref_to_index(reference).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("1")]
    #[case("123")]
    #[case("ABC")]
    #[case("A0")]
    #[case("1A")]
    #[case("A1B")]
    #[case("A 1")]
    #[case("$")]
    fn ref_to_index_malformed(#[case] reference: &str) {
        assert!(matches!(
            excel_ref_to_index(reference),
            Err(crate::Error::InvalidReference(_))
        ));
    }

    #[test]
    fn range_parsing() {
        assert_eq!(parse_excel_range("A2:B3").unwrap(), ((1, 0), (2, 1)));
        assert_eq!(parse_excel_range("B2").unwrap(), ((1, 1), (1, 1)));
        // reversed ranges come back as written
        assert_eq!(parse_excel_range("B3:A2").unwrap(), ((2, 1), (1, 0)));
        assert!(parse_excel_range("A1:B2:C3").is_err());
        assert!(parse_excel_range("A1:").is_err());
    }

    #[rstest]
    #[case("A", 0)]
    #[case("Z", 25)]
    #[case("AA", 26)]
    #[case("AB", 27)]
    #[case("BA", 52)]
    #[case("ZZ", 701)]
    #[case("AAA", 702)]
    #[case("c", 2)]
    fn column_letters(#[case] letters: &str, #[case] expected: usize) {
        assert_eq!(column_letter_to_index(letters).unwrap(), expected);
    }

    #[test]
    fn column_letters_malformed() {
        assert!(column_letter_to_index("").is_err());
        assert!(column_letter_to_index("A1").is_err());
        assert!(column_letter_to_index("-").is_err());
    }

    #[test]
    fn offsets() {
        assert_eq!(add_offset((1, 1), (0, 1)), Some((1, 2)));
        assert_eq!(add_offset((3, 4), (-2, -4)), Some((1, 0)));
        assert_eq!(add_offset((0, 0), (-1, 0)), None);
        assert_eq!(add_offset((5, 0), (0, -1)), None);
    }
}
