use thiserror::Error;

/// Errors related to A1-notation range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid A1 notation for range '{0}'")]
    FormatError(String),
}

/// A cell range in A1 notation, classified into the eight accepted shapes.
///
/// Columns are kept as the letter groups the user wrote (1-3 ASCII letters,
/// case preserved); rows are 1-7 digit numbers. Any expression that does not
/// fit one of these shapes is a configuration error.
#[derive(Clone, Debug, PartialEq)]
pub enum A1Range {
    /// Single cell, e.g. `G8`
    Cell { col: String, row: u32 },
    /// Column span, e.g. `C:G`
    ColumnSpan { start_col: String, end_col: String },
    /// Row span, e.g. `1:5`
    RowSpan { start_row: u32, end_row: u32 },
    /// Cell to row, e.g. `C1:5`
    CellToRow {
        start_col: String,
        start_row: u32,
        end_row: u32,
    },
    /// Cell to column, e.g. `A1:B`
    CellToColumn {
        start_col: String,
        start_row: u32,
        end_col: String,
    },
    /// Full box, e.g. `C4:G14`
    CellBox {
        start_col: String,
        start_row: u32,
        end_col: String,
        end_row: u32,
    },
    /// Columns to cell, e.g. `A:B5`
    ColumnsToCell {
        start_col: String,
        end_col: String,
        end_row: u32,
    },
    /// Row to cell, e.g. `2:B5`
    RowToCell {
        start_row: u32,
        end_col: String,
        end_row: u32,
    },
}

/// One side of a range expression: optional column letters, optional row number.
struct Bound {
    col: Option<String>,
    row: Option<u32>,
}

impl Bound {
    /// Splits a bound like `C4` into its letter and digit groups.
    /// At least one group must be present; letters must precede digits.
    fn parse(part: &str) -> Option<Bound> {
        let letters = part.chars().take_while(char::is_ascii_alphabetic).count();
        let (col, row) = part.split_at(letters);
        if part.is_empty() || letters > 3 || row.len() > 7 {
            return None;
        }
        if !row.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Bound {
            col: (!col.is_empty()).then(|| col.to_owned()),
            row: if row.is_empty() {
                None
            } else {
                row.parse().ok()
            },
        })
    }
}

impl TryFrom<&str> for A1Range {
    type Error = RangeError;

    /// Parses an A1-notation range string into one of the eight shapes.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = || RangeError::FormatError(value.to_owned());

        let Some((start, end)) = value.split_once(':') else {
            // No colon: only a full single-cell reference is accepted.
            let bound = Bound::parse(value).ok_or_else(invalid)?;
            return match (bound.col, bound.row) {
                (Some(col), Some(row)) => Ok(A1Range::Cell { col, row }),
                _ => Err(invalid()),
            };
        };

        let start = Bound::parse(start).ok_or_else(invalid)?;
        let end = Bound::parse(end).ok_or_else(invalid)?;
        match (start.col, start.row, end.col, end.row) {
            (Some(start_col), None, Some(end_col), None) => Ok(A1Range::ColumnSpan {
                start_col,
                end_col,
            }),
            (None, Some(start_row), None, Some(end_row)) => Ok(A1Range::RowSpan {
                start_row,
                end_row,
            }),
            (Some(start_col), Some(start_row), None, Some(end_row)) => Ok(A1Range::CellToRow {
                start_col,
                start_row,
                end_row,
            }),
            (Some(start_col), Some(start_row), Some(end_col), None) => Ok(A1Range::CellToColumn {
                start_col,
                start_row,
                end_col,
            }),
            (Some(start_col), Some(start_row), Some(end_col), Some(end_row)) => {
                Ok(A1Range::CellBox {
                    start_col,
                    start_row,
                    end_col,
                    end_row,
                })
            }
            (Some(start_col), None, Some(end_col), Some(end_row)) => Ok(A1Range::ColumnsToCell {
                start_col,
                end_col,
                end_row,
            }),
            (None, Some(start_row), Some(end_col), Some(end_row)) => Ok(A1Range::RowToCell {
                start_row,
                end_col,
                end_row,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Computes the single-row range covering only the header line of `range`.
///
/// The header line is the lowest row number mentioned by the range (row 1
/// when the range names no rows), and the column bounds are preserved so the
/// header fetch targets the same columns as the later full-range fetch. With
/// no range configured the whole first line `"1:1"` is returned without any
/// parsing.
pub fn first_line_range(range: Option<&str>) -> Result<String, RangeError> {
    let Some(expr) = range else {
        return Ok("1:1".to_owned());
    };

    let (start_col, end_col, line) = match A1Range::try_from(expr)? {
        // Single cell: the end column falls back to the start column.
        A1Range::Cell { col, row } => (col.clone(), col, row),
        A1Range::ColumnSpan { start_col, end_col } => (start_col, end_col, 1),
        A1Range::RowSpan { start_row, end_row } => {
            (String::new(), String::new(), start_row.min(end_row))
        }
        A1Range::CellToRow {
            start_col,
            start_row,
            end_row,
        } => (start_col, String::new(), start_row.min(end_row)),
        A1Range::CellToColumn {
            start_col,
            start_row,
            end_col,
        } => (start_col, end_col, start_row),
        A1Range::CellBox {
            start_col,
            start_row,
            end_col,
            end_row,
        } => (start_col, end_col, start_row.min(end_row)),
        A1Range::ColumnsToCell {
            start_col,
            end_col,
            end_row,
        } => (start_col, end_col, end_row),
        A1Range::RowToCell {
            start_row,
            end_col,
            end_row,
        } => (String::new(), end_col, start_row.min(end_row)),
    };
    Ok(format!("{start_col}{line}:{end_col}{line}"))
}
