//! Error types for decoding.
//!
//! Every failure is a value carrying enough position information to find the
//! offending cell: column indices are zero-based, row numbers are one-based.
//! Cell failures accumulate across a whole row before the row fails.

use std::fmt;

use thiserror::Error;

use crate::indexed::Indexed;

/// One cell whose content could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellError<C> {
    /// Zero-based physical column of the cell.
    pub column: usize,
    /// The raw cell content.
    pub content: C,
}

impl<C: fmt::Display> fmt::Display for CellError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}: cannot decode {:?}", self.column, self.content.to_string())
    }
}

/// Several header cells matched the same expected header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCollision<C> {
    /// The expected header name.
    pub header: C,
    /// Every matching cell, by position.
    pub cells: Vec<Indexed<C>>,
}

/// Everything wrong with a header row, collected in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderErrors<C> {
    /// Expected headers found more than once.
    pub duplicates: Vec<HeaderCollision<C>>,
    /// Expected header names absent from the header row.
    pub missing: Vec<C>,
    /// Positional columns beyond the end of the header row. These have no
    /// name, so only their index is reported.
    pub missing_positional: Vec<usize>,
}

impl<C> HeaderErrors<C> {
    /// No errors recorded.
    pub fn new() -> Self {
        HeaderErrors {
            duplicates: Vec::new(),
            missing: Vec::new(),
            missing_positional: Vec::new(),
        }
    }

    /// Returns true if nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty() && self.missing.is_empty() && self.missing_positional.is_empty()
    }
}

impl<C> Default for HeaderErrors<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Display> fmt::Display for HeaderErrors<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut problems = Vec::new();
        for collision in &self.duplicates {
            let cells: Vec<String> = collision.cells.iter().map(|cell| cell.to_string()).collect();
            problems.push(format!(
                "header {} appears at {}",
                collision.header,
                cells.join(", ")
            ));
        }
        if !self.missing.is_empty() {
            let names: Vec<String> = self.missing.iter().map(|name| name.to_string()).collect();
            problems.push(format!("missing headers: {}", names.join(", ")));
        }
        if !self.missing_positional.is_empty() {
            let slots: Vec<String> = self
                .missing_positional
                .iter()
                .map(|index| format!("#{}", index))
                .collect();
            problems.push(format!("missing positional columns: {}", slots.join(", ")));
        }
        write!(f, "header mismatch: {}", problems.join("; "))
    }
}

/// Why a single row failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowError<C> {
    /// The grid source could not parse the row into cells.
    Parse(String),

    /// A cell's bytes are not valid text.
    Malformed { column: usize },

    /// The row has the wrong number of cells.
    Size { expected: usize, actual: usize },

    /// The header row does not satisfy the decoder.
    Headers(HeaderErrors<C>),

    /// The header row has the wrong number of cells.
    HeaderSize { expected: usize, actual: usize },

    /// One or more cells could not be decoded. Never empty.
    Decode(Vec<CellError<C>>),
}

impl<C: fmt::Display> fmt::Display for RowError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::Parse(message) => write!(f, "parse error: {}", message),
            RowError::Malformed { column } => write!(f, "malformed text in column {}", column),
            RowError::Size { expected, actual } => {
                write!(f, "expected {} cells, found {}", expected, actual)
            }
            RowError::Headers(errors) => fmt::Display::fmt(errors, f),
            RowError::HeaderSize { expected, actual } => {
                write!(f, "expected {} header cells, found {}", expected, actual)
            }
            RowError::Decode(cells) => {
                write!(f, "{} cell(s) could not be decoded: ", cells.len())?;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", cell)?;
                }
                Ok(())
            }
        }
    }
}

impl<C: fmt::Debug + fmt::Display> std::error::Error for RowError<C> {}

/// A row failure tagged with its one-based row number.
///
/// This is the error type of the whole decode pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("row {row}: {cause}")]
pub struct SiphonError<C> {
    /// One-based row number in the input grid. The header, when present, is
    /// row 1.
    pub row: usize,
    /// What went wrong.
    pub cause: RowError<C>,
}

/// Result type for decode operations.
pub type Result<T, C> = std::result::Result<T, SiphonError<C>>;
