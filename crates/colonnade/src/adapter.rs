//! Serialization adapters: turning a row of cells into one line of output.
//!
//! An [`Adapter`] is an `(escape, join)` pair. Every cell is escaped on its own
//! and the escaped cells are joined into one value. This is the only place a
//! concrete text format (delimiters, quoting) enters the picture; encodings
//! themselves never know about either.
//!
//! ```rust
//! use colonnade::{Adapter, Encoding};
//!
//! type Row = (&'static str, u32);
//!
//! let encoding: Encoding<Row, String> = Encoding::headed("Name", |r: &Row| r.0.to_string())
//!     .concat(Encoding::headed("Age", |r: &Row| r.1.to_string()));
//!
//! let csv = Adapter::csv();
//! assert_eq!(csv.header(&encoding), "Name,Age");
//! assert_eq!(csv.row(&encoding, &("David", 63)), "David,63");
//! assert_eq!(csv.row(&encoding, &("Smith, Jo", 40)), "\"Smith, Jo\",40");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::encoding::Encoding;
use crate::headedness::{Headed, Headedness};

type Escape<C> = Arc<dyn Fn(C) -> C + Send + Sync>;
type Join<C> = Arc<dyn Fn(Vec<C>) -> C + Send + Sync>;

/// An `(escape, join)` pair for one output format.
pub struct Adapter<C> {
    escape: Escape<C>,
    join: Join<C>,
}

impl<C> Adapter<C> {
    /// Creates an adapter from an escape function and a join function.
    pub fn new(
        escape: impl Fn(C) -> C + Send + Sync + 'static,
        join: impl Fn(Vec<C>) -> C + Send + Sync + 'static,
    ) -> Self {
        Adapter {
            escape: Arc::new(escape),
            join: Arc::new(join),
        }
    }

    /// Escapes each cell and joins them.
    pub fn join(&self, cells: impl IntoIterator<Item = C>) -> C {
        (self.join)(cells.into_iter().map(|cell| (self.escape)(cell)).collect())
    }
}

impl<C> Adapter<C>
where
    C: Clone + Send + Sync + 'static,
{
    /// One serialized line for a row.
    pub fn row<A: 'static, H: Headedness>(&self, encoding: &Encoding<A, C, H>, row: &A) -> C {
        self.join(encoding.render_row(row))
    }

    /// One serialized line for the header.
    pub fn header<A: 'static>(&self, encoding: &Encoding<A, C, Headed>) -> C {
        self.join(encoding.render_header())
    }
}

impl Adapter<String> {
    /// Joins cells with `separator` without escaping them.
    pub fn plain(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        Adapter::new(|cell| cell, move |cells: Vec<String>| cells.join(&separator))
    }

    /// Comma-separated values with RFC 4180 quoting.
    pub fn csv() -> Self {
        Self::delimited(b',')
    }

    /// Tab-separated values, quoted like CSV.
    pub fn tsv() -> Self {
        Self::delimited(b'\t')
    }

    /// Delimited text: cells are quoted by the `csv` writer when they contain
    /// the delimiter, a quote or a line break. Empty cells are written as
    /// `""` so a one-column row never becomes a blank line.
    pub fn delimited(delimiter: u8) -> Self {
        let separator = char::from(delimiter).to_string();
        Adapter::new(
            move |cell: String| quote_field(delimiter, cell),
            move |cells: Vec<String>| cells.join(&separator),
        )
    }
}

/// Escapes one cell by writing it as a single-field record and dropping the
/// record terminator.
fn quote_field(delimiter: u8, cell: String) -> String {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if writer.write_record([cell.as_bytes()]).is_err() {
        return cell;
    }
    let bytes = match writer.into_inner() {
        Ok(bytes) => bytes,
        Err(_) => return cell,
    };
    match String::from_utf8(bytes) {
        Ok(mut line) => {
            if line.ends_with('\n') {
                line.pop();
            }
            line
        }
        Err(_) => cell,
    }
}

impl<C> Clone for Adapter<C> {
    fn clone(&self) -> Self {
        Adapter {
            escape: Arc::clone(&self.escape),
            join: Arc::clone(&self.join),
        }
    }
}

impl<C> fmt::Debug for Adapter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_only_when_needed() {
        let csv = Adapter::csv();
        assert_eq!(csv.join(vec!["a".to_string(), "b c".to_string()]), "a,b c");
        assert_eq!(csv.join(vec!["a,b".to_string()]), "\"a,b\"");
        assert_eq!(csv.join(vec!["say \"hi\"".to_string()]), "\"say \"\"hi\"\"\"");
        assert_eq!(csv.join(vec!["two\nlines".to_string()]), "\"two\nlines\"");
    }

    #[test]
    fn quoted_cells_are_closed() {
        let csv = Adapter::csv();
        let line = csv.join(vec!["Smith, Jo".to_string(), "40".to_string()]);
        assert_eq!(line, "\"Smith, Jo\",40");
        assert_eq!(csv.join(vec!["trailing\n".to_string()]), "\"trailing\n\"");
    }

    #[test]
    fn empty_cells_are_quoted() {
        let csv = Adapter::csv();
        assert_eq!(csv.join(vec![String::new()]), "\"\"");
        assert_eq!(csv.join(vec![String::new(), "x".to_string()]), "\"\",x");
    }

    #[test]
    fn tsv_uses_tabs() {
        let tsv = Adapter::tsv();
        assert_eq!(tsv.join(vec!["a,b".to_string(), "c".to_string()]), "a,b\tc");
        assert_eq!(tsv.join(vec!["a\tb".to_string()]), "\"a\tb\"");
    }

    #[test]
    fn plain_does_not_escape() {
        let plain = Adapter::plain(" | ");
        assert_eq!(plain.join(vec!["a,b".to_string(), "c".to_string()]), "a,b | c");
    }

    #[test]
    fn custom_adapter() {
        let adapter = Adapter::new(|n: u32| n * 10, |cells: Vec<u32>| cells.iter().sum());
        assert_eq!(adapter.join(vec![1, 2, 3]), 60);
    }
}
