//! Grid sources: turning delimited text into rows of cells.
//!
//! [`csv_grid`] reads records with the `csv` crate and yields one row per
//! record. Records may have different lengths; checking row width is the
//! decoder's job, which reports it against the right row number. Fields are
//! read as bytes and decoded one at a time so invalid UTF-8 is pinned to its
//! column.
//!
//! ```rust
//! use colonnade_siphon::{csv_grid, decode_headed, Decoder};
//!
//! let input = "Name,Age\nDavid,63\nAva,34\n";
//! let decoder = Decoder::<String, String>::column("Name", |c: &String| Some(c.clone()))
//!     .and(Decoder::<String, u32>::parsed("Age"));
//! let people = decode_headed(&decoder, csv_grid(input.as_bytes()))
//!     .collect_all()
//!     .unwrap();
//! assert_eq!(people, vec![("David".to_string(), 63), ("Ava".to_string(), 34)]);
//! ```

use std::borrow::Borrow;
use std::io;

use colonnade::{Encoding, Headed, Headedness};

use crate::error::RowError;

/// Reads comma-separated rows from `reader`.
pub fn csv_grid<R: io::Read>(reader: R) -> CsvGrid<R> {
    csv_grid_with(reader, b',')
}

/// Reads rows separated by `delimiter` from `reader`.
pub fn csv_grid_with<R: io::Read>(reader: R, delimiter: u8) -> CsvGrid<R> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    CsvGrid {
        reader,
        record: csv::ByteRecord::new(),
        done: false,
    }
}

/// Iterator returned by [`csv_grid`].
pub struct CsvGrid<R> {
    reader: csv::Reader<R>,
    record: csv::ByteRecord,
    done: bool,
}

impl<R: io::Read> Iterator for CsvGrid<R> {
    type Item = Result<Vec<String>, RowError<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_byte_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => Some(decode_record(&self.record)),
            Err(err) => {
                // An I/O error leaves the reader in an unknown position.
                if err.is_io_error() {
                    self.done = true;
                }
                Some(Err(RowError::Parse(err.to_string())))
            }
        }
    }
}

fn decode_record(record: &csv::ByteRecord) -> Result<Vec<String>, RowError<String>> {
    record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            std::str::from_utf8(field)
                .map(str::to_owned)
                .map_err(|_| RowError::Malformed { column })
        })
        .collect()
}

/// The header of `encoding` as the first row of a grid.
pub fn header_row<A, C>(encoding: &Encoding<A, C, Headed>) -> Result<Vec<C>, RowError<C>>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
{
    Ok(encoding.render_header())
}

/// Renders `rows` with `encoding` into grid rows, lazily.
///
/// Chain after [`header_row`] for a headed grid.
pub fn encode_grid<'e, A, C, H, I>(
    encoding: &'e Encoding<A, C, H>,
    rows: I,
) -> EncodedGrid<'e, A, C, H, I::IntoIter>
where
    H: Headedness,
    I: IntoIterator,
    I::Item: Borrow<A>,
{
    EncodedGrid {
        encoding,
        rows: rows.into_iter(),
    }
}

/// Iterator returned by [`encode_grid`].
pub struct EncodedGrid<'e, A, C, H: Headedness, I> {
    encoding: &'e Encoding<A, C, H>,
    rows: I,
}

impl<A, C, H, I> Iterator for EncodedGrid<'_, A, C, H, I>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
    H: Headedness,
    I: Iterator,
    I::Item: Borrow<A>,
{
    type Item = Result<Vec<C>, RowError<C>>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(Ok(self.encoding.render_row(row.borrow())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
