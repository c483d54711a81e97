//! Streaming decode of a grid of cells.
//!
//! A grid is any iterator of rows, where each row is either its cells or the
//! error the grid source hit while reading it. [`decode_headed`] treats the
//! first row as the header; [`decode_headless`] decodes every row
//! positionally. Both are lazy: one input row is pulled per item.
//!
//! Rows are numbered from 1 in input order, header included, so a failure
//! can be traced back to its line in the source. A bad data row yields an
//! error and decoding continues with the next row. A bad header yields one
//! error and ends the stream, since no data row can be decoded without it.

use serde::{Deserialize, Serialize};

use crate::decoder::{Decoder, Resolved};
use crate::error::{RowError, SiphonError};

/// Knobs for header handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiphonOptions {
    /// Reject header rows whose cell count differs from the decoder's column
    /// count. Off by default: extra header cells are ignored.
    pub exact_header_width: bool,
}

impl SiphonOptions {
    /// Sets [`exact_header_width`](Self::exact_header_width).
    pub fn exact_header_width(mut self, exact: bool) -> Self {
        self.exact_header_width = exact;
        self
    }
}

/// Decodes `grid`, reading the header from its first row.
pub fn decode_headed<'d, C, T, I>(
    decoder: &'d Decoder<C, T>,
    grid: I,
) -> Siphon<'d, C, T, I::IntoIter>
where
    I: IntoIterator<Item = Result<Vec<C>, RowError<C>>>,
{
    decode_headed_with(decoder, grid, SiphonOptions::default())
}

/// Decodes `grid`, reading the header from its first row.
pub fn decode_headed_with<'d, C, T, I>(
    decoder: &'d Decoder<C, T>,
    grid: I,
    options: SiphonOptions,
) -> Siphon<'d, C, T, I::IntoIter>
where
    I: IntoIterator<Item = Result<Vec<C>, RowError<C>>>,
{
    Siphon {
        decoder,
        options,
        grid: grid.into_iter(),
        state: State::AwaitingHeader,
        row: 0,
    }
}

/// Decodes every row of `grid` positionally.
pub fn decode_headless<'d, C, T, I>(
    decoder: &'d Decoder<C, T>,
    grid: I,
) -> Siphon<'d, C, T, I::IntoIter>
where
    I: IntoIterator<Item = Result<Vec<C>, RowError<C>>>,
{
    Siphon {
        decoder,
        options: SiphonOptions::default(),
        grid: grid.into_iter(),
        state: State::Decoding(decoder.headless()),
        row: 0,
    }
}

enum State<'d, C, T> {
    AwaitingHeader,
    Decoding(Resolved<'d, C, T>),
    Done,
}

/// Lazy iterator of decoded rows.
pub struct Siphon<'d, C, T, I> {
    decoder: &'d Decoder<C, T>,
    options: SiphonOptions,
    grid: I,
    state: State<'d, C, T>,
    row: usize,
}

impl<'d, C, T, I> Siphon<'d, C, T, I>
where
    C: PartialEq + Clone,
    I: Iterator<Item = Result<Vec<C>, RowError<C>>>,
{
    /// Decodes everything, stopping at the first error.
    pub fn collect_all(self) -> Result<Vec<T>, SiphonError<C>> {
        self.collect()
    }

    /// Decodes everything, keeping successes and failures apart. Both keep
    /// input order.
    pub fn collect_partitioned(self) -> (Vec<T>, Vec<SiphonError<C>>) {
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for item in self {
            match item {
                Ok(value) => values.push(value),
                Err(err) => errors.push(err),
            }
        }
        (values, errors)
    }

    fn fail(&self, cause: RowError<C>) -> SiphonError<C> {
        SiphonError {
            row: self.row,
            cause,
        }
    }
}

impl<'d, C, T, I> Iterator for Siphon<'d, C, T, I>
where
    C: PartialEq + Clone,
    I: Iterator<Item = Result<Vec<C>, RowError<C>>>,
{
    type Item = Result<T, SiphonError<C>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &self.state {
                State::Done => return None,
                State::Decoding(resolved) => {
                    let item = self.grid.next()?;
                    self.row += 1;
                    let decoded = item.and_then(|cells| resolved.decode(&cells));
                    if let Err(cause) = &decoded {
                        tracing::debug!(row = self.row, kind = %ErrorKind(cause), "row rejected");
                    } else {
                        tracing::trace!(row = self.row, "decoded row");
                    }
                    return Some(decoded.map_err(|cause| SiphonError {
                        row: self.row,
                        cause,
                    }));
                }
                State::AwaitingHeader => {
                    let Some(item) = self.grid.next() else {
                        self.state = State::Done;
                        return None;
                    };
                    self.row += 1;
                    let decoder = self.decoder;
                    let options = self.options;
                    let resolved = item.and_then(|header| decoder.resolve_with(&header, &options));
                    match resolved {
                        Ok(resolved) => self.state = State::Decoding(resolved),
                        Err(cause) => {
                            tracing::debug!(kind = %ErrorKind(&cause), "header rejected, stopping");
                            self.state = State::Done;
                            return Some(Err(self.fail(cause)));
                        }
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Done => (0, Some(0)),
            State::Decoding(_) => self.grid.size_hint(),
            State::AwaitingHeader => {
                let (_, upper) = self.grid.size_hint();
                (0, upper)
            }
        }
    }
}

/// Short name of a row error for log fields.
struct ErrorKind<'a, C>(&'a RowError<C>);

impl<C> std::fmt::Display for ErrorKind<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self.0 {
            RowError::Parse(_) => "parse",
            RowError::Malformed { .. } => "malformed",
            RowError::Size { .. } => "size",
            RowError::Headers(_) => "headers",
            RowError::HeaderSize { .. } => "header_size",
            RowError::Decode(_) => "decode",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CellError;
    use std::cell::Cell;

    type Grid = Vec<Result<Vec<String>, RowError<String>>>;

    fn row(values: &[&str]) -> Result<Vec<String>, RowError<String>> {
        Ok(values.iter().map(|v| v.to_string()).collect())
    }

    fn person() -> Decoder<String, (String, u32)> {
        Decoder::column("Name", |c: &String| Some(c.clone())).and(Decoder::parsed("Age"))
    }

    #[test]
    fn headed_numbers_rows_from_header() {
        let grid: Grid = vec![
            row(&["Name", "Age"]),
            row(&["David", "63"]),
            row(&["Ava"]),
            row(&["Sonia", "x"]),
        ];
        let decoder = person();
        let results: Vec<_> = decode_headed(&decoder, grid).collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(("David".to_string(), 63)));
        assert_eq!(
            results[1],
            Err(SiphonError {
                row: 3,
                cause: RowError::Size {
                    expected: 2,
                    actual: 1
                }
            })
        );
        assert_eq!(
            results[2],
            Err(SiphonError {
                row: 4,
                cause: RowError::Decode(vec![CellError {
                    column: 1,
                    content: "x".to_string()
                }])
            })
        );
    }

    #[test]
    fn bad_header_ends_stream() {
        let grid: Grid = vec![row(&["Name"]), row(&["David", "63"])];
        let decoder = person();
        let results: Vec<_> = decode_headed(&decoder, grid).collect();
        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert_eq!(err.row, 1);
        assert!(matches!(err.cause, RowError::Headers(_)));
    }

    #[test]
    fn header_source_error_ends_stream() {
        let grid: Grid = vec![Err(RowError::Parse("bad quote".to_string())), row(&["a", "1"])];
        let decoder = person();
        let results: Vec<_> = decode_headed(&decoder, grid).collect();
        assert_eq!(
            results,
            vec![Err(SiphonError {
                row: 1,
                cause: RowError::Parse("bad quote".to_string())
            })]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        let decoder = person();
        assert_eq!(decode_headed(&decoder, Grid::new()).count(), 0);
        assert_eq!(decode_headless(&decoder, Grid::new()).count(), 0);
    }

    #[test]
    fn headless_starts_at_row_one() {
        let grid: Grid = vec![row(&["David", "63"]), Err(RowError::Malformed { column: 0 })];
        let decoder = person();
        let (values, errors) = decode_headless(&decoder, grid).collect_partitioned();
        assert_eq!(values, vec![("David".to_string(), 63)]);
        assert_eq!(
            errors,
            vec![SiphonError {
                row: 2,
                cause: RowError::Malformed { column: 0 }
            }]
        );
    }

    #[test]
    fn collect_all_stops_at_first_error() {
        let grid: Grid = vec![row(&["Name", "Age"]), row(&["a", "x"]), row(&["b", "y"])];
        let decoder = person();
        let err = decode_headed(&decoder, grid).collect_all().unwrap_err();
        assert_eq!(err.row, 2);
    }

    #[test]
    fn options_reach_header_resolution() {
        let grid: Grid = vec![row(&["Name", "Age", "Extra"]), row(&["a", "1", "-"])];
        let decoder = person();
        let options = SiphonOptions::default().exact_header_width(true);
        let results: Vec<_> = decode_headed_with(&decoder, grid, options).collect();
        assert_eq!(
            results,
            vec![Err(SiphonError {
                row: 1,
                cause: RowError::HeaderSize {
                    expected: 2,
                    actual: 3
                }
            })]
        );
    }

    #[test]
    fn decoding_is_lazy() {
        let pulled = Cell::new(0usize);
        let grid = std::iter::from_fn(|| {
            pulled.set(pulled.get() + 1);
            Some(row(&["n", "1"]))
        });
        let decoder = person();
        let first: Vec<_> = decode_headless(&decoder, grid).take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn options_from_yaml() {
        let options: SiphonOptions = serde_yaml::from_str("exact_header_width: true").unwrap();
        assert!(options.exact_header_width);
        let options: SiphonOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options, SiphonOptions::default());
    }
}
