//! Applicative row decoders.
//!
//! A [`Decoder`] describes how to build one value from the cells of a row. It
//! is assembled from single-column decoders with [`Decoder::and`] (or the
//! [`Decoder::field`] shorthand) and reshaped with [`Decoder::map`]. Because
//! the set of columns is fixed when the decoder is built, its header
//! requirements can be inspected with [`Decoder::headers`] before any data is
//! read, and header validation happens once per input rather than once per
//! row.
//!
//! Decoding a row runs every column, so all failing cells of a row are
//! reported together.
//!
//! ```rust
//! use colonnade_siphon::{Decoder, HeaderRule};
//!
//! let person = Decoder::<String, String>::column("Name", |c: &String| Some(c.clone()))
//!     .field("Age", |c: &String| c.parse::<u32>().ok())
//!     .map(|(name, age)| format!("{name} ({age})"));
//!
//! let names: Vec<_> = person.headers().collect();
//! assert_eq!(
//!     names,
//!     vec![&HeaderRule::Named("Name".to_string()), &HeaderRule::Named("Age".to_string())]
//! );
//!
//! let header = vec!["Age".to_string(), "Name".to_string()];
//! let resolved = person.resolve(&header).unwrap();
//! let row = vec!["63".to_string(), "David".to_string()];
//! assert_eq!(resolved.decode(&row).unwrap(), "David (63)");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{CellError, HeaderCollision, HeaderErrors, RowError};
use crate::indexed::Indexed;
use crate::siphon::SiphonOptions;

/// What a decoder column expects from the header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderRule<C> {
    /// Read the column whose header cell equals this value.
    Named(C),
    /// Read the column at the same position as this decoder column.
    Positional,
}

/// Runs the decoder over its matched cells, in column order. On failure,
/// returns the decoder-local indices of the cells that could not be decoded.
type Run<C, T> = Arc<dyn Fn(&[&C]) -> Result<T, Vec<usize>> + Send + Sync>;

/// Builds a `T` from the cells of one row.
pub struct Decoder<C, T> {
    rules: Vec<HeaderRule<C>>,
    run: Run<C, T>,
}

impl<C: 'static, T: 'static> Decoder<C, T> {
    /// A decoder that reads no cells and always yields `value`.
    pub fn pure(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Decoder {
            rules: Vec::new(),
            run: Arc::new(move |_| Ok(value.clone())),
        }
    }

    /// Reads the column whose header equals `header`.
    pub fn column(
        header: impl Into<C>,
        decode: impl Fn(&C) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self::single(HeaderRule::Named(header.into()), decode)
    }

    /// Reads the column at this decoder column's own position.
    pub fn positional(decode: impl Fn(&C) -> Option<T> + Send + Sync + 'static) -> Self {
        Self::single(HeaderRule::Positional, decode)
    }

    fn single(
        rule: HeaderRule<C>,
        decode: impl Fn(&C) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Decoder {
            rules: vec![rule],
            run: Arc::new(move |cells| {
                cells
                    .first()
                    .and_then(|cell| decode(cell))
                    .ok_or_else(|| vec![0])
            }),
        }
    }

    /// Runs both decoders side by side. Columns of `self` come first.
    pub fn and<U: 'static>(self, other: Decoder<C, U>) -> Decoder<C, (T, U)> {
        let split = self.rules.len();
        let left = self.run;
        let right = other.run;
        let mut rules = self.rules;
        rules.extend(other.rules);
        Decoder {
            rules,
            run: Arc::new(move |cells| {
                let (left_cells, right_cells) = cells.split_at(split.min(cells.len()));
                match (left(left_cells), right(right_cells)) {
                    (Ok(t), Ok(u)) => Ok((t, u)),
                    (Err(failed), Ok(_)) => Err(failed),
                    (Ok(_), Err(failed)) => Err(failed.into_iter().map(|i| i + split).collect()),
                    (Err(mut failed), Err(more)) => {
                        failed.extend(more.into_iter().map(|i| i + split));
                        Err(failed)
                    }
                }
            }),
        }
    }

    /// Appends a named column: `self.and(Decoder::column(header, decode))`.
    pub fn field<U: 'static>(
        self,
        header: impl Into<C>,
        decode: impl Fn(&C) -> Option<U> + Send + Sync + 'static,
    ) -> Decoder<C, (T, U)> {
        self.and(Decoder::column(header, decode))
    }

    /// Appends a positional column.
    pub fn positional_field<U: 'static>(
        self,
        decode: impl Fn(&C) -> Option<U> + Send + Sync + 'static,
    ) -> Decoder<C, (T, U)> {
        self.and(Decoder::positional(decode))
    }

    /// Transforms the decoded value. The header requirements are unchanged.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Decoder<C, U> {
        let run = self.run;
        Decoder {
            rules: self.rules,
            run: Arc::new(move |cells| run(cells).map(&f)),
        }
    }
}

impl<C, T> Decoder<C, T> {
    /// Header requirements, one per decoder column, in column order.
    pub fn headers(&self) -> impl Iterator<Item = &HeaderRule<C>> {
        self.rules.iter()
    }

    /// Number of cells the decoder reads from each row.
    pub fn column_count(&self) -> usize {
        self.rules.len()
    }

    /// Decodes rows that have no header: decoder column `i` reads cell `i`
    /// whatever its header rule, and every row must have exactly
    /// [`column_count`](Self::column_count) cells.
    pub fn headless(&self) -> Resolved<'_, C, T> {
        Resolved {
            decoder: self,
            positions: (0..self.rules.len()).collect(),
            width: self.rules.len(),
        }
    }
}

impl<C: PartialEq + Clone, T> Decoder<C, T> {
    /// Matches the header requirements against an actual header row.
    pub fn resolve(&self, header: &[C]) -> Result<Resolved<'_, C, T>, RowError<C>> {
        self.resolve_with(header, &SiphonOptions::default())
    }

    /// Matches the header requirements against an actual header row.
    ///
    /// Named columns may appear anywhere in the header row; extra header
    /// cells are ignored unless `options` asks for an exact width. All
    /// problems are collected before failing: every missing name, every
    /// name found more than once, and every positional column beyond the
    /// end of the row.
    pub fn resolve_with(
        &self,
        header: &[C],
        options: &SiphonOptions,
    ) -> Result<Resolved<'_, C, T>, RowError<C>> {
        if options.exact_header_width && header.len() != self.rules.len() {
            return Err(RowError::HeaderSize {
                expected: self.rules.len(),
                actual: header.len(),
            });
        }

        let mut errors = HeaderErrors::new();
        let mut positions = Vec::with_capacity(self.rules.len());
        for (step, rule) in self.rules.iter().enumerate() {
            match rule {
                HeaderRule::Named(name) => {
                    let matches: Vec<Indexed<&C>> = header
                        .iter()
                        .enumerate()
                        .filter(|(_, cell)| *cell == name)
                        .map(|(index, cell)| Indexed::new(index, cell))
                        .collect();
                    match matches.as_slice() {
                        [] => {
                            if !errors.missing.contains(name) {
                                errors.missing.push(name.clone());
                            }
                        }
                        [only] => positions.push(only.index),
                        [first, ..] => {
                            positions.push(first.index);
                            if !errors.duplicates.iter().any(|d| d.header == *name) {
                                errors.duplicates.push(HeaderCollision {
                                    header: name.clone(),
                                    cells: matches.iter().map(|m| m.map(C::clone)).collect(),
                                });
                            }
                        }
                    }
                }
                HeaderRule::Positional => {
                    if step < header.len() {
                        positions.push(step);
                    } else {
                        errors.missing_positional.push(step);
                    }
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                missing = errors.missing.len(),
                duplicates = errors.duplicates.len(),
                missing_positional = errors.missing_positional.len(),
                "header row rejected"
            );
            return Err(RowError::Headers(errors));
        }
        tracing::debug!(?positions, width = header.len(), "header row resolved");
        Ok(Resolved {
            decoder: self,
            positions,
            width: header.len(),
        })
    }
}

impl<C: AsRef<str> + 'static, T: FromStr + 'static> Decoder<C, T> {
    /// Reads the named column with [`FromStr`].
    pub fn parsed(header: impl Into<C>) -> Self {
        Self::column(header, |cell: &C| cell.as_ref().parse().ok())
    }
}

impl<C, T> Clone for Decoder<C, T>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Decoder {
            rules: self.rules.clone(),
            run: Arc::clone(&self.run),
        }
    }
}

impl<C: fmt::Debug, T> fmt::Debug for Decoder<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

/// A decoder bound to concrete column positions.
///
/// Produced by [`Decoder::resolve`] for headed input and by
/// [`Decoder::headless`] for headless input.
pub struct Resolved<'d, C, T> {
    decoder: &'d Decoder<C, T>,
    positions: Vec<usize>,
    width: usize,
}

impl<'d, C, T> Resolved<'d, C, T> {
    /// The physical column read by each decoder column.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of cells every data row must have.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl<'d, C: Clone, T> Resolved<'d, C, T> {
    /// Decodes one data row.
    ///
    /// The row size is checked first. After that every decoder column runs,
    /// and all failing cells are reported together.
    pub fn decode(&self, cells: &[C]) -> Result<T, RowError<C>> {
        let size = RowError::Size {
            expected: self.width,
            actual: cells.len(),
        };
        if cells.len() != self.width {
            return Err(size);
        }
        let Some(matched) = self
            .positions
            .iter()
            .map(|&position| cells.get(position))
            .collect::<Option<Vec<&C>>>()
        else {
            return Err(size);
        };

        (self.decoder.run)(&matched).map_err(|failed| {
            RowError::Decode(
                failed
                    .into_iter()
                    .map(|step| CellError {
                        column: self.positions[step],
                        content: matched[step].clone(),
                    })
                    .collect(),
            )
        })
    }
}

impl<C, T> fmt::Debug for Resolved<'_, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("positions", &self.positions)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
