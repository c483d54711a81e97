//! # Colonnade Siphon - Decoding Rows from Cells
//!
//! The decode half of `colonnade`. A [`Decoder`] is built from per-column
//! decoders, each tied to an expected header name or to its own position.
//! Its header requirements are known before any data is read, so a header
//! row is validated once and every problem with it is reported together:
//! missing names, names present more than once, positional columns past the
//! end of the row.
//!
//! Data rows are decoded lazily from any grid of cells. Each failure carries
//! its one-based row number and, for cell failures, the physical column and
//! raw content of every offending cell in the row.
//!
//! ## Quick Start
//!
//! ```rust
//! use colonnade_siphon::{csv_grid, decode_headed, Decoder, RowError};
//!
//! let decoder = Decoder::<String, String>::column("Name", |c: &String| Some(c.clone()))
//!     .and(Decoder::<String, u32>::parsed("Age"));
//!
//! let input = "Age,Name\n63,David\nold,Ava\n";
//! let (people, errors) =
//!     decode_headed(&decoder, csv_grid(input.as_bytes())).collect_partitioned();
//!
//! assert_eq!(people, vec![("David".to_string(), 63)]);
//! assert_eq!(errors[0].row, 3);
//! assert!(matches!(errors[0].cause, RowError::Decode(_)));
//! ```
//!
//! ## Round Trips
//!
//! [`header_row`] and [`encode_grid`] turn a `colonnade` encoding and its
//! rows into a grid, so anything encoded with string cells can be decoded
//! straight back without going through text.

mod decoder;
mod error;
mod grid;
mod indexed;
mod siphon;

pub use decoder::{Decoder, HeaderRule, Resolved};
pub use error::{CellError, HeaderCollision, HeaderErrors, Result, RowError, SiphonError};
pub use grid::{csv_grid, csv_grid_with, encode_grid, header_row, CsvGrid, EncodedGrid};
pub use indexed::Indexed;
pub use siphon::{decode_headed, decode_headed_with, decode_headless, Siphon, SiphonOptions};
