//! # Colonnade - Composable Column Encodings
//!
//! `colonnade` describes a table as a sum of independently defined columns.
//! Each column knows how to project one cell out of a row value; an
//! [`Encoding`] is an ordered sequence of such columns. The same encoding then
//! drives every output: header and row cells, bordered text tables, grouped
//! multi-level headers, and delimited lines for streaming output.
//!
//! The decode direction (cells back into rows) lives in `colonnade-siphon`.
//!
//! ## Core Concepts
//!
//! - [`Encoding`]: ordered columns over a row type `A` and cell type `C`
//! - [`Headed`] / [`Headless`]: whether the columns carry header labels
//! - [`SizedEncoding`]: an encoding plus per-column display widths
//! - [`Cornice`]: encodings grouped under shared, multi-level header labels
//! - [`Adapter`]: an `(escape, join)` pair producing one output line per row
//! - [`pipe`] / [`headed_pipe`]: lazy row-to-line iterators
//!
//! ## Quick Start
//!
//! ```rust
//! use colonnade::{ascii, Adapter, Encoding};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let encoding: Encoding<Person, String> = Encoding::headed("Name", |p: &Person| p.name.clone())
//!     .concat(Encoding::headed("Age", |p: &Person| p.age.to_string()));
//!
//! let people = vec![
//!     Person { name: "David".into(), age: 63 },
//!     Person { name: "Ava".into(), age: 34 },
//! ];
//!
//! let csv = Adapter::csv();
//! assert_eq!(csv.header(&encoding), "Name,Age");
//! assert_eq!(csv.row(&encoding, &people[0]), "David,63");
//!
//! println!("{}", ascii(&encoding, &people));
//! ```
//!
//! ## Row Rewrites
//!
//! ```rust
//! use colonnade::Encoding;
//!
//! let encoding: Encoding<i64, String> = Encoding::headed("Value", |n: &i64| n.to_string())
//!     .concat(Encoding::headed("Double", |n: &i64| (n * 2).to_string()))
//!     .replace_when("-".to_string(), |n| *n < 0);
//!
//! assert_eq!(encoding.render_row(&4), vec!["4", "8"]);
//! assert_eq!(encoding.render_row(&-1), vec!["-", "-"]);
//! ```

mod adapter;
mod ascii;
mod cornice;
mod encoding;
mod error;
mod headedness;
mod pipe;
mod sized;

pub use adapter::Adapter;
pub use ascii::{ascii, AsciiTable, BorderStyle, TableConfig};
pub use cornice::{ascii_capped, AnnotatedCornice, CappedTable, Cornice, Group, COLUMN_OVERHEAD};
pub use encoding::{Column, Encoding};
pub use error::{ConfigError, CorniceError};
pub use headedness::{Headed, Headedness, Headless};
pub use pipe::{headed_pipe, pipe, write_lines, HeadedPipe, Pipe};
pub use sized::{display_width, right_pad, SizedEncoding};
