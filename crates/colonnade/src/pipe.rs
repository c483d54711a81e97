//! Streaming glue: encode a sequence of rows into a sequence of lines.
//!
//! [`pipe`] and [`headed_pipe`] are lazy iterators. Each row is pulled from the
//! input, rendered and serialized before the next one is pulled, so a consumer
//! that stops early never forces the rest of the input. [`headed_pipe`] emits
//! the header line exactly once, ahead of the first row.
//!
//! ```rust
//! use colonnade::{headed_pipe, Adapter, Encoding};
//!
//! let encoding: Encoding<u32, String> = Encoding::headed("n", |n: &u32| n.to_string())
//!     .concat(Encoding::headed("square", |n: &u32| (n * n).to_string()));
//!
//! let adapter = Adapter::csv();
//! let lines: Vec<String> = headed_pipe(&adapter, &encoding, 1u32..).take(3).collect();
//! assert_eq!(lines, vec!["n,square", "1,1", "2,4"]);
//! ```

use std::borrow::Borrow;
use std::io::{self, Write};
use std::marker::PhantomData;

use crate::adapter::Adapter;
use crate::encoding::Encoding;
use crate::headedness::{Headed, Headedness};

/// Serializes each row of `rows` into one line.
pub fn pipe<'e, A, C, H, I>(
    adapter: &'e Adapter<C>,
    encoding: &'e Encoding<A, C, H>,
    rows: I,
) -> Pipe<'e, A, C, H, I::IntoIter>
where
    H: Headedness,
    I: IntoIterator,
    I::Item: Borrow<A>,
{
    Pipe {
        adapter,
        encoding,
        rows: rows.into_iter(),
        emitted: 0,
        _row: PhantomData,
    }
}

/// Emits the header line, then one line per row.
pub fn headed_pipe<'e, A, C, I>(
    adapter: &'e Adapter<C>,
    encoding: &'e Encoding<A, C, Headed>,
    rows: I,
) -> HeadedPipe<'e, A, C, I::IntoIter>
where
    I: IntoIterator,
    I::Item: Borrow<A>,
{
    HeadedPipe {
        header_pending: true,
        rows: pipe(adapter, encoding, rows),
    }
}

/// Iterator returned by [`pipe`].
pub struct Pipe<'e, A, C, H: Headedness, I> {
    adapter: &'e Adapter<C>,
    encoding: &'e Encoding<A, C, H>,
    rows: I,
    emitted: usize,
    _row: PhantomData<fn(&A)>,
}

impl<'e, A, C, H, I> Iterator for Pipe<'e, A, C, H, I>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
    H: Headedness,
    I: Iterator,
    I::Item: Borrow<A>,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let row = self.rows.next()?;
        let line = self.adapter.row(self.encoding, row.borrow());
        self.emitted += 1;
        tracing::trace!(row = self.emitted, "encoded row");
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Iterator returned by [`headed_pipe`].
pub struct HeadedPipe<'e, A, C, I> {
    header_pending: bool,
    rows: Pipe<'e, A, C, Headed, I>,
}

impl<'e, A, C, I> Iterator for HeadedPipe<'e, A, C, I>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
    I: Iterator,
    I::Item: Borrow<A>,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.header_pending {
            self.header_pending = false;
            tracing::trace!("encoded header");
            return Some(self.rows.adapter.header(self.rows.encoding));
        }
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let extra = usize::from(self.header_pending);
        let (lower, upper) = self.rows.size_hint();
        (
            lower.saturating_add(extra),
            upper.and_then(|upper| upper.checked_add(extra)),
        )
    }
}

/// Writes each line followed by `\n`. Returns the number of lines written.
pub fn write_lines<W, I>(writer: &mut W, lines: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut count = 0;
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
