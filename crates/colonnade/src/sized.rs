//! Column widths computed from a sample of rows.
//!
//! A [`SizedEncoding`] pairs an encoding with one width per column. Widths are
//! derived once, right before rendering, from the header content and every
//! rendered cell of the sample. A width is a minimum: content longer than its
//! column is emitted as-is by [`right_pad`].

use unicode_width::UnicodeWidthStr;

use crate::encoding::Encoding;
use crate::headedness::{Headed, Headedness};

/// Display width of a string in terminal columns.
///
/// Wide characters (CJK) count as 2.
///
/// ```rust
/// use colonnade::display_width;
///
/// assert_eq!(display_width("Sonia"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads `content` on the right with `fill` up to `width` display columns.
///
/// Never truncates: content at or beyond `width` is returned unchanged.
///
/// ```rust
/// use colonnade::right_pad;
///
/// assert_eq!(right_pad(5, ' ', "Ava"), "Ava  ");
/// assert_eq!(right_pad(2, ' ', "David"), "David");
/// ```
pub fn right_pad(width: usize, fill: char, content: &str) -> String {
    let current = display_width(content);
    if current >= width {
        return content.to_string();
    }
    let mut padded = String::with_capacity(content.len() + (width - current));
    padded.push_str(content);
    padded.extend(std::iter::repeat_n(fill, width - current));
    padded
}

/// An encoding with a computed display width for each of its columns.
pub struct SizedEncoding<'a, A, C, H: Headedness = Headed> {
    encoding: &'a Encoding<A, C, H>,
    widths: Vec<usize>,
}

impl<'a, A, C, H: Headedness> SizedEncoding<'a, A, C, H> {
    /// The underlying encoding.
    pub fn encoding(&self) -> &'a Encoding<A, C, H> {
        self.encoding
    }

    /// Width of each column, in column order.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Width of a single column.
    pub fn width(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Folds the column widths with `combine`, or `None` when there are no
    /// columns.
    pub fn combined_width(&self, combine: impl Fn(usize, usize) -> usize) -> Option<usize> {
        self.widths.iter().copied().reduce(combine)
    }
}

impl<A, C, H> Encoding<A, C, H>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
    H: Headedness,
{
    /// Computes each column's width from a sample of rows.
    ///
    /// A column's width is the largest `length` over its header content (for
    /// headed encodings) and its rendered cells. An empty sample leaves the
    /// header length, or zero for headless encodings.
    pub fn size_columns<'r>(
        &self,
        length: impl Fn(&C) -> usize,
        rows: impl IntoIterator<Item = &'r A>,
    ) -> SizedEncoding<'_, A, C, H>
    where
        A: 'r,
    {
        let mut widths: Vec<usize> = self
            .columns()
            .map(|col| col.header_content().map(&length).unwrap_or(0))
            .collect();

        for row in rows {
            for (width, cell) in widths.iter_mut().zip(self.render_row(row)) {
                *width = (*width).max(length(&cell));
            }
        }

        SizedEncoding {
            encoding: self,
            widths,
        }
    }
}

impl<A, C, H> Encoding<A, C, H>
where
    A: 'static,
    C: AsRef<str> + Clone + Send + Sync + 'static,
    H: Headedness,
{
    /// [`size_columns`](Encoding::size_columns) measured in display width.
    pub fn size_by_display_width<'r>(
        &self,
        rows: impl IntoIterator<Item = &'r A>,
    ) -> SizedEncoding<'_, A, C, H>
    where
        A: 'r,
    {
        self.size_columns(|cell: &C| display_width(cell.as_ref()), rows)
    }
}
