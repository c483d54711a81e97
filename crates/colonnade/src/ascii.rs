//! Bordered text tables.
//!
//! A reference renderer for encodings whose cells are text. Column widths come
//! from [`Encoding::size_columns`] over the rows being rendered, so the header,
//! every data row and every border line agree on each column's width.
//!
//! ```rust
//! use colonnade::{ascii, Encoding};
//!
//! type Row = (&'static str, u32);
//!
//! let encoding: Encoding<Row, String> = Encoding::headed("Name", |r: &Row| r.0.to_string())
//!     .concat(Encoding::headed("Age", |r: &Row| r.1.to_string()));
//!
//! let rows = [("David", 63), ("Ava", 34), ("Sonia", 12)];
//! let table = ascii(&encoding, &rows);
//! assert_eq!(
//!     table,
//!     "+-------+-----+\n\
//!      | Name  | Age |\n\
//!      +-------+-----+\n\
//!      | David | 63  |\n\
//!      | Ava   | 34  |\n\
//!      | Sonia | 12  |\n\
//!      +-------+-----+"
//! );
//! ```
//!
//! Border characters and the padding character are configurable through
//! [`TableConfig`], which can also be loaded from YAML.

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;
use crate::error::ConfigError;
use crate::headedness::Headedness;
use crate::sized::{display_width, right_pad};

/// Border style for table decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// ASCII borders: +, -, |
    #[default]
    Ascii,
    /// Light Unicode box-drawing characters: ┌, ─, ┐, │, └, ┘, ├, ┼, ┤, ┬, ┴
    Light,
    /// Heavy Unicode box-drawing characters: ┏, ━, ┓, ┃, ┗, ┛, ┣, ╋, ┫, ┳, ┻
    Heavy,
    /// Double-line Unicode box-drawing: ╔, ═, ╗, ║, ╚, ╝, ╠, ╬, ╣, ╦, ╩
    Double,
    /// Rounded corners with light lines: ╭, ─, ╮, │, ╰, ╯, ├, ┼, ┤, ┬, ┴
    Rounded,
}

impl BorderStyle {
    pub(crate) fn chars(&self) -> BorderChars {
        match self {
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                left_t: '+',
                cross: '+',
                right_t: '+',
                top_t: '+',
                bottom_t: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                left_t: '┣',
                cross: '╋',
                right_t: '┫',
                top_t: '┳',
                bottom_t: '┻',
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                left_t: '╠',
                cross: '╬',
                right_t: '╣',
                top_t: '╦',
                bottom_t: '╩',
            },
            BorderStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
        }
    }
}

/// Box-drawing characters for a border style.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

/// Type of horizontal line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineType {
    Top,
    Middle,
    Bottom,
}

impl BorderChars {
    /// A horizontal rule with a joint after every span.
    ///
    /// Each span is drawn `size + 2` wide to cover the cell's padding.
    pub(crate) fn rule(&self, sizes: &[usize], line_type: LineType) -> String {
        let (left, joint, right) = match line_type {
            LineType::Top => (self.top_left, self.top_t, self.top_right),
            LineType::Middle => (self.left_t, self.cross, self.right_t),
            LineType::Bottom => (self.bottom_left, self.bottom_t, self.bottom_right),
        };

        let mut line = String::new();
        line.push(left);
        for (i, &size) in sizes.iter().enumerate() {
            line.extend(std::iter::repeat_n(self.horizontal, size + 2));
            line.push(if i + 1 == sizes.len() { right } else { joint });
        }
        line
    }

    /// A content line: every cell padded to its size and closed by a border.
    pub(crate) fn line<'s>(
        &self,
        cells: impl IntoIterator<Item = (usize, &'s str)>,
        fill: char,
    ) -> String {
        let mut line = String::new();
        line.push(self.vertical);
        for (size, content) in cells {
            line.push(' ');
            line.push_str(&right_pad(size, fill, content));
            line.push(' ');
            line.push(self.vertical);
        }
        line
    }
}

/// Rendering options for text tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Border character set.
    pub border: BorderStyle,
    /// Character used to pad cells to their column width.
    pub fill: char,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            border: BorderStyle::Ascii,
            fill: ' ',
        }
    }
}

impl TableConfig {
    /// Parses a config from YAML. Missing keys take their defaults.
    ///
    /// ```rust
    /// use colonnade::{BorderStyle, TableConfig};
    ///
    /// let config = TableConfig::from_yaml("border: light\nfill: '.'").unwrap();
    /// assert_eq!(config.border, BorderStyle::Light);
    /// assert_eq!(config.fill, '.');
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// A bordered text table over an encoding.
pub struct AsciiTable<'e, A, C, H: Headedness> {
    encoding: &'e Encoding<A, C, H>,
    config: TableConfig,
}

impl<'e, A, C, H> AsciiTable<'e, A, C, H>
where
    A: 'static,
    C: AsRef<str> + Clone + Send + Sync + 'static,
    H: Headedness,
{
    /// Creates a table with the default config.
    pub fn new(encoding: &'e Encoding<A, C, H>) -> Self {
        AsciiTable {
            encoding,
            config: TableConfig::default(),
        }
    }

    /// Sets the border style.
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.config.border = border;
        self
    }

    /// Sets the padding character.
    pub fn fill(mut self, fill: char) -> Self {
        self.config.fill = fill;
        self
    }

    /// Replaces the whole config.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Renders the complete table.
    ///
    /// Lines: top border, header and separator (headed encodings only), one
    /// line per row, bottom border. Lines are joined with `\n`.
    pub fn render<'r>(&self, rows: impl IntoIterator<Item = &'r A>) -> String
    where
        A: 'r,
    {
        let rows: Vec<&A> = rows.into_iter().collect();
        let sized = self
            .encoding
            .size_columns(|cell: &C| display_width(cell.as_ref()), rows.iter().copied());
        let widths = sized.widths();
        let chars = self.config.border.chars();
        let fill = self.config.fill;

        let mut output = vec![chars.rule(widths, LineType::Top)];

        let header: Option<Vec<&C>> = self
            .encoding
            .columns()
            .map(|col| col.header_content())
            .collect();
        if let Some(header) = header {
            output.push(chars.line(
                widths.iter().copied().zip(header.iter().map(|h| text(*h))),
                fill,
            ));
            output.push(chars.rule(widths, LineType::Middle));
        }

        for row in rows {
            let cells = self.encoding.render_row(row);
            output.push(chars.line(
                widths.iter().copied().zip(cells.iter().map(text)),
                fill,
            ));
        }

        output.push(chars.rule(widths, LineType::Bottom));
        output.join("\n")
    }
}

pub(crate) fn text<C: AsRef<str>>(cell: &C) -> &str {
    cell.as_ref()
}

/// Renders a bordered table with the default config.
pub fn ascii<'r, A, C, H>(
    encoding: &Encoding<A, C, H>,
    rows: impl IntoIterator<Item = &'r A>,
) -> String
where
    A: 'static,
    C: AsRef<str> + Clone + Send + Sync + 'static,
    H: Headedness,
{
    AsciiTable::new(encoding).render(rows)
}
