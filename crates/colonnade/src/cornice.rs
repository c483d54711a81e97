//! Grouped, multi-level headers.
//!
//! A [`Cornice`] arranges headed encodings under shared group labels. The tree
//! has encodings at its leaves ([`Cornice::Base`]) and one level of grouping
//! per [`Cornice::Cap`]. Every path from the root to a leaf crosses the same
//! number of caps, so each grouping level renders as one header line.
//!
//! ```text
//! +---------------+----------+
//! | Person        | Contact  |   <- cap level
//! +-------+-------+----------+
//! | Name  | Age   | Email    |   <- leaf headers
//! +-------+-------+----------+
//! ```
//!
//! Widths are computed by [`Cornice::annotate_widths`]. Leaf widths come from
//! [`Encoding::size_columns`], and a group spans the combined width of its
//! children, so grouped and flat headers agree column for column.

use crate::ascii::{text, BorderStyle, LineType, TableConfig};
use crate::encoding::Encoding;
use crate::error::CorniceError;
use crate::headedness::Headed;
use crate::sized::{display_width, SizedEncoding};

/// Border overhead between two adjacent columns: `" | "`.
pub const COLUMN_OVERHEAD: usize = 3;

/// A tree of headed encodings grouped under labels.
pub enum Cornice<A, C> {
    /// A leaf level: one encoding, no group label.
    Base(Encoding<A, C, Headed>),
    /// One level of grouping.
    Cap(Vec<Group<A, C>>),
}

/// A labelled child of a [`Cornice::Cap`].
pub struct Group<A, C> {
    label: C,
    child: Cornice<A, C>,
}

impl<A, C> Group<A, C> {
    /// The group label.
    pub fn label(&self) -> &C {
        &self.label
    }

    /// The grouped subtree.
    pub fn child(&self) -> &Cornice<A, C> {
        &self.child
    }
}

impl<A, C> Cornice<A, C> {
    /// A leaf cornice with no grouping.
    pub fn base(encoding: Encoding<A, C, Headed>) -> Self {
        Cornice::Base(encoding)
    }

    /// Groups one encoding under `label`: a single level of grouping.
    pub fn cap(label: impl Into<C>, encoding: Encoding<A, C, Headed>) -> Self {
        Cornice::Cap(vec![Group {
            label: label.into(),
            child: Cornice::Base(encoding),
        }])
    }

    /// Adds one more level of grouping above an existing cornice.
    pub fn recap(label: impl Into<C>, cornice: Cornice<A, C>) -> Self {
        Cornice::Cap(vec![Group {
            label: label.into(),
            child: cornice,
        }])
    }

    /// Builds one grouping level from labelled children.
    ///
    /// All children must have the same depth.
    pub fn group(children: Vec<(C, Cornice<A, C>)>) -> Result<Self, CorniceError> {
        let expected = match children.first() {
            Some((_, child)) => child.depth(),
            None => return Err(CorniceError::EmptyGroup),
        };
        if let Some((_, odd)) = children.iter().find(|(_, child)| child.depth() != expected) {
            return Err(CorniceError::DepthMismatch {
                expected,
                actual: odd.depth(),
            });
        }
        Ok(Cornice::Cap(
            children
                .into_iter()
                .map(|(label, child)| Group { label, child })
                .collect(),
        ))
    }

    /// Places the columns of `other` after those of `self`.
    ///
    /// Leaves concatenate their encodings; caps concatenate their groups.
    /// Both sides must have the same depth.
    pub fn concat(self, other: Self) -> Result<Self, CorniceError> {
        match (self, other) {
            (Cornice::Base(left), Cornice::Base(right)) => Ok(Cornice::Base(left.concat(right))),
            (Cornice::Cap(mut left), Cornice::Cap(right)) => {
                let expected = left.first().map_or(0, |g| g.child.depth());
                if let Some(odd) = right.iter().find(|g| g.child.depth() != expected) {
                    return Err(CorniceError::DepthMismatch {
                        expected: expected + 1,
                        actual: odd.child.depth() + 1,
                    });
                }
                left.extend(right);
                Ok(Cornice::Cap(left))
            }
            (left, right) => Err(CorniceError::DepthMismatch {
                expected: left.depth(),
                actual: right.depth(),
            }),
        }
    }

    /// Number of grouping levels above the leaf encodings.
    pub fn depth(&self) -> usize {
        match self {
            Cornice::Base(_) => 0,
            Cornice::Cap(groups) => 1 + groups.first().map_or(0, |g| g.child.depth()),
        }
    }

    /// The leaf encodings, left to right.
    pub fn leaves(&self) -> Vec<&Encoding<A, C, Headed>> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'c>(&'c self, out: &mut Vec<&'c Encoding<A, C, Headed>>) {
        match self {
            Cornice::Base(encoding) => out.push(encoding),
            Cornice::Cap(groups) => groups.iter().for_each(|g| g.child.collect_leaves(out)),
        }
    }

    /// Total number of leaf columns: the width of the table.
    pub fn column_count(&self) -> usize {
        self.leaves().iter().map(|leaf| leaf.column_count()).sum()
    }
}

impl<A, C> Cornice<A, C>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
{
    /// The leaf encodings concatenated into one flat encoding.
    pub fn flatten(&self) -> Encoding<A, C, Headed> {
        self.leaves().into_iter().cloned().collect()
    }

    /// Computes the rendered width of every node.
    ///
    /// Leaves are sized with [`Encoding::size_columns`]; a node's width is
    /// `combine` folded over its columns' or children's widths. Nodes without
    /// any columns have no width.
    pub fn annotate_widths<'r>(
        &self,
        combine: impl Fn(usize, usize) -> usize,
        length: impl Fn(&C) -> usize,
        rows: impl IntoIterator<Item = &'r A>,
    ) -> AnnotatedCornice<'_, A, C>
    where
        A: 'r,
    {
        let rows: Vec<&A> = rows.into_iter().collect();
        let annotated = self.annotate_node(&combine, &length, &rows);
        tracing::debug!(
            depth = self.depth(),
            columns = self.column_count(),
            size = ?annotated.size,
            "annotated cornice"
        );
        annotated
    }

    fn annotate_node(
        &self,
        combine: &dyn Fn(usize, usize) -> usize,
        length: &dyn Fn(&C) -> usize,
        rows: &[&A],
    ) -> AnnotatedCornice<'_, A, C> {
        match self {
            Cornice::Base(encoding) => {
                let sized = encoding.size_columns(length, rows.iter().copied());
                AnnotatedCornice {
                    size: sized.combined_width(combine),
                    node: AnnotatedNode::Base(sized),
                }
            }
            Cornice::Cap(groups) => {
                let children: Vec<AnnotatedGroup<'_, A, C>> = groups
                    .iter()
                    .map(|g| AnnotatedGroup {
                        label: &g.label,
                        child: g.child.annotate_node(combine, length, rows),
                    })
                    .collect();
                AnnotatedCornice {
                    size: children.iter().filter_map(|g| g.child.size).reduce(combine),
                    node: AnnotatedNode::Cap(children),
                }
            }
        }
    }
}

impl<A, C> Cornice<A, C>
where
    A: 'static,
    C: AsRef<str> + Clone + Send + Sync + 'static,
{
    /// [`annotate_widths`](Cornice::annotate_widths) measured in display
    /// width, with [`COLUMN_OVERHEAD`] between adjacent columns.
    pub fn annotate<'r>(
        &self,
        rows: impl IntoIterator<Item = &'r A>,
    ) -> AnnotatedCornice<'_, A, C>
    where
        A: 'r,
    {
        self.annotate_widths(
            |x, y| x + y + COLUMN_OVERHEAD,
            |cell: &C| display_width(cell.as_ref()),
            rows,
        )
    }
}

/// A cornice with the rendered width of every node.
pub struct AnnotatedCornice<'c, A, C> {
    size: Option<usize>,
    node: AnnotatedNode<'c, A, C>,
}

enum AnnotatedNode<'c, A, C> {
    Base(SizedEncoding<'c, A, C, Headed>),
    Cap(Vec<AnnotatedGroup<'c, A, C>>),
}

struct AnnotatedGroup<'c, A, C> {
    label: &'c C,
    child: AnnotatedCornice<'c, A, C>,
}

impl<'c, A, C> AnnotatedCornice<'c, A, C> {
    /// Rendered width of this node, or `None` when it spans no columns.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Sized leaf encodings, left to right.
    pub fn leaves(&self) -> Vec<&SizedEncoding<'c, A, C, Headed>> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'s>(&'s self, out: &mut Vec<&'s SizedEncoding<'c, A, C, Headed>>) {
        match &self.node {
            AnnotatedNode::Base(sized) => out.push(sized),
            AnnotatedNode::Cap(groups) => groups.iter().for_each(|g| g.child.collect_leaves(out)),
        }
    }

    /// Leaf column widths, left to right. Matches the flat encoding's sizing.
    pub fn leaf_widths(&self) -> Vec<usize> {
        self.leaves()
            .iter()
            .flat_map(|sized| sized.widths().iter().copied())
            .collect()
    }

    /// Group labels with their spans, one entry per grouping level, top first.
    ///
    /// Groups that span no columns are omitted.
    pub fn levels(&self) -> Vec<Vec<(usize, &'c C)>> {
        let mut levels = Vec::new();
        self.collect_levels(0, &mut levels);
        levels
    }

    fn collect_levels(&self, depth: usize, levels: &mut Vec<Vec<(usize, &'c C)>>) {
        if let AnnotatedNode::Cap(groups) = &self.node {
            if levels.len() <= depth {
                levels.push(Vec::new());
            }
            for group in groups {
                if let Some(size) = group.child.size {
                    levels[depth].push((size, group.label));
                }
                group.child.collect_levels(depth + 1, levels);
            }
        }
    }
}

impl<'c, A, C: AsRef<str>> AnnotatedCornice<'c, A, C> {
    /// One bordered line per grouping level, top-most first.
    ///
    /// Each label is left-aligned and padded to the width of its group.
    pub fn render_capped_header(&self, config: &TableConfig) -> String {
        let chars = config.border.chars();
        self.levels()
            .into_iter()
            .map(|level| {
                chars.line(
                    level.into_iter().map(|(size, label)| (size, text(label))),
                    config.fill,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A bordered text table with grouped headers.
pub struct CappedTable<'c, A, C> {
    cornice: &'c Cornice<A, C>,
    config: TableConfig,
}

impl<'c, A, C> CappedTable<'c, A, C>
where
    A: 'static,
    C: AsRef<str> + Clone + Send + Sync + 'static,
{
    /// Creates a table with the default config.
    pub fn new(cornice: &'c Cornice<A, C>) -> Self {
        CappedTable {
            cornice,
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

    /// Renders group levels, the leaf header, and one line per row.
    ///
    /// Every header line is followed by a rule whose joints line up with the
    /// line below it.
    pub fn render<'r>(&self, rows: impl IntoIterator<Item = &'r A>) -> String
    where
        A: 'r,
    {
        let rows: Vec<&A> = rows.into_iter().collect();
        let annotated = self.cornice.annotate(rows.iter().copied());
        let chars = self.config.border.chars();
        let fill = self.config.fill;

        let leaves = annotated.leaves();
        let widths = annotated.leaf_widths();
        let levels = annotated.levels();

        let mut sizes_per_line: Vec<Vec<usize>> = levels
            .iter()
            .map(|level| level.iter().map(|(size, _)| *size).collect())
            .collect();
        sizes_per_line.push(widths.clone());

        let mut output = vec![chars.rule(&sizes_per_line[0], LineType::Top)];
        for (index, level) in levels.iter().enumerate() {
            output.push(chars.line(
                level.iter().map(|(size, label)| (*size, text(*label))),
                fill,
            ));
            output.push(chars.rule(&sizes_per_line[index + 1], LineType::Middle));
        }

        let header: Vec<&C> = leaves
            .iter()
            .flat_map(|sized| sized.encoding().columns().filter_map(|col| col.header_content()))
            .collect();
        output.push(chars.line(
            widths.iter().copied().zip(header.iter().map(|h| text(*h))),
            fill,
        ));
        output.push(chars.rule(&widths, LineType::Middle));

        for row in rows {
            let cells: Vec<C> = leaves
                .iter()
                .flat_map(|sized| sized.encoding().render_row(row))
                .collect();
            output.push(chars.line(widths.iter().copied().zip(cells.iter().map(text)), fill));
        }

        output.push(chars.rule(&widths, LineType::Bottom));
        output.join("\n")
    }
}

/// Renders a grouped-header table with the default config.
pub fn ascii_capped<'r, A, C>(
    cornice: &Cornice<A, C>,
    rows: impl IntoIterator<Item = &'r A>,
) -> String
where
    A: 'static,
    C: AsRef<str> + Clone + Send + Sync + 'static,
{
    CappedTable::new(cornice).render(rows)
}
