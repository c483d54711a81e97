//! Column encodings: how one row value becomes a sequence of cells.
//!
//! An [`Encoding`] is an ordered list of [`Column`]s over a row type `A` and a
//! cell type `C`. Encodings are built from one-column singletons and combined
//! by concatenation, so a table description reads as a sum of its columns:
//!
//! ```rust
//! use colonnade::Encoding;
//!
//! struct Person { name: String, age: u32 }
//!
//! let encoding: Encoding<Person, String> = Encoding::headed("Name", |p: &Person| p.name.clone())
//!     .concat(Encoding::headed("Age", |p: &Person| p.age.to_string()));
//!
//! let david = Person { name: "David".into(), age: 63 };
//! assert_eq!(encoding.render_header(), vec!["Name", "Age"]);
//! assert_eq!(encoding.render_row(&david), vec!["David", "63"]);
//! ```
//!
//! ## Row rewrites
//!
//! [`Encoding::replace_when`] and [`Encoding::modify_when`] post-process the
//! cells of a whole row. They are stored as rewrites over a span of columns
//! rather than folded into each column, so the predicate runs once per row and
//! only the columns that existed when the rewrite was added are affected.
//! Header content is never rewritten.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::headedness::{Headed, Headedness, Headless};

type Render<A, C> = Arc<dyn Fn(&A) -> C + Send + Sync>;
type Predicate<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

/// One column of an encoding: a header label and a projection from the row to
/// one cell.
pub struct Column<A, C, H: Headedness = Headed> {
    header: H::Label<C>,
    render: Render<A, C>,
}

impl<A, C, H: Headedness> Column<A, C, H> {
    /// The header label stored for this column.
    pub fn header(&self) -> &H::Label<C> {
        &self.header
    }

    /// The header content, or `None` for headless columns.
    pub fn header_content(&self) -> Option<&C> {
        H::content(&self.header)
    }

    /// Applies this column's projection to a row.
    ///
    /// Row rewrites registered on the owning encoding are not applied here;
    /// use [`Encoding::render_row`] for the final cell content.
    pub fn project(&self, row: &A) -> C {
        (self.render)(row)
    }
}

impl<A, C: Clone, H: Headedness> Clone for Column<A, C, H> {
    fn clone(&self) -> Self {
        Column {
            header: H::clone_label(&self.header),
            render: Arc::clone(&self.render),
        }
    }
}

enum Rewrite<C> {
    Replace(C),
    Modify(Arc<dyn Fn(C) -> C + Send + Sync>),
}

impl<C: Clone> Rewrite<C> {
    fn apply(&self, cell: C) -> C {
        match self {
            Rewrite::Replace(content) => content.clone(),
            Rewrite::Modify(f) => f(cell),
        }
    }
}

impl<C: Clone> Clone for Rewrite<C> {
    fn clone(&self) -> Self {
        match self {
            Rewrite::Replace(content) => Rewrite::Replace(content.clone()),
            Rewrite::Modify(f) => Rewrite::Modify(Arc::clone(f)),
        }
    }
}

/// A row-level rewrite over a contiguous span of columns.
struct Guard<A, C> {
    span: Range<usize>,
    predicate: Predicate<A>,
    rewrite: Rewrite<C>,
}

impl<A, C: Clone> Clone for Guard<A, C> {
    fn clone(&self) -> Self {
        Guard {
            span: self.span.clone(),
            predicate: Arc::clone(&self.predicate),
            rewrite: self.rewrite.clone(),
        }
    }
}

/// An ordered sequence of columns over row type `A` and cell type `C`.
///
/// Column order is preserved by every combinator. Concatenation is
/// associative and [`Encoding::empty`] is its identity.
pub struct Encoding<A, C, H: Headedness = Headed> {
    columns: Vec<Column<A, C, H>>,
    guards: Vec<Guard<A, C>>,
}

impl<A, C, H: Headedness> Encoding<A, C, H> {
    /// An encoding with no columns.
    pub fn empty() -> Self {
        Encoding {
            columns: Vec::new(),
            guards: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates over the columns in order.
    pub fn columns(&self) -> impl Iterator<Item = &Column<A, C, H>> {
        self.columns.iter()
    }

    /// Iterates over the header labels in column order.
    pub fn headers(&self) -> impl Iterator<Item = &H::Label<C>> {
        self.columns.iter().map(|col| &col.header)
    }

    /// Appends the columns of `other` after the columns of `self`.
    pub fn concat(mut self, other: Self) -> Self {
        let offset = self.columns.len();
        self.columns.extend(other.columns);
        self.guards.extend(other.guards.into_iter().map(|mut guard| {
            guard.span = (guard.span.start + offset)..(guard.span.end + offset);
            guard
        }));
        self
    }

    /// Transforms every header label, leaving cell rendering untouched.
    ///
    /// On a headless encoding this changes nothing.
    pub fn map_headers(self, f: impl Fn(C) -> C) -> Self {
        let columns = self
            .columns
            .into_iter()
            .map(|col| Column {
                header: H::map_label(col.header, &f),
                render: col.render,
            })
            .collect();
        Encoding {
            columns,
            guards: self.guards,
        }
    }
}

impl<A, C, H> Encoding<A, C, H>
where
    A: 'static,
    C: Clone + Send + Sync + 'static,
    H: Headedness,
{
    /// Renders one row: one cell per column, in column order.
    ///
    /// Each rewrite's predicate is evaluated exactly once for the row.
    pub fn render_row(&self, row: &A) -> Vec<C> {
        let active: Vec<bool> = self
            .guards
            .iter()
            .map(|guard| (guard.predicate)(row))
            .collect();

        self.columns
            .iter()
            .enumerate()
            .map(|(index, col)| {
                self.guards
                    .iter()
                    .zip(&active)
                    .filter(|(guard, on)| **on && guard.span.contains(&index))
                    .fold(col.project(row), |cell, (guard, _)| guard.rewrite.apply(cell))
            })
            .collect()
    }

    /// Replaces every cell of a row with `content` when `predicate` holds.
    ///
    /// Applies to the columns present at the time of the call; columns
    /// concatenated afterwards are unaffected.
    pub fn replace_when(
        mut self,
        content: C,
        predicate: impl Fn(&A) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.guards.push(Guard {
            span: 0..self.columns.len(),
            predicate: Arc::new(predicate),
            rewrite: Rewrite::Replace(content),
        });
        self
    }

    /// Transforms every cell of a row with `f` when `predicate` holds.
    pub fn modify_when(
        mut self,
        f: impl Fn(C) -> C + Send + Sync + 'static,
        predicate: impl Fn(&A) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.guards.push(Guard {
            span: 0..self.columns.len(),
            predicate: Arc::new(predicate),
            rewrite: Rewrite::Modify(Arc::new(f)),
        });
        self
    }

    /// Adapts the encoding to a new row type through a projection.
    pub fn contramap<B: 'static>(
        self,
        f: impl Fn(&B) -> A + Send + Sync + 'static,
    ) -> Encoding<B, C, H> {
        let f = Arc::new(f);
        let columns = self
            .columns
            .into_iter()
            .map(|col| {
                let f = Arc::clone(&f);
                let render = col.render;
                Column {
                    header: col.header,
                    render: Arc::new(move |b: &B| render(&f(b))) as Render<B, C>,
                }
            })
            .collect();
        let guards = self
            .guards
            .into_iter()
            .map(|guard| {
                let f = Arc::clone(&f);
                let predicate = guard.predicate;
                Guard {
                    span: guard.span,
                    predicate: Arc::new(move |b: &B| predicate(&f(b))) as Predicate<B>,
                    rewrite: guard.rewrite,
                }
            })
            .collect();
        Encoding { columns, guards }
    }

    /// Lifts the encoding over `Option<A>`.
    ///
    /// Absent rows render `default` in every column; rewrites only fire for
    /// present rows.
    pub fn lift_optional(self, default: C) -> Encoding<Option<A>, C, H> {
        let columns = self
            .columns
            .into_iter()
            .map(|col| {
                let render = col.render;
                let default = default.clone();
                Column {
                    header: col.header,
                    render: Arc::new(move |row: &Option<A>| match row {
                        Some(value) => render(value),
                        None => default.clone(),
                    }) as Render<Option<A>, C>,
                }
            })
            .collect();
        let guards = self
            .guards
            .into_iter()
            .map(|guard| {
                let predicate = guard.predicate;
                Guard {
                    span: guard.span,
                    predicate: Arc::new(move |row: &Option<A>| {
                        row.as_ref().is_some_and(|value| predicate(value))
                    }) as Predicate<Option<A>>,
                    rewrite: guard.rewrite,
                }
            })
            .collect();
        Encoding { columns, guards }
    }

    /// Maps header and cell content to a new cell type.
    ///
    /// Pending row rewrites are folded into each column first, since they
    /// operate on the old cell type.
    pub fn map_content<D: 'static>(
        self,
        f: impl Fn(C) -> D + Send + Sync + 'static,
    ) -> Encoding<A, D, H> {
        let f = Arc::new(f);
        let guards = Arc::new(self.guards);
        let columns = self
            .columns
            .into_iter()
            .enumerate()
            .map(|(index, col)| {
                let f = Arc::clone(&f);
                let guards = Arc::clone(&guards);
                let render = col.render;
                Column {
                    header: H::map_label(col.header, |c| f(c)),
                    render: Arc::new(move |row: &A| {
                        let cell = guards
                            .iter()
                            .filter(|guard| guard.span.contains(&index))
                            .fold(render(row), |cell, guard| {
                                if (guard.predicate)(row) {
                                    guard.rewrite.apply(cell)
                                } else {
                                    cell
                                }
                            });
                        f(cell)
                    }) as Render<A, D>,
                }
            })
            .collect();
        Encoding {
            columns,
            guards: Vec::new(),
        }
    }
}

impl<A: 'static, C: 'static> Encoding<A, C, Headed> {
    /// A one-column encoding with a header label.
    pub fn headed(
        label: impl Into<C>,
        render: impl Fn(&A) -> C + Send + Sync + 'static,
    ) -> Self {
        Encoding {
            columns: vec![Column {
                header: label.into(),
                render: Arc::new(render),
            }],
            guards: Vec::new(),
        }
    }

    /// One column per basis value.
    ///
    /// Useful for turning a fixed domain, such as the cases of an enum, into
    /// a column each. Both the header and the cell renderer receive the basis
    /// value of their column.
    ///
    /// ```rust
    /// use colonnade::Encoding;
    ///
    /// let months = ["Jan", "Feb"];
    /// let encoding: Encoding<[u32; 2], String> = Encoding::from_basis(
    ///     0..months.len(),
    ///     |i| months[*i].to_string(),
    ///     |i, sales: &[u32; 2]| sales[*i].to_string(),
    /// );
    /// assert_eq!(encoding.render_header(), vec!["Jan", "Feb"]);
    /// assert_eq!(encoding.render_row(&[3, 9]), vec!["3", "9"]);
    /// ```
    pub fn from_basis<B, I>(
        basis: I,
        header: impl Fn(&B) -> C,
        cell: impl Fn(&B, &A) -> C + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Send + Sync + 'static,
    {
        let cell = Arc::new(cell);
        let columns = basis
            .into_iter()
            .map(|b| {
                let cell = Arc::clone(&cell);
                Column {
                    header: header(&b),
                    render: Arc::new(move |row: &A| cell(&b, row)) as Render<A, C>,
                }
            })
            .collect();
        Encoding {
            columns,
            guards: Vec::new(),
        }
    }

    /// A one-column encoding that picks its renderer per row.
    pub fn conditional(
        label: impl Into<C>,
        predicate: impl Fn(&A) -> bool + Send + Sync + 'static,
        on_true: impl Fn(&A) -> C + Send + Sync + 'static,
        on_false: impl Fn(&A) -> C + Send + Sync + 'static,
    ) -> Self {
        Self::headed(label, move |row: &A| {
            if predicate(row) {
                on_true(row)
            } else {
                on_false(row)
            }
        })
    }

    /// Header content in column order.
    pub fn render_header(&self) -> Vec<C>
    where
        C: Clone,
    {
        self.columns.iter().map(|col| col.header.clone()).collect()
    }

    /// Drops the header labels.
    pub fn to_headless(self) -> Encoding<A, C, Headless> {
        Encoding {
            columns: self
                .columns
                .into_iter()
                .map(|col| Column {
                    header: (),
                    render: col.render,
                })
                .collect(),
            guards: self.guards,
        }
    }
}

impl<A: 'static, C: 'static> Encoding<A, C, Headless> {
    /// A one-column encoding without a header label.
    pub fn headless(render: impl Fn(&A) -> C + Send + Sync + 'static) -> Self {
        Encoding {
            columns: vec![Column {
                header: (),
                render: Arc::new(render),
            }],
            guards: Vec::new(),
        }
    }

    /// One headless column per basis value.
    pub fn headless_from_basis<B, I>(
        basis: I,
        cell: impl Fn(&B, &A) -> C + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Send + Sync + 'static,
    {
        let cell = Arc::new(cell);
        let columns = basis
            .into_iter()
            .map(|b| {
                let cell = Arc::clone(&cell);
                Column {
                    header: (),
                    render: Arc::new(move |row: &A| cell(&b, row)) as Render<A, C>,
                }
            })
            .collect();
        Encoding {
            columns,
            guards: Vec::new(),
        }
    }
}

impl<A, C, H: Headedness> Default for Encoding<A, C, H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A, C: Clone, H: Headedness> Clone for Encoding<A, C, H> {
    fn clone(&self) -> Self {
        Encoding {
            columns: self.columns.clone(),
            guards: self.guards.clone(),
        }
    }
}

impl<A, C, H: Headedness> FromIterator<Encoding<A, C, H>> for Encoding<A, C, H> {
    fn from_iter<I: IntoIterator<Item = Encoding<A, C, H>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::concat)
    }
}

impl<A, C, H: Headedness> fmt::Debug for Encoding<A, C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoding")
            .field("headedness", &H::default())
            .field("columns", &self.columns.len())
            .field("rewrites", &self.guards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        age: u32,
    }

    fn person(name: &str, age: u32) -> Person {
        Person {
            name: name.to_string(),
            age,
        }
    }

    fn people() -> Encoding<Person, String> {
        Encoding::headed("Name", |p: &Person| p.name.clone())
            .concat(Encoding::headed("Age", |p: &Person| p.age.to_string()))
    }

    #[test]
    fn renders_header_and_row() {
        let encoding = people();
        assert_eq!(encoding.render_header(), vec!["Name", "Age"]);
        assert_eq!(encoding.render_row(&person("David", 63)), vec!["David", "63"]);
    }

    #[test]
    fn empty_is_identity() {
        let left = Encoding::empty().concat(people());
        let right = people().concat(Encoding::empty());
        let row = person("Ava", 34);
        assert_eq!(left.render_row(&row), people().render_row(&row));
        assert_eq!(right.render_row(&row), people().render_row(&row));
    }

    #[test]
    fn collects_from_iterator() {
        let encoding: Encoding<Person, String> = vec![
            Encoding::headed("A", |p: &Person| p.name.clone()),
            Encoding::headed("B", |p: &Person| p.age.to_string()),
            Encoding::headed("C", |_: &Person| "-".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(encoding.column_count(), 3);
        assert_eq!(encoding.render_header(), vec!["A", "B", "C"]);
    }

    #[test]
    fn map_headers_leaves_cells() {
        let encoding = people().map_headers(|h| h.to_uppercase());
        assert_eq!(encoding.render_header(), vec!["NAME", "AGE"]);
        assert_eq!(encoding.render_row(&person("Sonia", 12)), vec!["Sonia", "12"]);
    }

    #[test]
    fn replace_when_rewrites_whole_row() {
        let encoding = people().replace_when("--".to_string(), |p| p.age < 18);
        assert_eq!(encoding.render_row(&person("Sonia", 12)), vec!["--", "--"]);
        assert_eq!(encoding.render_row(&person("Ava", 34)), vec!["Ava", "34"]);
        assert_eq!(encoding.render_header(), vec!["Name", "Age"]);
    }

    #[test]
    fn modify_when_transforms_cells() {
        let encoding = people().modify_when(|c| format!("*{}*", c), |p| p.age > 60);
        assert_eq!(
            encoding.render_row(&person("David", 63)),
            vec!["*David*", "*63*"]
        );
    }

    #[test]
    fn rewrite_only_covers_existing_columns() {
        let encoding = people()
            .replace_when("x".to_string(), |_| true)
            .concat(Encoding::headed("Tag", |_: &Person| "t".to_string()));
        assert_eq!(encoding.render_row(&person("Ava", 34)), vec!["x", "x", "t"]);
    }

    #[test]
    fn rewrites_apply_inner_first() {
        let encoding = people()
            .modify_when(|c| format!("{}!", c), |_| true)
            .replace_when("gone".to_string(), |p| p.age == 34);
        assert_eq!(encoding.render_row(&person("Ava", 34)), vec!["gone", "gone"]);
        assert_eq!(encoding.render_row(&person("Bo", 9)), vec!["Bo!", "9!"]);
    }

    #[test]
    fn predicate_runs_once_per_row() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let encoding = people().replace_when("-".to_string(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });
        encoding.render_row(&person("Ava", 34));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lift_optional_uses_default() {
        let encoding = people().lift_optional("n/a".to_string());
        assert_eq!(encoding.render_row(&None), vec!["n/a", "n/a"]);
        assert_eq!(
            encoding.render_row(&Some(person("Ava", 34))),
            vec!["Ava", "34"]
        );
    }

    #[test]
    fn lift_optional_skips_rewrites_for_absent_rows() {
        let encoding = people()
            .replace_when("x".to_string(), |_| true)
            .lift_optional("none".to_string());
        assert_eq!(encoding.render_row(&None), vec!["none", "none"]);
        assert_eq!(encoding.render_row(&Some(person("A", 1))), vec!["x", "x"]);
    }

    #[test]
    fn contramap_projects_rows() {
        let encoding = people().contramap(|(name, age): &(String, u32)| person(name, *age));
        assert_eq!(
            encoding.render_row(&("Ava".to_string(), 34)),
            vec!["Ava", "34"]
        );
    }

    #[test]
    fn map_content_keeps_rewrites() {
        let encoding = people()
            .replace_when("minor".to_string(), |p| p.age < 18)
            .map_content(|c| c.len());
        assert_eq!(encoding.render_header(), vec![4, 3]);
        assert_eq!(encoding.render_row(&person("Sonia", 12)), vec![5, 5]);
        assert_eq!(encoding.render_row(&person("David", 63)), vec![5, 2]);
    }

    #[test]
    fn conditional_column() {
        let encoding: Encoding<Person, String> = Encoding::conditional(
            "Group",
            |p: &Person| p.age >= 18,
            |_| "adult".to_string(),
            |_| "minor".to_string(),
        );
        assert_eq!(encoding.render_row(&person("Ava", 34)), vec!["adult"]);
        assert_eq!(encoding.render_row(&person("Sonia", 12)), vec!["minor"]);
    }

    #[test]
    fn headless_encoding_renders_rows() {
        let encoding = people().to_headless();
        assert_eq!(encoding.column_count(), 2);
        assert!(encoding.columns().all(|col| col.header_content().is_none()));
        assert_eq!(encoding.render_row(&person("Ava", 34)), vec!["Ava", "34"]);

        let built: Encoding<u32, String, Headless> =
            Encoding::headless_from_basis(1..=3u32, |k, n: &u32| (k * n).to_string());
        assert_eq!(built.render_row(&2), vec!["2", "4", "6"]);
    }
}
