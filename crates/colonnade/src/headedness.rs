//! Capability tags describing whether an encoding carries header labels.
//!
//! Headedness is a property of a whole [`Encoding`](crate::Encoding), never of a
//! single column, so it is expressed as a type parameter rather than as an
//! `Option` stored in each column. [`Headed`] columns carry one label of the
//! cell type; [`Headless`] columns carry nothing.

use std::fmt::Debug;

/// A headedness tag.
///
/// The associated [`Label`](Headedness::Label) type is what each column stores
/// for its header: the cell content itself for [`Headed`], `()` for [`Headless`].
pub trait Headedness: Copy + Debug + Default + Send + Sync + 'static {
    /// Per-column header storage for cell type `C`.
    type Label<C>;

    /// Returns the header content, if this tag carries any.
    fn content<C>(label: &Self::Label<C>) -> Option<&C>;

    /// Transforms the header content, preserving the shape of the label.
    fn map_label<C, D>(label: Self::Label<C>, f: impl FnOnce(C) -> D) -> Self::Label<D>;

    /// Clones a label. Kept on the tag so `Clone` bounds stay on `C` alone.
    fn clone_label<C: Clone>(label: &Self::Label<C>) -> Self::Label<C>;
}

/// Columns carry a header label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Headed;

/// Columns carry no header label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Headless;

impl Headedness for Headed {
    type Label<C> = C;

    fn content<C>(label: &C) -> Option<&C> {
        Some(label)
    }

    fn map_label<C, D>(label: C, f: impl FnOnce(C) -> D) -> D {
        f(label)
    }

    fn clone_label<C: Clone>(label: &C) -> C {
        label.clone()
    }
}

impl Headedness for Headless {
    type Label<C> = ();

    fn content<C>(_label: &()) -> Option<&C> {
        None
    }

    fn map_label<C, D>(_label: (), _f: impl FnOnce(C) -> D) {}

    fn clone_label<C: Clone>(_label: &()) {}
}
