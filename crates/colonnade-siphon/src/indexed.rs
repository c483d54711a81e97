//! Values tagged with their column position.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value tagged with its zero-based column index.
///
/// Equality, ordering, hashing and display consider the index only. Two
/// header cells at the same position are the same slot whatever their
/// content, which is what header bookkeeping needs; it is not a general
/// notion of equality for the wrapped value.
///
/// ```rust
/// use colonnade_siphon::Indexed;
///
/// assert_eq!(Indexed::new(2, "Name"), Indexed::new(2, "Age"));
/// assert!(Indexed::new(1, "Zed") < Indexed::new(2, "Age"));
/// assert_eq!(Indexed::new(3, "Name").to_string(), "#3");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Indexed<A> {
    /// Zero-based column index.
    pub index: usize,
    /// The tagged value.
    pub value: A,
}

impl<A> Indexed<A> {
    /// Tags `value` with `index`.
    pub fn new(index: usize, value: A) -> Self {
        Indexed { index, value }
    }

    /// Transforms the value, keeping the index.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Indexed<B> {
        Indexed {
            index: self.index,
            value: f(self.value),
        }
    }

    /// Borrows the value, keeping the index.
    pub fn as_ref(&self) -> Indexed<&A> {
        Indexed {
            index: self.index,
            value: &self.value,
        }
    }
}

impl<A> PartialEq for Indexed<A> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<A> Eq for Indexed<A> {}

impl<A> PartialOrd for Indexed<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Indexed<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<A> Hash for Indexed<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<A> fmt::Display for Indexed<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn set_keeps_one_value_per_slot() {
        let slots: BTreeSet<Indexed<&str>> = [
            Indexed::new(2, "b"),
            Indexed::new(0, "a"),
            Indexed::new(2, "other"),
        ]
        .into_iter()
        .collect();
        let indices: Vec<usize> = slots.iter().map(|slot| slot.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn map_keeps_index() {
        let slot = Indexed::new(4, "name").map(str::len);
        assert_eq!(slot.index, 4);
        assert_eq!(slot.value, 4);
        assert_eq!(slot.as_ref().value, &4);
    }
}
