use std::cmp::Ordering;

/// Total order used by an [`OrderedTree`](crate::OrderedTree) for every
/// structural decision.
///
/// The tree trusts the comparator blindly. It must be a consistent total
/// order: antisymmetric, transitive, and stable for the lifetime of the tree.
/// A comparator that breaks those rules leaves the tree in an unspecified
/// (but memory-safe) shape where lookups may miss stored values.
///
/// Closures of the form `Fn(&T, &T) -> Ordering` are comparators:
///
/// ```
/// use ordtree::OrderedTree;
///
/// let mut tree = OrderedTree::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
/// tree.insert(2.5);
/// tree.insert(-1.0);
/// assert_eq!(tree.values(), [&-1.0, &2.5]);
/// ```
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The element type's own [`Ord`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Flips the order of the wrapped comparator.
///
/// ```
/// use ordtree::{Natural, OrderedTree, Reverse};
///
/// let mut tree = OrderedTree::with_comparator(Reverse(Natural));
/// tree.extend([1, 3, 2]);
/// assert_eq!(tree.values(), [&3, &2, &1]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
