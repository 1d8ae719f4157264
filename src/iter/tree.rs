use std::{cmp::Ordering, iter::FusedIterator, marker::PhantomData};

use crate::{Comparator, NodePtr, OrderedTree};

/// A lazy in-order cursor over the values of an [`OrderedTree`].
///
/// Each step is one successor (or predecessor, from the back) walk, so a full
/// pass costs O(n) and a single step amortizes to O(1). Independent cursors
/// over the same tree coexist freely; the borrow checker keeps the tree from
/// changing under them.
///
/// ```
/// use ordtree::OrderedTree;
///
/// let tree: OrderedTree<_> = [2, 3, 1].into_iter().collect();
/// let mut iter = tree.iter();
/// assert_eq!(Some(&1), iter.next());
/// assert_eq!(Some(&3), iter.next_back());
/// assert_eq!(vec![&2], iter.collect::<Vec<_>>());
/// // A fresh call starts over.
/// assert_eq!(3, tree.iter().count());
/// ```
pub struct Iter<'a, T> {
    first: NodePtr<T>,
    last: NodePtr<T>,
    len: usize,
    _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(first: NodePtr<T>, last: NodePtr<T>, len: usize) -> Self {
        Iter {
            first,
            last,
            len,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.first.map(|n| {
            let n = unsafe { n.as_ref() };
            self.len -= 1;
            self.first = n.next();
            &n.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.last.map(|n| {
            let n = unsafe { n.as_ref() };
            self.len -= 1;
            self.last = n.prev();
            &n.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

// SAFETY: an `Iter` only reads node values through a shared borrow of the tree.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            first: self.first,
            last: self.last,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

/// A lazy cursor over the values between two inclusive bounds.
///
/// This `struct` is created by [`OrderedTree::range_iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T, C> {
    next: NodePtr<T>,
    hi: &'a T,
    comparator: &'a C,
}

impl<'a, T, C> Range<'a, T, C> {
    pub(crate) fn new(start: NodePtr<T>, hi: &'a T, comparator: &'a C) -> Self {
        Range {
            next: start,
            hi,
            comparator,
        }
    }
}

impl<'a, T, C: Comparator<T>> Iterator for Range<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let n = unsafe { self.next?.as_ref() };
        if self.comparator.compare(&n.value, self.hi) == Ordering::Greater {
            self.next = None;
            return None;
        }
        self.next = n.next();
        Some(&n.value)
    }
}

impl<T, C: Comparator<T>> FusedIterator for Range<'_, T, C> {}

// SAFETY: a `Range` only reads node values and the comparator through shared
// borrows of the tree.
unsafe impl<T: Sync, C: Sync> Send for Range<'_, T, C> {}
unsafe impl<T: Sync, C: Sync> Sync for Range<'_, T, C> {}

impl<T, C> Clone for Range<'_, T, C> {
    fn clone(&self) -> Self {
        Range {
            next: self.next,
            hi: self.hi,
            comparator: self.comparator,
        }
    }
}

/// An owning iterator over the values of an [`OrderedTree`], ascending.
///
/// ```
/// use ordtree::OrderedTree;
///
/// let tree: OrderedTree<_> = ["b", "c", "a"].into_iter().collect();
/// let owned: Vec<&str> = tree.into_iter().collect();
/// assert_eq!(owned, ["a", "b", "c"]);
/// ```
pub struct IntoIter<T, C: Comparator<T>>(OrderedTree<T, C>);

impl<T, C: Comparator<T>> IntoIterator for OrderedTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> IntoIter<T, C> {
        IntoIter(self)
    }
}

impl<T, C: Comparator<T>> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }

    fn last(mut self) -> Option<T> {
        self.next_back()
    }
}

impl<T, C: Comparator<T>> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_last()
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for IntoIter<T, C> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T, C: Comparator<T>> FusedIterator for IntoIter<T, C> {}
