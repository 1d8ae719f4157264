pub mod tree;

use crate::{Comparator, OrderedTree};

impl<T, C: Comparator<T> + Default> FromIterator<T> for OrderedTree<T, C> {
    /// Values the comparator reports equal collapse into the first one seen.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> OrderedTree<T, C> {
        let mut tree = OrderedTree::with_comparator(C::default());
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for OrderedTree<T, C> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |v| {
            self.insert(v);
        });
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for OrderedTree<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
